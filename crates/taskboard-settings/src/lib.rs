//! # taskboard-settings
//!
//! Configuration management with layered sources for Taskboard.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`BoardSettings::default()`]
//! 2. **User file**: `~/.taskboard/settings.json` (deep-merged over defaults)
//! 3. **Environment variables**: `TASKBOARD_*` overrides (highest priority)

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::*;

use std::sync::OnceLock;

/// Global settings singleton, filled on first access via [`get_settings`].
static SETTINGS: OnceLock<BoardSettings> = OnceLock::new();

/// Get the global settings instance.
///
/// On first call, loads settings from `~/.taskboard/settings.json` with env
/// var overrides. If loading fails, returns compiled defaults.
pub fn get_settings() -> &'static BoardSettings {
    SETTINGS.get_or_init(|| match load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(error = %e, "failed to load settings, using defaults");
            BoardSettings::default()
        }
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
