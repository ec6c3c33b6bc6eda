//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase", default)]`, so a settings
//! file may name only the fields it changes.

use serde::{Deserialize, Serialize};

/// Root settings type.
///
/// Example `~/.taskboard/settings.json`:
///
/// ```json
/// {
///   "storage": { "dataDir": "/var/lib/taskboard" },
///   "seed": { "demoAccounts": true }
/// }
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoardSettings {
    /// Where the collections are persisted.
    pub storage: StorageSettings,
    /// Password hashing parameters.
    pub security: SecuritySettings,
    /// Demo data seeded at startup.
    pub seed: SeedSettings,
    /// Log verbosity.
    pub logging: LoggingSettings,
}

/// Persistence location.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageSettings {
    /// Directory holding `users.json`, `tasks.json` and `user.json`.
    pub data_dir: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
        Self {
            data_dir: format!("{home}/.taskboard/data"),
        }
    }
}

/// Password hashing parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecuritySettings {
    /// PBKDF2 rounds for newly hashed passwords.
    pub pbkdf2_iterations: u32,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            pbkdf2_iterations: 100_000,
        }
    }
}

/// Demo data.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeedSettings {
    /// Register the demo admin and user accounts when absent.
    pub demo_accounts: bool,
}

/// Log verbosity.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}
