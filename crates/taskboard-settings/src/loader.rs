//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`BoardSettings::default()`]
//! 2. If `~/.taskboard/settings.json` exists, deep-merge user values over defaults
//! 3. Apply environment variable overrides (highest priority)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::{Result, SettingsError};
use crate::types::BoardSettings;

/// Resolve the path to the settings file (`~/.taskboard/settings.json`).
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".taskboard").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<BoardSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// A missing file yields defaults; invalid JSON is an error.
pub fn load_settings_from_path(path: &Path) -> Result<BoardSettings> {
    let mut settings = load_file_layer(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Defaults merged with the settings file, without env overrides.
fn load_file_layer(path: &Path) -> Result<BoardSettings> {
    let defaults = serde_json::to_value(BoardSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content =
            std::fs::read_to_string(path).map_err(|e| SettingsError::read(path, e))?;
        let user: Value =
            serde_json::from_str(&content).map_err(|e| SettingsError::parse(path, e))?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    Ok(serde_json::from_value(merged)?)
}

/// Recursive deep merge of two JSON values.
///
/// - Objects are merged recursively (source overrides target per-key)
/// - Arrays and primitives are replaced entirely by source
/// - Null values in source are skipped (preserving target)
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply environment variable overrides to loaded settings.
///
/// Invalid values are ignored with a warning (fall back to file/default).
pub fn apply_env_overrides(settings: &mut BoardSettings) {
    if let Some(v) = read_env_string("TASKBOARD_DATA_DIR") {
        settings.storage.data_dir = v;
    }
    if let Some(v) = read_env_u32("TASKBOARD_PBKDF2_ITERATIONS", 1, 10_000_000) {
        settings.security.pbkdf2_iterations = v;
    }
    if let Some(v) = read_env_bool("TASKBOARD_SEED_DEMO") {
        settings.seed.demo_accounts = v;
    }
    if let Some(v) = read_env_string("TASKBOARD_LOG_LEVEL") {
        settings.logging.level = v;
    }
}

// ── Pure parsing functions (testable without env vars) ──────────────────────

/// Parse a string as a boolean.
///
/// Accepts (case-insensitive): `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`.
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a string as a `u32` within a range.
pub fn parse_u32_range(val: &str, min: u32, max: u32) -> Option<u32> {
    let n: u32 = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

// ── Env var readers (thin wrappers) ─────────────────────────────────────────

fn read_env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn read_env_bool(name: &str) -> Option<bool> {
    let val = std::env::var(name).ok()?;
    let result = parse_bool(&val);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid boolean env var, ignoring");
    }
    result
}

fn read_env_u32(name: &str, min: u32, max: u32) -> Option<u32> {
    let val = std::env::var(name).ok()?;
    let result = parse_u32_range(&val, min, max);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid u32 env var, ignoring");
    }
    result
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(unsafe_code)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    /// SAFETY: env mutation races with other threads reading the same keys.
    /// Only `env_overrides_beat_file_values` touches these keys, and it
    /// restores them before returning.
    fn set_env(key: &str, val: &str) {
        unsafe { std::env::set_var(key, val) };
    }

    fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) };
    }

    fn restore_env(key: &str, prev: Option<String>) {
        match prev {
            Some(v) => set_env(key, &v),
            None => remove_env(key),
        }
    }

    #[test]
    fn env_overrides_beat_file_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"security":{"pbkdf2Iterations":5000},"seed":{"demoAccounts":false}}"#,
        )
        .unwrap();

        let iterations_key = "TASKBOARD_PBKDF2_ITERATIONS";
        let seed_key = "TASKBOARD_SEED_DEMO";
        let prev_iterations = std::env::var(iterations_key).ok();
        let prev_seed = std::env::var(seed_key).ok();

        set_env(iterations_key, "20000");
        set_env(seed_key, "yes");
        let overridden = load_settings_from_path(&path);

        // out-of-range and unparsable values fall back to the file layer
        set_env(iterations_key, "0");
        set_env(seed_key, "maybe");
        let rejected = load_settings_from_path(&path);

        restore_env(iterations_key, prev_iterations);
        restore_env(seed_key, prev_seed);

        let overridden = overridden.unwrap();
        assert_eq!(overridden.security.pbkdf2_iterations, 20_000);
        assert!(overridden.seed.demo_accounts);

        let rejected = rejected.unwrap();
        assert_eq!(rejected.security.pbkdf2_iterations, 5000);
        assert!(!rejected.seed.demo_accounts);
    }

    #[test]
    fn deep_merge_nested_objects() {
        let target = json!({"a": {"x": 1, "y": 2}, "b": 3});
        let source = json!({"a": {"y": 20}});
        let merged = deep_merge(target, source);
        assert_eq!(merged, json!({"a": {"x": 1, "y": 20}, "b": 3}));
    }

    #[test]
    fn deep_merge_skips_null() {
        let merged = deep_merge(json!({"a": 1}), json!({"a": null}));
        assert_eq!(merged["a"], 1);
    }

    #[test]
    fn deep_merge_replaces_arrays() {
        let merged = deep_merge(json!({"a": [1, 2]}), json!({"a": [3]}));
        assert_eq!(merged["a"], json!([3]));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = load_file_layer(&dir.path().join("settings.json")).unwrap();
        assert_eq!(settings.security.pbkdf2_iterations, 100_000);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"storage":{"dataDir":"/srv/board"},"security":{"pbkdf2Iterations":5000}}"#,
        )
        .unwrap();
        let settings = load_file_layer(&path).unwrap();
        assert_eq!(settings.storage.data_dir, "/srv/board");
        assert_eq!(settings.security.pbkdf2_iterations, 5000);
        assert_eq!(settings.logging.level, "warn");
    }

    #[test]
    fn invalid_json_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            load_file_layer(&path),
            Err(SettingsError::Parse { .. })
        ));
    }

    #[test]
    fn wrong_value_type_is_invalid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"security":{"pbkdf2Iterations":"many"}}"#).unwrap();
        assert!(matches!(
            load_file_layer(&path),
            Err(SettingsError::Invalid(_))
        ));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"theme":"dark","seed":{"demoAccounts":true}}"#).unwrap();
        let settings = load_file_layer(&path).unwrap();
        assert!(settings.seed.demo_accounts);
    }

    #[test]
    fn parse_bool_variants() {
        assert_eq!(parse_bool("YES"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn parse_u32_range_bounds() {
        assert_eq!(parse_u32_range("5000", 1, 10_000), Some(5000));
        assert_eq!(parse_u32_range("0", 1, 10_000), None);
        assert_eq!(parse_u32_range("20000", 1, 10_000), None);
        assert_eq!(parse_u32_range("abc", 1, 10_000), None);
    }
}
