//! Settings loading: defaults ← file deep-merge ← env overrides.

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::errors::Result;
use crate::types::AtelierSettings;

/// Environment variable prefix for overrides.
const ENV_PREFIX: &str = "ATELIER_";

/// Load settings from an optional file path with env overrides applied.
///
/// A missing file is not an error — defaults are used. A present but
/// malformed file is an error: silently ignoring a broken config would
/// mask operator mistakes.
pub fn load_settings(path: Option<&Path>) -> Result<AtelierSettings> {
    match path {
        Some(p) if p.exists() => load_settings_from_path(p),
        Some(p) => {
            debug!(path = %p.display(), "settings file not found, using defaults");
            Ok(apply_env_overrides(AtelierSettings::default()))
        }
        None => Ok(apply_env_overrides(AtelierSettings::default())),
    }
}

/// Load settings from a specific file, deep-merged over defaults, with env
/// overrides applied last.
pub fn load_settings_from_path(path: &Path) -> Result<AtelierSettings> {
    let raw = std::fs::read_to_string(path)?;
    let file_value: Value = serde_json::from_str(&raw)?;
    let defaults = serde_json::to_value(AtelierSettings::default())?;
    let merged = deep_merge(defaults, file_value);
    let settings: AtelierSettings = serde_json::from_value(merged)?;
    Ok(apply_env_overrides(settings))
}

/// Recursively merge `overlay` into `base`. Objects merge key-by-key; any
/// other value in the overlay replaces the base value.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value,
                };
                let _ = base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (_, overlay) => overlay,
    }
}

/// Apply `ATELIER_*` environment variable overrides.
fn apply_env_overrides(mut settings: AtelierSettings) -> AtelierSettings {
    if let Some(port) = env_var("PORT").and_then(|v| v.parse().ok()) {
        settings.server.port = port;
    }
    if let Some(dir) = env_var("DATA_DIR") {
        settings.storage.data_dir = dir.into();
    }
    if let Some(url) = env_var("OPENAI_BASE_URL") {
        settings.openai.base_url = url;
    }
    if let Some(tz) = env_var("DISPLAY_TIMEZONE") {
        settings.display.timezone = tz;
    }
    settings
}

fn env_var(suffix: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}{suffix}"))
        .ok()
        .filter(|v| !v.is_empty())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deep_merge_disjoint_keys() {
        let merged = deep_merge(json!({"a": 1}), json!({"b": 2}));
        assert_eq!(merged, json!({"a": 1, "b": 2}));
    }

    #[test]
    fn deep_merge_overlay_wins_on_scalars() {
        let merged = deep_merge(json!({"a": 1}), json!({"a": 9}));
        assert_eq!(merged["a"], 9);
    }

    #[test]
    fn deep_merge_nested_objects() {
        let merged = deep_merge(
            json!({"server": {"port": 8420, "other": true}}),
            json!({"server": {"port": 9000}}),
        );
        assert_eq!(merged["server"]["port"], 9000);
        assert_eq!(merged["server"]["other"], true);
    }

    #[test]
    fn deep_merge_array_replaced_not_merged() {
        let merged = deep_merge(json!({"a": [1, 2]}), json!({"a": [3]}));
        assert_eq!(merged["a"], json!([3]));
    }

    #[test]
    fn load_missing_file_uses_defaults() {
        let settings = load_settings(Some(Path::new("/nonexistent/settings.json"))).unwrap();
        assert_eq!(settings.server.port, 8420);
    }

    #[test]
    fn load_no_path_uses_defaults() {
        let settings = load_settings(None).unwrap();
        assert_eq!(settings.display.timezone, "Asia/Colombo");
    }

    #[test]
    fn load_file_merges_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"server": {"port": 9001}, "display": {"timezone": "UTC"}}"#,
        )
        .unwrap();

        let settings = load_settings_from_path(&path).unwrap();
        assert_eq!(settings.server.port, 9001);
        assert_eq!(settings.display.timezone, "UTC");
        // Untouched sections keep defaults
        assert_eq!(settings.openai.image_model, "dall-e-3");
    }

    #[test]
    fn load_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(load_settings_from_path(&path).is_err());
    }
}
