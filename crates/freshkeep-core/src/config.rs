//! TOML-based configuration.
//!
//! Stores engine defaults:
//! - Expiration mode and expiring/urgent windows
//! - Recipe result limit and source
//! - Default analytics period
//!
//! Configuration is stored at `~/.config/freshkeep/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::analytics::Period;
use crate::error::ConfigError;
use crate::inventory::ItemLifecycle;
use crate::policy::ExpirationMode;
use crate::recipes::{Recommender, SourceKind, DEFAULT_RESULT_LIMIT, DEFAULT_URGENT_WINDOW_DAYS};

/// Returns `~/.config/freshkeep[-dev]/` based on FRESHKEEP_ENV.
///
/// Set FRESHKEEP_ENV=dev to use the development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FRESHKEEP_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("freshkeep-dev")
    } else {
        base_dir.join("freshkeep")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir(e.to_string()))?;
    Ok(dir)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpirationConfig {
    #[serde(default)]
    pub default_mode: ExpirationMode,
    /// Days ahead that count as "expiring soon" in listings
    #[serde(default = "default_expiring_window")]
    pub expiring_window_days: i64,
    /// Days ahead that earn the expiring bonus in recipe scoring
    #[serde(default = "default_urgent_window")]
    pub urgent_window_days: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipesConfig {
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,
    #[serde(default = "default_source")]
    pub default_source: SourceKind,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default)]
    pub default_period: Period,
}

/// Engine configuration.
///
/// Serialized to/from TOML at `~/.config/freshkeep/config.toml`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub expiration: ExpirationConfig,
    #[serde(default)]
    pub recipes: RecipesConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

fn default_expiring_window() -> i64 {
    3
}
fn default_urgent_window() -> i64 {
    DEFAULT_URGENT_WINDOW_DAYS
}
fn default_result_limit() -> usize {
    DEFAULT_RESULT_LIMIT
}
fn default_source() -> SourceKind {
    SourceKind::LocalCatalog
}

impl Default for ExpirationConfig {
    fn default() -> Self {
        Self {
            default_mode: ExpirationMode::Standard,
            expiring_window_days: default_expiring_window(),
            urgent_window_days: default_urgent_window(),
        }
    }
}

impl Default for RecipesConfig {
    fn default() -> Self {
        Self {
            result_limit: default_result_limit(),
            default_source: default_source(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => {
                    if let Ok(n) = value.parse::<i64>() {
                        serde_json::Value::Number(n.into())
                    } else if let Ok(n) = value.parse::<f64>() {
                        serde_json::Number::from_f64(n)
                            .map(serde_json::Value::Number)
                            .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                    } else {
                        return Err(invalid(format!("cannot parse '{value}' as number")));
                    }
                }
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    return Err(unknown());
                }
                _ => serde_json::Value::String(value.trim().to_lowercase()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    /// Default config file location.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Load from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, in memory only.
    ///
    /// The value is parsed according to the current value's type and the
    /// result must still deserialize (e.g. `expiration.default_mode` only
    /// accepts known modes). Call [`Config::save`] to persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value is rejected.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Every leaf key with its current value, in dot-path form.
    pub fn entries(&self) -> Vec<(String, String)> {
        fn walk(prefix: &str, value: &serde_json::Value, out: &mut Vec<(String, String)>) {
            match value {
                serde_json::Value::Object(map) => {
                    for (k, v) in map {
                        let key = if prefix.is_empty() {
                            k.clone()
                        } else {
                            format!("{prefix}.{k}")
                        };
                        walk(&key, v, out);
                    }
                }
                serde_json::Value::String(s) => out.push((prefix.to_string(), s.clone())),
                other => out.push((prefix.to_string(), other.to_string())),
            }
        }

        let mut out = Vec::new();
        if let Ok(json) = serde_json::to_value(self) {
            walk("", &json, &mut out);
        }
        out
    }

    /// Lifecycle engine using the configured expiration mode.
    pub fn lifecycle(&self) -> ItemLifecycle {
        ItemLifecycle::with_mode(self.expiration.default_mode)
    }

    pub fn recommender(&self) -> Recommender {
        Recommender::new(self.recipes.result_limit, self.expiration.urgent_window_days)
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.recipes.result_limit, 15);
        assert_eq!(parsed.expiration.urgent_window_days, 2);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config =
            toml::from_str("[expiration]\ndefault_mode = \"optimistic\"\n").unwrap();
        assert_eq!(parsed.expiration.default_mode, ExpirationMode::Optimistic);
        assert_eq!(parsed.expiration.expiring_window_days, 3);
        assert_eq!(parsed.recipes.default_source, SourceKind::LocalCatalog);
        assert_eq!(parsed.analytics.default_period, Period::Week);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("expiration.default_mode").as_deref(), Some("standard"));
        assert_eq!(cfg.get("recipes.result_limit").as_deref(), Some("15"));
        assert!(cfg.get("recipes.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_parses_by_existing_type() {
        let mut cfg = Config::default();
        cfg.set("recipes.result_limit", "5").unwrap();
        cfg.set("expiration.default_mode", "Conservative").unwrap();
        cfg.set("analytics.default_period", "month").unwrap();
        assert_eq!(cfg.recipes.result_limit, 5);
        assert_eq!(cfg.expiration.default_mode, ExpirationMode::Conservative);
        assert_eq!(cfg.analytics.default_period, Period::Month);
    }

    #[test]
    fn set_rejects_unknown_keys_and_bad_values() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("recipes.colour", "red"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(cfg.set("recipes", "x"), Err(ConfigError::UnknownKey(_))));
        assert!(matches!(
            cfg.set("recipes.result_limit", "many"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            cfg.set("expiration.default_mode", "reckless"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn entries_list_every_leaf() {
        let keys: Vec<String> = Config::default().entries().into_iter().map(|(k, _)| k).collect();
        assert!(keys.contains(&"expiration.urgent_window_days".to_string()));
        assert!(keys.contains(&"analytics.default_period".to_string()));
        assert_eq!(keys.len(), 6);
    }

    #[test]
    fn helpers_follow_settings() {
        let mut cfg = Config::default();
        cfg.set("expiration.default_mode", "optimistic").unwrap();
        cfg.set("expiration.urgent_window_days", "4").unwrap();
        cfg.set("recipes.result_limit", "7").unwrap();
        assert_eq!(cfg.lifecycle().mode(), ExpirationMode::Optimistic);
        assert_eq!(cfg.recommender(), Recommender::new(7, 4));
    }

    #[test]
    fn save_and_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.set("expiration.expiring_window_days", "5").unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.expiration.expiring_window_days, 5);
        assert!(Config::load_from(&dir.path().join("missing.toml")).is_err());
    }
}
