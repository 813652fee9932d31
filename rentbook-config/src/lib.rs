// Configuration management for the rentbook client

pub mod app;
pub mod env;
pub mod error;
pub mod loader;

pub use app::{ApiBase, AppConfig, BuildMode, is_loopback_host};
pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use url::Url;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

/// Prefix of every environment variable the client reads.
pub const ENV_PREFIX: &str = "RENTBOOK";

/// Flat key/value configuration store.
///
/// Sources are layered in call order; a later `load_*` overrides keys set by
/// an earlier one.
#[derive(Clone)]
pub struct ConfigManager {
    config: Arc<RwLock<HashMap<String, serde_json::Value>>>,
    env_prefix: Option<String>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(HashMap::new())),
            env_prefix: None,
        }
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            config: Arc::new(RwLock::new(HashMap::new())),
            env_prefix: Some(prefix.into()),
        }
    }

    /// Load prefixed variables from the process environment.
    pub fn load_env(&self) -> Result<()> {
        let loader = EnvLoader::new(self.env_prefix.clone());
        let env_vars = loader.load()?;

        let mut config = self.config.write();
        for (key, value) in env_vars {
            config.insert(key, serde_json::Value::String(value));
        }

        Ok(())
    }

    /// Load a `.env` file into the process environment, then the environment.
    ///
    /// With no explicit path a missing `.env` is not an error.
    pub fn load_dotenv(&self, path: Option<&Path>) -> Result<()> {
        match path {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
            }
            None => {
                if let Ok(found) = dotenvy::dotenv() {
                    rentbook_log::debug!("Loaded environment from {}", found.display());
                }
            }
        }
        self.load_env()
    }

    /// Merge the top-level table of a TOML or JSON file.
    pub fn load_file(&self, path: &Path) -> Result<()> {
        let loader = ConfigLoader::auto(path)?;
        let data = loader.load_file(path)?;

        let mut config = self.config.write();
        if let serde_json::Value::Object(map) = data {
            for (key, value) in map {
                config.insert(key, value);
            }
        }

        Ok(())
    }

    pub fn set<T: serde::Serialize>(&self, key: &str, value: T) -> Result<()> {
        let json_value = serde_json::to_value(value)
            .map_err(|e| ConfigError::SerializationError(e.to_string()))?;

        self.config.write().insert(key.to_string(), json_value);
        Ok(())
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let config = self.config.read();

        let value = config
            .get(key)
            .ok_or_else(|| ConfigError::KeyNotFound(key.to_string()))?;

        serde_json::from_value(value.clone())
            .map_err(|e| ConfigError::DeserializationError(format!("{}: {}", key, e)))
    }

    /// Read a typed value that may have arrived as a string (env, `.env`) or
    /// natively typed (TOML/JSON file).
    pub fn get_parsed<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: FromStr + DeserializeOwned,
        T::Err: std::fmt::Display,
    {
        let config = self.config.read();
        let Some(value) = config.get(key) else {
            return Ok(None);
        };

        match value {
            serde_json::Value::String(raw) => {
                raw.trim()
                    .parse::<T>()
                    .map(Some)
                    .map_err(|e| ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: e.to_string(),
                    })
            }
            other => serde_json::from_value(other.clone())
                .map(Some)
                .map_err(|e| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: e.to_string(),
                }),
        }
    }

    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    pub fn get_string(&self, key: &str) -> Result<String> {
        self.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.config.read().contains_key(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.config.read().keys().cloned().collect()
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let manager = ConfigManager::new();
        manager.set("listings_path", "/rooms").unwrap();

        let value: String = manager.get("listings_path").unwrap();
        assert_eq!(value, "/rooms");
    }

    #[test]
    fn test_get_or_default() {
        let manager = ConfigManager::new();
        let value: String = manager.get_or("missing_key", "default_value".to_string());
        assert_eq!(value, "default_value");
    }

    #[test]
    fn test_get_parsed_from_string_and_native() {
        let manager = ConfigManager::new();
        manager.set("timeout_secs", "45").unwrap();
        manager.set("other_timeout", 12u64).unwrap();

        assert_eq!(manager.get_parsed::<u64>("timeout_secs").unwrap(), Some(45));
        assert_eq!(manager.get_parsed::<u64>("other_timeout").unwrap(), Some(12));
        assert_eq!(manager.get_parsed::<u64>("absent").unwrap(), None);
    }

    #[test]
    fn test_get_parsed_invalid() {
        let manager = ConfigManager::new();
        manager.set("timeout_secs", "soon").unwrap();

        let err = manager.get_parsed::<u64>("timeout_secs").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "timeout_secs"));
    }

    #[test]
    fn test_later_source_overrides() {
        let manager = ConfigManager::new();
        manager.set("mode", "development").unwrap();
        manager.set("mode", "production").unwrap();

        assert_eq!(manager.get_string("mode").unwrap(), "production");
        assert!(manager.has("mode"));
        assert_eq!(manager.keys(), vec!["mode".to_string()]);
    }
}
