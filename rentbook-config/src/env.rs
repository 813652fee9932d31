// Environment variable loading

use crate::{ConfigError, Result};
use std::collections::HashMap;
use std::env;

/// Reads `PREFIX_*` variables into lower-case config keys.
///
/// With prefix `RENTBOOK`, `RENTBOOK_API_URL` becomes `api_url`.
pub struct EnvLoader {
    prefix: Option<String>,
}

impl EnvLoader {
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    /// Collect every matching variable.
    pub fn load(&self) -> Result<HashMap<String, String>> {
        Ok(self.collect(env::vars()))
    }

    fn collect(&self, vars: impl Iterator<Item = (String, String)>) -> HashMap<String, String> {
        let mut config = HashMap::new();

        for (key, value) in vars {
            match &self.prefix {
                Some(prefix) => {
                    if let Some(rest) = key.strip_prefix(prefix.as_str())
                        && let Some(rest) = rest.strip_prefix('_')
                        && !rest.is_empty()
                    {
                        config.insert(rest.to_lowercase(), value);
                    }
                }
                None => {
                    config.insert(key.to_lowercase(), value);
                }
            }
        }

        config
    }

    /// Load one variable by its unprefixed name.
    pub fn load_var(&self, key: &str) -> Result<String> {
        let full_key = match &self.prefix {
            Some(prefix) => format!("{}_{}", prefix, key.to_uppercase()),
            None => key.to_uppercase(),
        };

        env::var(&full_key).map_err(ConfigError::EnvError)
    }

    pub fn load_var_or(&self, key: &str, default: &str) -> String {
        self.load_var(key).unwrap_or_else(|_| default.to_string())
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(Some(crate::ENV_PREFIX.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Iterator<Item = (String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn test_prefix_is_stripped_and_lowercased() {
        let loader = EnvLoader::new(Some("RENTBOOK".to_string()));
        let config = loader.collect(vars(&[
            ("RENTBOOK_API_URL", "https://api.example.com"),
            ("RENTBOOK_MODE", "production"),
            ("PATH", "/usr/bin"),
        ]));

        assert_eq!(config.len(), 2);
        assert_eq!(config["api_url"], "https://api.example.com");
        assert_eq!(config["mode"], "production");
    }

    #[test]
    fn test_prefix_requires_separator() {
        let loader = EnvLoader::new(Some("RENTBOOK".to_string()));
        let config = loader.collect(vars(&[("RENTBOOKX", "1"), ("RENTBOOK_", "2")]));
        assert!(config.is_empty());
    }

    #[test]
    fn test_load_var_or_default() {
        let loader = EnvLoader::new(Some("RENTBOOK_TEST_NOPE".to_string()));
        assert_eq!(loader.load_var_or("MISSING_12345", "fallback"), "fallback");
        assert!(loader.load_var("MISSING_12345").is_err());
    }
}
