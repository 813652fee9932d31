// Configuration file loaders

use crate::{ConfigError, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            _ => None,
        }
    }
}

/// Reads a config file into a flat JSON object.
pub struct ConfigLoader {
    format: FileFormat,
}

impl ConfigLoader {
    pub fn new(format: FileFormat) -> Self {
        Self { format }
    }

    /// Pick the format from the file extension.
    pub fn auto(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ConfigError::LoadError("No file extension found".to_string()))?;

        let format = FileFormat::from_extension(ext)
            .ok_or_else(|| ConfigError::LoadError(format!("Unsupported format: {}", ext)))?;

        Ok(Self::new(format))
    }

    pub fn load_file(&self, path: &Path) -> Result<Value> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::LoadError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        self.parse(&content)
    }

    pub fn parse(&self, content: &str) -> Result<Value> {
        let value = match self.format {
            FileFormat::Json => serde_json::from_str(content)
                .map_err(|e| ConfigError::ParseError(format!("JSON parse error: {}", e)))?,
            FileFormat::Toml => {
                let toml_value: toml::Value = toml::from_str(content)
                    .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))?;
                serde_json::to_value(toml_value)
                    .map_err(|e| ConfigError::SerializationError(e.to_string()))?
            }
        };

        if !value.is_object() {
            return Err(ConfigError::ParseError(
                "top level of a config file must be a table".to_string(),
            ));
        }

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml() {
        let loader = ConfigLoader::new(FileFormat::Toml);
        let value = loader
            .parse("mode = \"production\"\ntimeout_secs = 15\n")
            .unwrap();

        assert_eq!(value["mode"], "production");
        assert_eq!(value["timeout_secs"], 15);
    }

    #[test]
    fn test_parse_json() {
        let loader = ConfigLoader::new(FileFormat::Json);
        let value = loader.parse(r#"{"api_url": "https://api.example.com"}"#).unwrap();
        assert_eq!(value["api_url"], "https://api.example.com");
    }

    #[test]
    fn test_rejects_non_table() {
        let loader = ConfigLoader::new(FileFormat::Json);
        assert!(loader.parse("[1, 2]").is_err());
    }

    #[test]
    fn test_auto_detects_extension() {
        assert!(ConfigLoader::auto(Path::new("rentbook.toml")).is_ok());
        assert!(ConfigLoader::auto(Path::new("rentbook.yaml")).is_err());
        assert!(ConfigLoader::auto(Path::new("rentbook")).is_err());
    }
}
