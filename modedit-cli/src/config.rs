//! `modedit.toml` configuration
//!
//! ```toml
//! [session]
//! command_notation = "inline"
//! property_view = "json"
//! ```

use std::fs;
use std::path::Path;

use modedit_core::SessionConfig;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "modedit.toml";

/// Errors that can occur when reading or writing the config file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Failed to serialize TOML: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),

    #[error("Config already exists at {0}")]
    AlreadyExists(String),
}

/// Editor configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Default notation and view for new sessions
    #[serde(default)]
    pub session: SessionConfig,
}

impl EditorConfig {
    /// Parse a config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: EditorConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if it exists, otherwise use defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write a config file, refusing to overwrite an existing one
    pub fn write_new<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            return Err(ConfigError::AlreadyExists(path.display().to_string()));
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modedit_core::{CommandNotation, PropertyView};
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = EditorConfig::load_or_default(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_parse_session_table() {
        let config: EditorConfig = toml::from_str(
            r#"
[session]
command_notation = "inline"
"#,
        )
        .unwrap();
        assert_eq!(config.session.command_notation, CommandNotation::Inline);
        assert_eq!(config.session.property_view, PropertyView::Form);

        let empty: EditorConfig = toml::from_str("").unwrap();
        assert_eq!(empty, EditorConfig::default());
    }

    #[test]
    fn test_bad_notation_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[session]\ncommand_notation = \"yaml\"\n").unwrap();

        let err = EditorConfig::load_or_default(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TomlError(_)));
    }

    #[test]
    fn test_write_new_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let mut config = EditorConfig::default();
        config.session.property_view = PropertyView::Json;
        config.write_new(&path).unwrap();

        assert_eq!(EditorConfig::from_file(&path).unwrap(), config);
        assert!(matches!(
            config.write_new(&path),
            Err(ConfigError::AlreadyExists(_))
        ));
    }
}
