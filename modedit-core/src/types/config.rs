//! Session configuration
//!
//! Which notation a command list is edited in, and how a property list is
//! presented, are passed explicitly to each editing session.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Per-document editing preferences
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Notation used for menu command lists
    #[serde(default)]
    pub command_notation: CommandNotation,

    /// Presentation used for material property lists
    #[serde(default)]
    pub property_view: PropertyView,
}

/// Textual notation of a command list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandNotation {
    /// Name on its own line, one tab-indented line per parameter
    #[default]
    Indented,

    /// One `name: p1, p2` line per command
    Inline,

    /// Pretty-printed JSON array of `{ArgCount, Args}`
    Json,
}

impl CommandNotation {
    pub const ALL: [CommandNotation; 3] = [
        CommandNotation::Indented,
        CommandNotation::Inline,
        CommandNotation::Json,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandNotation::Indented => "indented",
            CommandNotation::Inline => "inline",
            CommandNotation::Json => "json",
        }
    }
}

impl fmt::Display for CommandNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandNotation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "indented" | "format1" => Ok(CommandNotation::Indented),
            "inline" | "format2" => Ok(CommandNotation::Inline),
            "json" | "format3" => Ok(CommandNotation::Json),
            other => Err(format!(
                "unknown notation '{}' (expected indented, inline or json)",
                other
            )),
        }
    }
}

/// Presentation of a property list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyView {
    /// Flat editable records, one per property
    #[default]
    Form,

    /// The property list as pretty-printed JSON
    Json,
}

impl fmt::Display for PropertyView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyView::Form => write!(f, "form"),
            PropertyView::Json => write!(f, "json"),
        }
    }
}

impl FromStr for PropertyView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "form" => Ok(PropertyView::Form),
            "json" => Ok(PropertyView::Json),
            other => Err(format!("unknown view '{}' (expected form or json)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.command_notation, CommandNotation::Indented);
        assert_eq!(config.property_view, PropertyView::Form);
    }

    #[test]
    fn test_notation_from_str() {
        assert_eq!("inline".parse::<CommandNotation>(), Ok(CommandNotation::Inline));
        assert_eq!("FORMAT3".parse::<CommandNotation>(), Ok(CommandNotation::Json));
        assert!("yaml".parse::<CommandNotation>().is_err());
        assert_eq!("json".parse::<PropertyView>(), Ok(PropertyView::Json));
    }

    #[test]
    fn test_config_serialization() {
        let config = SessionConfig {
            command_notation: CommandNotation::Json,
            property_view: PropertyView::Json,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"command_notation":"json","property_view":"json"}"#);

        let partial: SessionConfig =
            serde_json::from_str(r#"{"command_notation":"inline"}"#).unwrap();
        assert_eq!(partial.command_notation, CommandNotation::Inline);
        assert_eq!(partial.property_view, PropertyView::Form);
    }
}
