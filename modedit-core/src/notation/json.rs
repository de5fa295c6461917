//! JSON notation
//!
//! The command list as a pretty-printed array of `{"ArgCount", "Args"}`
//! objects. Unlike the line notations, a malformed document fails the whole
//! parse; nothing is salvaged.

use serde::Deserialize;
use serde_json::Value;

use super::{Notation, NotationError};
use crate::types::Command;

/// Pretty-printed JSON array of commands
#[derive(Debug, Clone, Copy, Default)]
pub struct Json;

/// A command as written by hand: both fields optional
#[derive(Debug, Deserialize)]
struct CommandElement {
    #[serde(rename = "ArgCount", default)]
    arg_count: Option<usize>,

    #[serde(rename = "Args", default)]
    args: Option<Vec<String>>,
}

impl Notation for Json {
    fn serialize(&self, commands: &[Command]) -> Result<String, NotationError> {
        Ok(serde_json::to_string_pretty(commands)?)
    }

    fn parse(&self, text: &str) -> Result<Vec<Command>, NotationError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let items = match serde_json::from_str::<Value>(text)? {
            Value::Array(items) => items,
            other => return Err(NotationError::NotAnArray(json_kind(&other))),
        };

        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| parse_element(index, item))
            .collect()
    }
}

fn parse_element(index: usize, item: Value) -> Result<Command, NotationError> {
    if !item.is_object() {
        return Err(NotationError::InvalidElement {
            index,
            message: format!("expected an object, found {}", json_kind(&item)),
        });
    }

    let element: CommandElement =
        serde_json::from_value(item).map_err(|e| NotationError::InvalidElement {
            index,
            message: e.to_string(),
        })?;

    let args = element.args.unwrap_or_default();
    Ok(Command {
        arg_count: element.arg_count.unwrap_or(args.len()),
        args,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_shape() {
        let text = Json.serialize(&[Command::new(["Foo", "a"])]).unwrap();
        assert_eq!(
            text,
            "[\n  {\n    \"ArgCount\": 2,\n    \"Args\": [\n      \"Foo\",\n      \"a\"\n    ]\n  }\n]"
        );
    }

    #[test]
    fn test_round_trip() {
        let commands = vec![Command::new(["a, b: c", "\tx\ny"]), Command::new(["z"])];
        let text = Json.serialize(&commands).unwrap();
        assert_eq!(Json.parse(&text).unwrap(), commands);
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let parsed = Json
            .parse(r#"[{"Args": ["Foo", "Bar"]}, {"ArgCount": 3}, {}]"#)
            .unwrap();
        assert_eq!(parsed[0], Command::new(["Foo", "Bar"]));
        assert_eq!(parsed[1].arg_count, 3);
        assert!(parsed[1].args.is_empty());
        assert_eq!(parsed[2].arg_count, 0);
    }

    #[test]
    fn test_explicit_count_kept() {
        let parsed = Json.parse(r#"[{"ArgCount": 5, "Args": ["Foo"]}]"#).unwrap();
        assert_eq!(parsed[0].arg_count, 5);
        assert!(!parsed[0].is_consistent());
    }

    #[test]
    fn test_blank_text_is_empty_list() {
        assert!(Json.parse("  \n ").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_document_is_fatal() {
        let err = Json.parse("{not a list}").unwrap_err();
        assert!(matches!(err, NotationError::Json(_)));
    }

    #[test]
    fn test_non_array_root_is_fatal() {
        let err = Json.parse(r#"{"Args": ["Foo"]}"#).unwrap_err();
        assert!(matches!(err, NotationError::NotAnArray("an object")));
    }

    #[test]
    fn test_bad_element_is_fatal() {
        let err = Json
            .parse(r#"[{"Args": ["ok"]}, {"Args": [1, 2]}]"#)
            .unwrap_err();
        assert!(matches!(err, NotationError::InvalidElement { index: 1, .. }));

        let err = Json.parse(r#"[{"Args": ["ok"]}, 42]"#).unwrap_err();
        assert!(matches!(err, NotationError::InvalidElement { index: 1, .. }));
    }
}
