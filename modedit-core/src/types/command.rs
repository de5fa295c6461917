//! Menu command model
//!
//! A `.menu` body is an ordered list of free-form commands. The first argument
//! is conventionally the command name; the rest are positional parameters.
//! No arity schema is applied.

use serde::{Deserialize, Serialize};

/// A single menu command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Argument count as stored next to the argument list
    #[serde(rename = "ArgCount")]
    pub arg_count: usize,

    /// Command name followed by its parameters
    #[serde(rename = "Args")]
    pub args: Vec<String>,
}

impl Command {
    /// Create a command whose count matches its arguments
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        Self {
            arg_count: args.len(),
            args,
        }
    }

    /// The command name (`args[0]`), if any
    pub fn name(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    /// Positional parameters after the name
    pub fn params(&self) -> &[String] {
        self.args.get(1..).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Whether the stored count agrees with the argument list
    pub fn is_consistent(&self) -> bool {
        self.arg_count == self.args.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_derives_count() {
        let cmd = Command::new(["SetTex", "diffuse", "body01"]);
        assert_eq!(cmd.arg_count, 3);
        assert_eq!(cmd.name(), Some("SetTex"));
        assert_eq!(cmd.params(), &["diffuse".to_string(), "body01".to_string()]);
        assert!(cmd.is_consistent());
    }

    #[test]
    fn test_empty_command() {
        let cmd = Command::new(Vec::<String>::new());
        assert!(cmd.is_empty());
        assert_eq!(cmd.name(), None);
        assert!(cmd.params().is_empty());
    }

    #[test]
    fn test_json_field_names() {
        let cmd = Command::new(["category", "wear"]);
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["ArgCount"], 2);
        assert_eq!(json["Args"][1], "wear");
    }
}
