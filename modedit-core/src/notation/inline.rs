//! Inline colon/comma notation
//!
//! ```text
//! additem: dress01_wear.model, wear
//! unsetitem:
//! ```

use super::{Notation, NotationError};
use crate::types::Command;

/// One `name: p1, p2, ...` line per command
#[derive(Debug, Clone, Copy, Default)]
pub struct Inline;

impl Notation for Inline {
    fn serialize(&self, commands: &[Command]) -> Result<String, NotationError> {
        let lines: Vec<String> = commands
            .iter()
            .filter(|c| !c.is_empty())
            .map(|c| format!("{}: {}", c.args[0], c.params().join(", ")))
            .collect();

        Ok(lines.join("\n"))
    }

    fn parse(&self, text: &str) -> Result<Vec<Command>, NotationError> {
        let commands = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(parse_line)
            .collect();

        Ok(commands)
    }
}

fn parse_line(line: &str) -> Command {
    let Some((name, rest)) = line.split_once(':') else {
        return Command::new([line]);
    };

    let mut args = vec![name.trim().to_string()];
    let rest = rest.trim();
    if !rest.is_empty() {
        args.extend(rest.split(',').map(|piece| piece.trim().to_string()));
    }

    Command::new(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_layout() {
        let commands = vec![Command::new(["Foo", "a", "b"]), Command::new(["Bar"])];
        assert_eq!(Inline.serialize(&commands).unwrap(), "Foo: a, b\nBar: ");
    }

    #[test]
    fn test_round_trip() {
        let commands = vec![Command::new(["Foo", "a", "b"])];
        let text = Inline.serialize(&commands).unwrap();
        assert_eq!(text, "Foo: a, b");
        assert_eq!(Inline.parse(&text).unwrap(), commands);
    }

    #[test]
    fn test_line_without_colon() {
        let parsed = Inline.parse("JustAName").unwrap();
        assert_eq!(parsed, vec![Command::new(["JustAName"])]);
    }

    #[test]
    fn test_only_first_colon_splits() {
        let parsed = Inline.parse("url: http://x, y").unwrap();
        assert_eq!(parsed, vec![Command::new(["url", "http://x", "y"])]);
    }

    #[test]
    fn test_whitespace_and_empty_pieces() {
        let parsed = Inline.parse("  Foo  :  a ,, b  \n\n   \nBar:").unwrap();
        assert_eq!(
            parsed,
            vec![Command::new(["Foo", "a", "", "b"]), Command::new(["Bar"])]
        );
    }

    #[test]
    fn test_empty_parameters() {
        let commands = vec![Command::new(["Foo", "", "b"]), Command::new(["Bar", "a", ""])];
        let text = Inline.serialize(&commands).unwrap();
        assert_eq!(text, "Foo: , b\nBar: a, ");
        assert_eq!(Inline.parse(&text).unwrap(), commands);

        // A lone empty parameter is indistinguishable from a bare name
        let text = Inline.serialize(&[Command::new(["Foo", ""])]).unwrap();
        assert_eq!(text, "Foo: ");
        assert_eq!(Inline.parse(&text).unwrap(), vec![Command::new(["Foo"])]);
    }

    #[test]
    fn test_empty_commands_skipped() {
        let commands = vec![Command::new(Vec::<String>::new()), Command::new(["x", "1"])];
        assert_eq!(Inline.serialize(&commands).unwrap(), "x: 1");
    }
}
