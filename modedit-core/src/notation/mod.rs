//! Textual notations for menu command lists
//!
//! Each notation is a strategy implementing [`Notation`]; the active one is
//! picked with [`CommandNotation`]:
//!
//! - [`Indented`]: command name on its own line, one tab-indented line per
//!   parameter, blank line between commands
//! - [`Inline`]: one `name: p1, p2` line per command
//! - [`Json`]: pretty-printed array of `{"ArgCount", "Args"}` objects
//!
//! Indented and inline parsing recover from anything; JSON parsing fails for
//! the whole batch on malformed input.
//!
//! Encoding limits (not bugs):
//!
//! - indented: no newlines, trailing whitespace or leading tabs inside an
//!   argument, and no empty command name. Empty parameters are kept.
//! - inline: no commas, newlines or surrounding whitespace inside an
//!   argument, and no colon in the command name. A command whose only
//!   parameter is empty reads back as a bare name (`"Foo: "`); empty
//!   parameters next to others are kept.

mod indented;
mod inline;
mod json;

pub use indented::Indented;
pub use inline::Inline;
pub use json::Json;

use crate::types::{Command, CommandNotation};

/// Errors raised while converting between commands and text
#[derive(Debug, thiserror::Error)]
pub enum NotationError {
    #[error("Failed to parse JSON commands: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSON root must be an array of commands, found {0}")]
    NotAnArray(&'static str),

    #[error("Invalid command at index {index}: {message}")]
    InvalidElement { index: usize, message: String },
}

/// A reversible text encoding of a command list
pub trait Notation {
    /// Render commands as editable text
    fn serialize(&self, commands: &[Command]) -> Result<String, NotationError>;

    /// Parse edited text back into commands
    fn parse(&self, text: &str) -> Result<Vec<Command>, NotationError>;
}

impl CommandNotation {
    /// The strategy implementing this notation
    pub fn codec(&self) -> &'static dyn Notation {
        match self {
            CommandNotation::Indented => &Indented,
            CommandNotation::Inline => &Inline,
            CommandNotation::Json => &Json,
        }
    }
}

/// Render commands in the given notation
pub fn serialize(commands: &[Command], notation: CommandNotation) -> Result<String, NotationError> {
    notation.codec().serialize(commands)
}

/// Parse text written in the given notation
pub fn parse(text: &str, notation: CommandNotation) -> Result<Vec<Command>, NotationError> {
    notation.codec().parse(text)
}
