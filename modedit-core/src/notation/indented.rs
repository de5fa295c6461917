//! Tab-indented block notation
//!
//! ```text
//! SetTex
//! 	diffuse
//! 	body01
//!
//! SetColor
//! ```
//!
//! Parsing strips every leading tab from a parameter line, while rendering
//! always emits exactly one. Manually re-indented text is accepted as is.
//! A line holding only a tab is an empty parameter, not a separator.

use super::{Notation, NotationError};
use crate::types::Command;

/// Name line followed by tab-indented parameter lines
#[derive(Debug, Clone, Copy, Default)]
pub struct Indented;

impl Notation for Indented {
    fn serialize(&self, commands: &[Command]) -> Result<String, NotationError> {
        let blocks: Vec<String> = commands
            .iter()
            .filter(|c| !c.is_empty())
            .map(|command| {
                let mut block = command.args[0].clone();
                for param in command.params() {
                    block.push_str("\n\t");
                    block.push_str(param);
                }
                block
            })
            .collect();

        Ok(blocks.join("\n\n"))
    }

    fn parse(&self, text: &str) -> Result<Vec<Command>, NotationError> {
        let mut commands = Vec::new();
        let mut current: Vec<String> = Vec::new();

        for line in text.lines() {
            // A tab line is a parameter even when nothing follows the tab
            if let Some(param) = line.strip_prefix('\t') {
                let param = param.trim_start_matches('\t').trim_end();
                if !(current.is_empty() && param.is_empty()) {
                    current.push(param.to_string());
                }
                continue;
            }

            let line = line.trim_end();
            commit(&mut commands, &mut current);
            if !line.is_empty() {
                current.push(line.to_string());
            }
        }
        commit(&mut commands, &mut current);

        Ok(commands)
    }
}

fn commit(commands: &mut Vec<Command>, current: &mut Vec<String>) {
    if !current.is_empty() {
        commands.push(Command::new(std::mem::take(current)));
    }
}
