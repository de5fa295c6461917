//! Canonical model types
//!
//! Menu commands, material properties, the documents that carry them, and
//! the per-session editing configuration.

mod command;
mod config;
mod document;
mod property;

pub use command::*;
pub use config::*;
pub use document::*;
pub use property::*;
