//! ModEdit Core Library
//!
//! This crate provides the transcoding layer behind the ModEdit asset editor:
//! - Menu command and material property types
//! - Best-effort numeric coercion for form input
//! - Property <-> editable record conversion
//! - Command list notations (indented, inline, JSON)
//! - Editing sessions with pluggable load/save collaborators

pub mod coerce;
pub mod facade;
pub mod notation;
pub mod persistence;
pub mod property_codec;
pub mod types;

// Re-export commonly used types
pub use coerce::{coerce, coerce_str, RawNumber};
pub use facade::{
    CommandTranscoder, PropertyEditable, PropertyTranscoder, SessionId, TranscodeError,
};
pub use notation::{Indented, Inline, Json, Notation, NotationError};
pub use persistence::{DocumentHandle, LoadService, MemoryStore, SaveService, StoreError};
pub use property_codec::{
    from_editable, from_editable_list, to_editable, to_editable_list, EditableKeyword,
    EditableRecord, OmitReason, OmittedEntry, Reconstruction,
};
pub use types::{
    tags, Command, CommandNotation, MateDocument, Material, MenuDocument, Property, PropertyView,
    SessionConfig,
};
