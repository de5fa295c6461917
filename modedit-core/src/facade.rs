//! Editing sessions
//!
//! A session owns one canonical model (a command list or a property list)
//! plus the notation or view it is currently edited in. Rendering derives
//! editable text from the model; committing replaces the model with the
//! parse of an edit, and only when that parse succeeds.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn, Span};
use uuid::Uuid;

use crate::notation::NotationError;
use crate::persistence::{DocumentHandle, LoadService, SaveService};
use crate::property_codec::{
    from_editable_list, to_editable_list, EditableRecord, Reconstruction,
};
use crate::types::{Command, CommandNotation, Property, PropertyView, SessionConfig};

/// Identifies one open document in log output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors raised while rendering or committing an edit
#[derive(Debug, thiserror::Error)]
pub enum TranscodeError {
    #[error(transparent)]
    Notation(#[from] NotationError),

    #[error("Failed to parse property JSON: {0}")]
    PropertyJson(#[from] serde_json::Error),
}

/// Editing session over a menu command list
#[derive(Debug, Clone)]
pub struct CommandTranscoder {
    id: SessionId,
    commands: Vec<Command>,
    notation: CommandNotation,
}

impl CommandTranscoder {
    /// Empty session
    pub fn new(config: SessionConfig) -> Self {
        Self::with_commands(Vec::new(), config)
    }

    pub fn with_commands(commands: Vec<Command>, config: SessionConfig) -> Self {
        Self {
            id: SessionId::new(),
            commands,
            notation: config.command_notation,
        }
    }

    /// Open a session on a stored command list
    pub fn load<S>(
        service: &S,
        handle: &DocumentHandle,
        config: SessionConfig,
    ) -> Result<Self, S::Error>
    where
        S: LoadService<Vec<Command>>,
    {
        let commands = service.load(handle)?;
        let session = Self::with_commands(commands, config);
        debug!(session = %session.id, %handle, count = session.commands.len(), "Loaded commands");
        Ok(session)
    }

    /// Persist the current command list
    pub fn save<S>(&self, service: &S, destination: &DocumentHandle) -> Result<(), S::Error>
    where
        S: SaveService<Vec<Command>>,
    {
        service.save(&self.commands, destination)?;
        debug!(session = %self.id, %destination, count = self.commands.len(), "Saved commands");
        Ok(())
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<Command> {
        self.commands
    }

    pub fn notation(&self) -> CommandNotation {
        self.notation
    }

    /// The command list as text in the active notation
    pub fn render(&self) -> Result<String, TranscodeError> {
        let _guard = self.span().entered();
        let text = self.notation.codec().serialize(&self.commands)?;
        debug!(len = text.len(), "Rendered commands");
        Ok(text)
    }

    /// Change notation and render the unchanged model in it
    pub fn switch_notation(&mut self, notation: CommandNotation) -> Result<String, TranscodeError> {
        self.notation = notation;
        self.render()
    }

    /// Replace the model with the parse of edited text
    ///
    /// On error the previous command list is kept.
    pub fn commit(&mut self, text: &str) -> Result<&[Command], TranscodeError> {
        let _guard = self.span().entered();
        let commands = self.notation.codec().parse(text)?;

        for (index, command) in commands.iter().enumerate() {
            if command.is_empty() {
                warn!(index, "Command has no arguments");
            } else if !command.is_consistent() {
                warn!(
                    index,
                    name = command.name().unwrap_or_default(),
                    arg_count = command.arg_count,
                    args = command.args.len(),
                    "ArgCount does not match argument list"
                );
            }
        }

        debug!(count = commands.len(), "Committed commands");
        self.commands = commands;
        Ok(&self.commands)
    }

    fn span(&self) -> Span {
        tracing::debug_span!("commands", session = %self.id, notation = %self.notation)
    }
}

/// A property list as presented for editing
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyEditable {
    /// One flat record per property
    Form(Vec<EditableRecord>),
    /// The property list as JSON text
    Json(String),
}

impl PropertyEditable {
    pub fn view(&self) -> PropertyView {
        match self {
            PropertyEditable::Form(_) => PropertyView::Form,
            PropertyEditable::Json(_) => PropertyView::Json,
        }
    }
}

/// Editing session over a material property list
#[derive(Debug, Clone)]
pub struct PropertyTranscoder {
    id: SessionId,
    properties: Vec<Property>,
    view: PropertyView,
}

impl PropertyTranscoder {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_properties(Vec::new(), config)
    }

    pub fn with_properties(properties: Vec<Property>, config: SessionConfig) -> Self {
        Self {
            id: SessionId::new(),
            properties,
            view: config.property_view,
        }
    }

    /// Open a session on a stored property list
    pub fn load<S>(
        service: &S,
        handle: &DocumentHandle,
        config: SessionConfig,
    ) -> Result<Self, S::Error>
    where
        S: LoadService<Vec<Property>>,
    {
        let properties = service.load(handle)?;
        let session = Self::with_properties(properties, config);
        debug!(
            session = %session.id,
            %handle,
            count = session.properties.len(),
            "Loaded properties"
        );
        Ok(session)
    }

    /// Persist the current property list
    pub fn save<S>(&self, service: &S, destination: &DocumentHandle) -> Result<(), S::Error>
    where
        S: SaveService<Vec<Property>>,
    {
        service.save(&self.properties, destination)?;
        debug!(session = %self.id, %destination, count = self.properties.len(), "Saved properties");
        Ok(())
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn into_properties(self) -> Vec<Property> {
        self.properties
    }

    pub fn view(&self) -> PropertyView {
        self.view
    }

    /// The property list in the active view
    pub fn render(&self) -> Result<PropertyEditable, TranscodeError> {
        let _guard = self.span().entered();
        let editable = match self.view {
            PropertyView::Form => PropertyEditable::Form(to_editable_list(&self.properties)),
            PropertyView::Json => {
                PropertyEditable::Json(serde_json::to_string_pretty(&self.properties)?)
            }
        };
        debug!(count = self.properties.len(), "Rendered properties");
        Ok(editable)
    }

    /// Change view and render the unchanged model in it
    pub fn switch_view(&mut self, view: PropertyView) -> Result<PropertyEditable, TranscodeError> {
        self.view = view;
        self.render()
    }

    /// Replace the model with the reconstruction of an edit
    ///
    /// Form records that cannot be rebuilt are left out and reported in the
    /// returned [`Reconstruction`]. JSON text must parse as a whole; on error
    /// the previous property list is kept.
    pub fn commit(&mut self, edited: PropertyEditable) -> Result<Reconstruction, TranscodeError> {
        let _guard = self.span().entered();

        let reconstruction = match edited {
            PropertyEditable::Form(records) => from_editable_list(&records),
            PropertyEditable::Json(text) if text.trim().is_empty() => Reconstruction::default(),
            PropertyEditable::Json(text) => Reconstruction {
                properties: serde_json::from_str(&text)?,
                omitted: Vec::new(),
            },
        };

        debug!(
            count = reconstruction.properties.len(),
            omitted = reconstruction.omitted.len(),
            "Committed properties"
        );
        self.properties = reconstruction.properties.clone();
        Ok(reconstruction)
    }

    fn span(&self) -> Span {
        tracing::debug_span!("properties", session = %self.id, view = %self.view)
    }
}
