//! File-backed load/save collaborator
//!
//! Documents are stored as JSON (`.json`) or YAML (`.yaml`, `.yml`); the
//! format is picked from the file extension. Saving a bare command or
//! property list rewrites only that part of the document on disk, keeping
//! its header fields.

use std::fs;
use std::path::Path;

use modedit_core::{
    Command, DocumentHandle, LoadService, MateDocument, MenuDocument, Property, SaveService,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Errors that can occur when reading or writing document files
#[derive(Debug, thiserror::Error)]
pub enum FileStoreError {
    #[error("Failed to access {path}: {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Unsupported document format: {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),
}

/// On-disk encoding of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, FileStoreError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "json" => Ok(DocumentFormat::Json),
            "yaml" | "yml" => Ok(DocumentFormat::Yaml),
            _ => Err(FileStoreError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Reads and writes documents on the local file system
///
/// A [`DocumentHandle`] is interpreted as a file path.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStore;

impl FileStore {
    pub fn new() -> Self {
        Self
    }

    fn read<T: DeserializeOwned>(&self, handle: &DocumentHandle) -> Result<T, FileStoreError> {
        let path = Path::new(handle.as_str());
        let format = DocumentFormat::from_path(path)?;
        let content = fs::read_to_string(path).map_err(|source| FileStoreError::IoError {
            path: handle.to_string(),
            source,
        })?;

        let value = match format {
            DocumentFormat::Json => serde_json::from_str(&content)?,
            DocumentFormat::Yaml => serde_yaml::from_str(&content)?,
        };
        Ok(value)
    }

    fn write<T: Serialize>(
        &self,
        value: &T,
        handle: &DocumentHandle,
    ) -> Result<(), FileStoreError> {
        let path = Path::new(handle.as_str());
        let content = match DocumentFormat::from_path(path)? {
            DocumentFormat::Json => serde_json::to_string_pretty(value)?,
            DocumentFormat::Yaml => serde_yaml::to_string(value)?,
        };

        fs::write(path, content).map_err(|source| FileStoreError::IoError {
            path: handle.to_string(),
            source,
        })?;
        tracing::debug!("Wrote {}", handle);
        Ok(())
    }

    /// Read the existing document, or start from an empty one
    fn read_or_default<T>(&self, handle: &DocumentHandle) -> Result<T, FileStoreError>
    where
        T: DeserializeOwned + Default,
    {
        if Path::new(handle.as_str()).exists() {
            self.read(handle)
        } else {
            Ok(T::default())
        }
    }
}

impl LoadService<MenuDocument> for FileStore {
    type Error = FileStoreError;

    fn load(&self, handle: &DocumentHandle) -> Result<MenuDocument, FileStoreError> {
        self.read(handle)
    }
}

impl SaveService<MenuDocument> for FileStore {
    type Error = FileStoreError;

    fn save(
        &self,
        model: &MenuDocument,
        destination: &DocumentHandle,
    ) -> Result<(), FileStoreError> {
        self.write(model, destination)
    }
}

impl LoadService<Vec<Command>> for FileStore {
    type Error = FileStoreError;

    fn load(&self, handle: &DocumentHandle) -> Result<Vec<Command>, FileStoreError> {
        let menu: MenuDocument = self.read(handle)?;
        Ok(menu.commands)
    }
}

impl SaveService<Vec<Command>> for FileStore {
    type Error = FileStoreError;

    fn save(
        &self,
        model: &Vec<Command>,
        destination: &DocumentHandle,
    ) -> Result<(), FileStoreError> {
        let mut menu: MenuDocument = self.read_or_default(destination)?;
        menu.commands = model.clone();
        self.write(&menu, destination)
    }
}

impl LoadService<MateDocument> for FileStore {
    type Error = FileStoreError;

    fn load(&self, handle: &DocumentHandle) -> Result<MateDocument, FileStoreError> {
        self.read(handle)
    }
}

impl SaveService<MateDocument> for FileStore {
    type Error = FileStoreError;

    fn save(
        &self,
        model: &MateDocument,
        destination: &DocumentHandle,
    ) -> Result<(), FileStoreError> {
        self.write(model, destination)
    }
}

impl LoadService<Vec<Property>> for FileStore {
    type Error = FileStoreError;

    fn load(&self, handle: &DocumentHandle) -> Result<Vec<Property>, FileStoreError> {
        let mate: MateDocument = self.read(handle)?;
        Ok(mate.material.properties)
    }
}

impl SaveService<Vec<Property>> for FileStore {
    type Error = FileStoreError;

    fn save(
        &self,
        model: &Vec<Property>,
        destination: &DocumentHandle,
    ) -> Result<(), FileStoreError> {
        let mut mate: MateDocument = self.read_or_default(destination)?;
        mate.material.properties = model.clone();
        self.write(&mate, destination)
    }
}
