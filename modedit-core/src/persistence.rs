//! Load/save collaborators
//!
//! The transcoding core never touches storage. A host supplies a
//! [`LoadService`] and a [`SaveService`] for the model it edits; their errors
//! reach the caller unchanged.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

/// Opaque reference to a stored document (a path, a key, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentHandle(String);

impl DocumentHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentHandle {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for DocumentHandle {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&Path> for DocumentHandle {
    fn from(path: &Path) -> Self {
        Self(path.to_string_lossy().replace('\\', "/"))
    }
}

/// Supplies a canonical model for a document handle
pub trait LoadService<M> {
    type Error: std::error::Error + Send + Sync + 'static;

    fn load(&self, handle: &DocumentHandle) -> Result<M, Self::Error>;
}

/// Persists a canonical model under a destination handle
pub trait SaveService<M> {
    type Error: std::error::Error + Send + Sync + 'static;

    fn save(&self, model: &M, destination: &DocumentHandle) -> Result<(), Self::Error>;
}

/// Errors from [`MemoryStore`]
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Document not found: {0}")]
    NotFound(DocumentHandle),

    #[error("Document store lock poisoned")]
    Poisoned,
}

/// In-memory document store
#[derive(Debug)]
pub struct MemoryStore<M> {
    documents: RwLock<HashMap<DocumentHandle, M>>,
}

impl<M> Default for MemoryStore<M> {
    fn default() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
        }
    }
}

impl<M: Clone> MemoryStore<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a document, replacing any previous one under the same handle
    pub fn insert(&self, handle: impl Into<DocumentHandle>, model: M) -> Result<(), StoreError> {
        let mut documents = self.documents.write().map_err(|_| StoreError::Poisoned)?;
        documents.insert(handle.into(), model);
        Ok(())
    }

    /// Snapshot of a stored document, `None` if nothing is stored under `handle`
    pub fn get(&self, handle: &DocumentHandle) -> Result<Option<M>, StoreError> {
        let documents = self.documents.read().map_err(|_| StoreError::Poisoned)?;
        Ok(documents.get(handle).cloned())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let documents = self.documents.read().map_err(|_| StoreError::Poisoned)?;
        Ok(documents.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl<M: Clone> LoadService<M> for MemoryStore<M> {
    type Error = StoreError;

    fn load(&self, handle: &DocumentHandle) -> Result<M, StoreError> {
        let documents = self.documents.read().map_err(|_| StoreError::Poisoned)?;
        documents
            .get(handle)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(handle.clone()))
    }
}

impl<M: Clone> SaveService<M> for MemoryStore<M> {
    type Error = StoreError;

    fn save(&self, model: &M, destination: &DocumentHandle) -> Result<(), StoreError> {
        self.insert(destination.clone(), model.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Command;
    use std::path::PathBuf;
    use std::sync::Arc;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        let handle = DocumentHandle::from("dress.menu");
        let commands = vec![Command::new(["name", "Dress"])];

        store.save(&commands, &handle).unwrap();
        assert_eq!(store.len().unwrap(), 1);
        assert_eq!(store.load(&handle).unwrap(), commands);
    }

    #[test]
    fn test_missing_document() {
        let store: MemoryStore<Vec<Command>> = MemoryStore::new();
        let err = store.load(&DocumentHandle::from("nope.menu")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(h) if h.as_str() == "nope.menu"));
        assert!(store.is_empty().unwrap());
        assert_eq!(store.get(&DocumentHandle::from("nope.menu")).unwrap(), None);
    }

    #[test]
    fn test_poisoned_lock_is_reported() {
        let store = Arc::new(MemoryStore::new());
        let handle = DocumentHandle::from("dress.menu");
        store.insert(handle.clone(), vec![Command::new(["name"])]).unwrap();

        let poisoner = Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.documents.write().unwrap();
            panic!("poison the store");
        })
        .join();

        assert!(matches!(store.get(&handle), Err(StoreError::Poisoned)));
        assert!(matches!(store.len(), Err(StoreError::Poisoned)));
        assert!(matches!(store.load(&handle), Err(StoreError::Poisoned)));
        assert!(matches!(
            store.insert(handle, Vec::new()),
            Err(StoreError::Poisoned)
        ));
    }

    #[test]
    fn test_handle_from_path_uses_forward_slashes() {
        let path = PathBuf::from("mods").join("dress.menu");
        let handle = DocumentHandle::from(path.as_path());
        assert!(!handle.as_str().contains('\\'));
        assert!(handle.as_str().ends_with("dress.menu"));
    }
}
