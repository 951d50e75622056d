//! In-memory backend.

use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;

use super::{GraphSnapshot, GraphStorage};
use crate::error::StorageError;

/// Keeps the serialized document in memory.
///
/// Clones share the same document, so a test can keep one handle while the
/// engine owns another. The document is kept as JSON text so loads go through
/// the same decoding path as the file backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    document: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the backend with a raw document.
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Arc::new(Mutex::new(Some(document.into()))),
        }
    }

    /// Check if a document is stored.
    pub fn is_empty(&self) -> bool {
        self.document.lock().is_none()
    }
}

impl GraphStorage for MemoryStorage {
    fn load(&self) -> Result<Option<GraphSnapshot>, StorageError> {
        self.document
            .lock()
            .as_deref()
            .map(|json| {
                serde_json::from_str(json).map_err(|source| StorageError::Parse {
                    path: PathBuf::from("<memory>"),
                    source,
                })
            })
            .transpose()
    }

    fn save(&self, snapshot: &GraphSnapshot) -> Result<(), StorageError> {
        let json = serde_json::to_string(snapshot).map_err(StorageError::Encode)?;
        *self.document.lock() = Some(json);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.document.lock() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphStore;

    #[test]
    fn test_clones_share_document() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();

        storage
            .save(&GraphSnapshot::capture(&GraphStore::new()))
            .unwrap();

        assert!(!handle.is_empty());
        assert_eq!(handle.load().unwrap().unwrap().neurons.len(), 1);

        handle.clear().unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_seeded_garbage_fails_to_parse() {
        let storage = MemoryStorage::with_document("[1, 2");
        assert!(matches!(storage.load(), Err(StorageError::Parse { .. })));
    }
}
