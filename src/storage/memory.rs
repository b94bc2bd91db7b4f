//! In-memory document (for testing and demos)

use std::sync::{Mutex as StdMutex, PoisonError};
use async_trait::async_trait;
use tokio::sync::Mutex;
use crate::Result;
use crate::pokemon::Pokemon;
use super::DocumentStore;

/// Keeps the serialized document in memory, so loads and saves go through
/// the same JSON codec as the file store.
pub struct MemoryStore {
    document: StdMutex<String>,
    write_lock: Mutex<()>,
}

impl MemoryStore {
    /// Empty collection
    pub fn new() -> Self {
        Self::from_document("[]")
    }

    /// Collection seeded with `records`
    pub fn with_records(records: &[Pokemon]) -> Result<Self> {
        Ok(Self::from_document(serde_json::to_string(records)?))
    }

    /// Raw document contents, valid or not
    pub fn from_document(document: impl Into<String>) -> Self {
        Self {
            document: StdMutex::new(document.into()),
            write_lock: Mutex::new(()),
        }
    }

    /// Current document contents
    pub fn contents(&self) -> String {
        self.document
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn load_all(&self) -> Result<Vec<Pokemon>> {
        let document = self.contents();
        Ok(serde_json::from_str(&document)?)
    }

    async fn save_all(&self, records: &[Pokemon]) -> Result<()> {
        let document = serde_json::to_string(records)?;
        *self.document.lock().unwrap_or_else(PoisonError::into_inner) = document;
        Ok(())
    }

    fn write_lock(&self) -> &Mutex<()> {
        &self.write_lock
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::pokemon::fixtures;

    #[tokio::test]
    async fn test_memory_roundtrip() {
        let store = MemoryStore::with_records(&fixtures::seed()).unwrap();
        let before = store.contents();

        let records = store.load_all().await.unwrap();
        store.save_all(&records).await.unwrap();

        assert_eq!(records.len(), 5);
        assert_eq!(store.contents(), before);
    }

    #[tokio::test]
    async fn test_memory_malformed() {
        let store = MemoryStore::from_document("{");
        assert!(matches!(store.load_all().await, Err(Error::Format(_))));
    }
}
