//! JSON file storage implementation

use std::path::{Path, PathBuf};
use async_trait::async_trait;
use tokio::sync::Mutex;
use crate::{Error, Result};
use crate::pokemon::Pokemon;
use super::DocumentStore;

/// JSON-file-backed storage for the collection
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open an existing document (fails if it doesn't exist)
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        tokio::fs::metadata(&path)
            .await
            .map_err(|e| Error::io(&path, e))?;

        Ok(Self::at(path))
    }

    /// Open a document, creating an empty collection if none exists
    pub async fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| Error::io(parent, e))?;
            }
        }

        let store = Self::at(path);
        if tokio::fs::metadata(&store.path).await.is_err() {
            tracing::info!("Creating empty document at {}", store.path.display());
            store.save_all(&[]).await?;
        }
        Ok(store)
    }

    fn at(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the document on disk
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file the next save is staged in before the rename
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn load_all(&self) -> Result<Vec<Pokemon>> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| Error::io(&self.path, e))?;
        let records: Vec<Pokemon> = serde_json::from_slice(&bytes)?;

        tracing::debug!("Loaded {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    async fn save_all(&self, records: &[Pokemon]) -> Result<()> {
        let mut contents = serde_json::to_vec_pretty(records)?;
        contents.push(b'\n');

        // Readers see either the old or the new document, never a torn one
        let staging = self.staging_path();
        tokio::fs::write(&staging, &contents)
            .await
            .map_err(|e| Error::io(&staging, e))?;
        if let Err(e) = tokio::fs::rename(&staging, &self.path).await {
            if let Err(cleanup) = tokio::fs::remove_file(&staging).await {
                tracing::warn!("Failed to remove {}: {}", staging.display(), cleanup);
            }
            return Err(Error::io(&self.path, e));
        }

        tracing::debug!("Saved {} records to {}", records.len(), self.path.display());
        Ok(())
    }

    fn write_lock(&self) -> &Mutex<()> {
        &self.write_lock
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pokemon::fixtures;

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::create(dir.path().join("pokedex.json")).await.unwrap();

        assert!(store.load_all().await.unwrap().is_empty());

        let seed = fixtures::seed();
        store.save_all(&seed).await.unwrap();

        let loaded = store.load_all().await.unwrap();
        assert_eq!(loaded, seed);
        assert!(!store.staging_path().exists());
    }

    #[tokio::test]
    async fn test_create_makes_parent_dirs_and_keeps_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("pokedex.json");

        let store = JsonFileStore::create(&path).await.unwrap();
        store.save_all(&fixtures::seed()).await.unwrap();

        let reopened = JsonFileStore::create(&path).await.unwrap();
        assert_eq!(reopened.load_all().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_open_missing_document_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = JsonFileStore::open(dir.path().join("missing.json")).await;

        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[tokio::test]
    async fn test_malformed_document_is_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pokedex.json");
        std::fs::write(&path, r#"[{"id": 1, "name": "no"}]"#).unwrap();

        let store = JsonFileStore::open(&path).await.unwrap();
        assert!(matches!(store.load_all().await, Err(Error::Format(_))));

        std::fs::write(&path, "not json at all").unwrap();
        assert!(matches!(store.load_all().await, Err(Error::Format(_))));
    }

    #[tokio::test]
    async fn test_failed_rename_removes_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pokedex.json");
        // A non-empty directory at the document path makes the rename fail
        std::fs::create_dir_all(path.join("occupied")).unwrap();

        let store = JsonFileStore::at(path.clone());
        let result = store.save_all(&fixtures::seed()).await;

        assert!(matches!(result, Err(Error::Io { .. })));
        assert!(!store.staging_path().exists());
        assert!(path.join("occupied").is_dir());
    }

    #[tokio::test]
    async fn test_save_into_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::at(dir.path().join("gone").join("pokedex.json"));

        let result = store.save_all(&fixtures::seed()).await;
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[tokio::test]
    async fn test_roundtrip_preserves_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pokedex.json");
        let original = r#"[{"type":["Grass","Poison"],"id":1,"base":{"Speed":45,"HP":45,"Attack":49,"Defense":49,"SpAttack":65,"SpDefense":65},"name":{"french":"Bulbizarre","english":"Bulbasaur","japanese":"フシギダネ","chinese":"妙蛙种子"}}]"#;
        std::fs::write(&path, original).unwrap();

        let store = JsonFileStore::open(&path).await.unwrap();
        let records = store.load_all().await.unwrap();
        store.save_all(&records).await.unwrap();

        let before: serde_json::Value = serde_json::from_str(original).unwrap();
        let after: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(before, after);
    }
}
