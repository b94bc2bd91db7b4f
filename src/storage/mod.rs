//! Storage Layer - whole-document persistence
//!
//! The system of record is a single JSON document holding the entire
//! collection as an array of pokemon objects. There is no partial access:
//! callers load everything and save everything.
//!
//! Writers serialize on [`DocumentStore::write_lock`]; readers never take it.

pub mod json;
pub mod memory;

pub use json::JsonFileStore;
pub use memory::MemoryStore;

use crate::Result;
use crate::pokemon::Pokemon;
use async_trait::async_trait;
use tokio::sync::Mutex;

/// A document holding the full pokemon collection
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Deserialize the full document
    async fn load_all(&self) -> Result<Vec<Pokemon>>;

    /// Serialize and overwrite the full document
    async fn save_all(&self, records: &[Pokemon]) -> Result<()>;

    /// Single-writer serialization point. Held by mutations from load to save.
    fn write_lock(&self) -> &Mutex<()>;

    /// Human-readable location of the document
    fn location(&self) -> String;
}
