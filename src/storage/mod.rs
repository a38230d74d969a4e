// Storage layer: the key-value seam, its backends and the history table gateway.

pub mod gateway;
pub mod memory;
pub mod sqlite;

pub use gateway::PersistenceGateway;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::model::StorageError;

/// Key under which the whole history table is stored.
pub const DEFAULT_STORE_KEY: &str = "properties";

/// Asynchronous string key-value store holding serialized blobs.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
