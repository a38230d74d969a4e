use crate::model::{HistoryTable, StorageError};
use crate::storage::{DEFAULT_STORE_KEY, KeyValueStore};
use std::sync::Arc;
use tracing::debug;

/// Loads and saves the whole history table as one JSON blob under a fixed key.
pub struct PersistenceGateway<S: KeyValueStore> {
    store: Arc<S>,
    key: String,
}

impl<S: KeyValueStore> PersistenceGateway<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_key(store, DEFAULT_STORE_KEY)
    }

    pub fn with_key(store: Arc<S>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Fails with `NotFound` when the table was never written and with
    /// `Corrupt` when the blob does not decode or a key disagrees with its record's id.
    pub async fn load(&self) -> Result<HistoryTable, StorageError> {
        let blob = self
            .store
            .get(&self.key)
            .await?
            .ok_or(StorageError::NotFound)?;
        let table: HistoryTable = serde_json::from_str(&blob)?;
        if let Some((key, id)) = table.mismatched_key() {
            return Err(StorageError::Corrupt(format!(
                "entry under key {:?} holds listing {}",
                key, id
            )));
        }
        debug!("Loaded history table with {} listings", table.len());
        Ok(table)
    }

    pub async fn save(&self, table: &HistoryTable) -> Result<(), StorageError> {
        let blob = serde_json::to_string(table)
            .map_err(|e| StorageError::Unavailable(format!("serialize failed: {}", e)))?;
        self.store.set(&self.key, &blob).await?;
        debug!("Saved history table with {} listings", table.len());
        Ok(())
    }
}
