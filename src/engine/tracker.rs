use crate::engine::merge::{Merged, fresh_table, merge};
use crate::model::{HistoryTable, ListingRecord, ListingSnapshot, StorageError};
use crate::storage::{KeyValueStore, PersistenceGateway};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{info, warn};

/// Merged records for one snapshot plus the outcome of writing them back.
#[derive(Debug)]
pub struct MergeOutcome {
    pub records: Vec<ListingRecord>,
    /// `Err` when the save failed; the records above are then not persisted.
    pub persisted: Result<(), StorageError>,
}

/// Runs load -> merge -> save against a persistence gateway.
///
/// Without a lock, overlapping calls race and the last save wins. Install one
/// with [`PriceTracker::serialized`] to make each call atomic with respect to
/// others sharing the same lock.
pub struct PriceTracker<S: KeyValueStore> {
    gateway: PersistenceGateway<S>,
    lock: Option<Arc<Mutex<()>>>,
}

impl<S: KeyValueStore> PriceTracker<S> {
    pub fn new(gateway: PersistenceGateway<S>) -> Self {
        Self {
            gateway,
            lock: None,
        }
    }

    pub fn serialized(mut self, lock: Arc<Mutex<()>>) -> Self {
        self.lock = Some(lock);
        self
    }

    async fn guard(&self) -> Option<MutexGuard<'_, ()>> {
        match &self.lock {
            Some(lock) => Some(lock.lock().await),
            None => None,
        }
    }

    pub async fn merge(&self, snapshot: &[ListingSnapshot], now: DateTime<Utc>) -> MergeOutcome {
        let _guard = self.guard().await;

        let Merged { table, records } = match self.gateway.load().await {
            Ok(table) => merge(table, snapshot, now),
            Err(StorageError::NotFound) => {
                info!("No stored history yet, starting a new table");
                fresh_table(snapshot, now)
            }
            Err(e) => {
                warn!("Could not load stored history, discarding it: {}", e);
                fresh_table(snapshot, now)
            }
        };

        let persisted = self.gateway.save(&table).await;
        match &persisted {
            Ok(()) => info!(
                "Merged {} listings ({} stored in total)",
                records.len(),
                table.len()
            ),
            Err(e) => warn!("Merged {} listings but could not save: {}", records.len(), e),
        }

        MergeOutcome { records, persisted }
    }

    /// Sets the hidden flag of one stored listing.
    ///
    /// Returns `Ok(false)` without writing when the table or the listing does not exist.
    pub async fn set_hidden(&self, id: u64, hidden: bool) -> Result<bool, StorageError> {
        let _guard = self.guard().await;

        let mut table = match self.gateway.load().await {
            Ok(table) => table,
            Err(StorageError::NotFound) => return Ok(false),
            Err(e) => return Err(e),
        };

        let Some(record) = table.get_mut(id) else {
            info!("Listing {} is not stored, nothing to toggle", id);
            return Ok(false);
        };
        record.hidden = hidden;

        self.gateway.save(&table).await?;
        info!("Listing {} hidden={}", id, hidden);
        Ok(true)
    }

    /// Current stored table; empty when nothing was stored yet.
    pub async fn records(&self) -> Result<HistoryTable, StorageError> {
        match self.gateway.load().await {
            Err(StorageError::NotFound) => Ok(HistoryTable::new()),
            other => other,
        }
    }
}
