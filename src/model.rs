// Core structs: ListingSnapshot, ListingRecord, HistoryTable and the error enums
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// A listing entry as it comes out of the page parser, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawListing {
    pub id: Option<String>,
    pub price: Option<String>,
    pub address: Option<String>,
}

/// One listing as observed in a single scraping pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingSnapshot {
    pub id: u64,
    pub price: Option<f64>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    #[serde(rename = "date")]
    pub timestamp: DateTime<Utc>,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub id: u64,
    #[serde(rename = "seen")]
    pub first_seen: DateTime<Utc>,
    pub address: Option<String>,
    #[serde(default)]
    pub hidden: bool,
    /// Distinct price points, oldest first.
    #[serde(rename = "prices", default)]
    pub history: Vec<PriceObservation>,
}

impl ListingRecord {
    /// Record for a listing seen for the first time at `now`.
    pub fn first_observation(snapshot: &ListingSnapshot, now: DateTime<Utc>) -> Self {
        Self {
            id: snapshot.id,
            first_seen: now,
            address: snapshot.address.clone(),
            hidden: false,
            history: vec![PriceObservation {
                timestamp: now,
                price: snapshot.price,
            }],
        }
    }

    pub fn latest_price(&self) -> Option<f64> {
        self.history.last().and_then(|o| o.price)
    }
}

/// The whole persisted state: stringified listing id -> record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryTable(BTreeMap<String, ListingRecord>);

impl HistoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_for(id: u64) -> String {
        id.to_string()
    }

    pub fn get(&self, id: u64) -> Option<&ListingRecord> {
        self.0.get(&Self::key_for(id))
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut ListingRecord> {
        self.0.get_mut(&Self::key_for(id))
    }

    /// Stores `record` under its own id, replacing any previous entry.
    pub fn upsert(&mut self, record: ListingRecord) {
        self.0.insert(Self::key_for(record.id), record);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &ListingRecord> {
        self.0.values()
    }

    /// First entry whose key is not its record's own id, as `(key, id)`.
    pub fn mismatched_key(&self) -> Option<(&str, u64)> {
        self.0
            .iter()
            .find(|(key, record)| **key != Self::key_for(record.id))
            .map(|(key, record)| (key.as_str(), record.id))
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("history table not found")]
    NotFound,
    #[error("history table is corrupt: {0}")]
    Corrupt(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        StorageError::Unavailable(e.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Corrupt(e.to_string())
    }
}

/// Reasons a raw entry is rejected before it reaches the merge.
#[derive(Debug, Error, PartialEq)]
pub enum NormalizeError {
    #[error("missing or invalid listing id: {0:?}")]
    MissingId(String),
    #[error("non-numeric price {price:?} for listing {id}")]
    NonNumericPrice { id: u64, price: String },
}

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("http error: {0}")]
    Http(String),
    #[error("unexpected response status {0}")]
    InvalidResponse(u16),
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("invalid selector: {0}")]
    Selector(String),
}
