//! Price history tracking for listings seen repeatedly on a search page.
//!
//! Snapshots go through [`normalizer`], are reconciled against the stored
//! history by [`engine::PriceTracker`], and are rendered by [`presenter`].

pub mod config;
pub mod engine;
pub mod fetcher;
pub mod model;
pub mod normalizer;
pub mod parser;
pub mod presenter;
pub mod storage;
pub mod utils;
