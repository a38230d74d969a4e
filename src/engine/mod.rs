// Engine module: history merge, trend derivation and the store-backed tracker.

pub mod merge;
pub mod tracker;
pub mod trend;

pub use merge::{Merged, fresh_table, merge};
pub use tracker::{MergeOutcome, PriceTracker};
pub use trend::{Trend, cutoff_before, last_change, trend_since};
