// Text rendering of merged records: trend banner and hide/show label.
use crate::engine::trend::{Trend, last_change, trend_since};
use crate::model::ListingRecord;
use chrono::{DateTime, Utc};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub id: u64,
    pub trend: Trend,
    pub change: f64,
    pub hidden: bool,
}

impl Banner {
    pub fn for_record(record: &ListingRecord, cutoff: DateTime<Utc>) -> Self {
        Self {
            id: record.id,
            trend: trend_since(record, cutoff),
            change: last_change(record),
            hidden: record.hidden,
        }
    }

    pub fn headline(&self) -> String {
        match self.trend {
            Trend::Same => "Price Unchanged".to_string(),
            Trend::Down => format!("Price Dropped by €{}", self.change.abs()),
            Trend::Up => format!("Price Increased by €{}", self.change.abs()),
        }
    }

    /// Label of the toggle control: the action it would perform.
    pub fn toggle_label(&self) -> &'static str {
        if self.hidden { "Show" } else { "Hide" }
    }
}

impl fmt::Display for Banner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} [{}]", self.id, self.headline(), self.toggle_label())
    }
}

pub fn render_all(records: &[ListingRecord], cutoff: DateTime<Utc>) -> Vec<Banner> {
    records
        .iter()
        .map(|record| Banner::for_record(record, cutoff))
        .collect()
}
