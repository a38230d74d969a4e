use crate::model::{ListingRecord, PriceObservation};
use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trend {
    Up,
    Down,
    Same,
}

fn last_two(record: &ListingRecord) -> Option<(&PriceObservation, &PriceObservation)> {
    match record.history.as_slice() {
        [.., previous, latest] => Some((previous, latest)),
        _ => None,
    }
}

/// Difference between the two most recent price points; 0 when either is missing.
pub fn last_change(record: &ListingRecord) -> f64 {
    match last_two(record) {
        Some((
            PriceObservation {
                price: Some(previous),
                ..
            },
            PriceObservation {
                price: Some(latest),
                ..
            },
        )) => latest - previous,
        _ => 0.0,
    }
}

/// Direction of the last change, reported only when the point before it is
/// itself newer than `cutoff`.
///
/// A change whose preceding point is older than the cutoff reads as `Same`,
/// even if the change itself happened after the cutoff.
pub fn trend_since(record: &ListingRecord, cutoff: DateTime<Utc>) -> Trend {
    let Some((previous, latest)) = last_two(record) else {
        return Trend::Same;
    };
    if previous.timestamp <= cutoff {
        return Trend::Same;
    }
    match (previous.price, latest.price) {
        (Some(p), Some(l)) if p < l => Trend::Up,
        (Some(_), Some(_)) => Trend::Down,
        _ => Trend::Same,
    }
}

/// Start of a recency window that ends at `now`.
pub fn cutoff_before(now: DateTime<Utc>, window: Duration) -> DateTime<Utc> {
    now - window
}
