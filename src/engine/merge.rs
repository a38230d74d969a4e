use crate::model::{HistoryTable, ListingRecord, ListingSnapshot, PriceObservation};
use chrono::{DateTime, Utc};

/// Result of reconciling one snapshot against a table.
#[derive(Debug, Clone, PartialEq)]
pub struct Merged {
    pub table: HistoryTable,
    /// One record per snapshot entry, in snapshot order.
    pub records: Vec<ListingRecord>,
}

/// Reconciles `snapshot` against `table`.
///
/// New ids get a fresh record. Known ids get their address refreshed and the
/// observation appended, after which consecutive equal prices are collapsed.
/// Ids absent from the snapshot are left as they are. An appended observation
/// is never stamped earlier than the record's latest one, so a clock that steps
/// back keeps the history in time order.
pub fn merge(mut table: HistoryTable, snapshot: &[ListingSnapshot], now: DateTime<Utc>) -> Merged {
    let mut records = Vec::with_capacity(snapshot.len());

    for entry in snapshot {
        let record = match table.get_mut(entry.id) {
            Some(existing) => {
                existing.address = entry.address.clone();
                let timestamp = match existing.history.last() {
                    Some(last) if last.timestamp > now => last.timestamp,
                    _ => now,
                };
                existing.history.push(PriceObservation {
                    timestamp,
                    price: entry.price,
                });
                suppress_consecutive_duplicates(&mut existing.history);
                existing.clone()
            }
            None => {
                let created = ListingRecord::first_observation(entry, now);
                table.upsert(created.clone());
                created
            }
        };
        records.push(record);
    }

    Merged { table, records }
}

/// Builds a table holding only this batch, every listing with a single observation.
///
/// Used when the previous table cannot be read. A repeated id keeps its last entry.
pub fn fresh_table(snapshot: &[ListingSnapshot], now: DateTime<Utc>) -> Merged {
    let mut table = HistoryTable::new();
    for entry in snapshot {
        table.upsert(ListingRecord::first_observation(entry, now));
    }

    let records = snapshot
        .iter()
        .filter_map(|entry| table.get(entry.id).cloned())
        .collect();

    Merged { table, records }
}

/// Keeps the first observation of every run of equal prices.
pub fn suppress_consecutive_duplicates(history: &mut Vec<PriceObservation>) {
    history.dedup_by(|later, earlier| later.price == earlier.price);
}
