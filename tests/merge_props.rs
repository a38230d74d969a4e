use chrono::{DateTime, Duration, TimeZone, Utc};
use price_trail::engine::{last_change, merge};
use price_trail::model::{HistoryTable, ListingSnapshot};
use proptest::prelude::*;

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn arb_price() -> impl Strategy<Value = Option<f64>> {
    // Small domain so that repeats are common
    prop_oneof![
        1 => Just(None),
        6 => (1u32..6u32).prop_map(|p| Some(f64::from(p) * 1000.0)),
    ]
}

fn arb_rounds() -> impl Strategy<Value = Vec<Vec<(u64, Option<f64>)>>> {
    proptest::collection::vec(
        proptest::collection::vec((1u64..5u64, arb_price()), 0..6),
        1..30,
    )
}

fn snapshot(entries: &[(u64, Option<f64>)]) -> Vec<ListingSnapshot> {
    entries
        .iter()
        .map(|(id, price)| ListingSnapshot {
            id: *id,
            price: *price,
            address: Some(format!("{} Test St", id)),
        })
        .collect()
}

fn run(rounds: &[Vec<(u64, Option<f64>)>]) -> HistoryTable {
    let mut table = HistoryTable::new();
    for (i, round) in rounds.iter().enumerate() {
        let now = start() + Duration::hours(i as i64);
        table = merge(table, &snapshot(round), now).table;
    }
    table
}

proptest! {
    #[test]
    fn no_adjacent_equal_prices(rounds in arb_rounds()) {
        let table = run(&rounds);
        for record in table.records() {
            for pair in record.history.windows(2) {
                prop_assert_ne!(pair[0].price, pair[1].price);
            }
        }
    }

    #[test]
    fn history_is_time_ordered_and_keyed_by_id(rounds in arb_rounds()) {
        let table = run(&rounds);
        for record in table.records() {
            prop_assert_eq!(table.get(record.id), Some(record));
            prop_assert!(!record.history.is_empty());
            prop_assert_eq!(record.history[0].timestamp, record.first_seen);
            for pair in record.history.windows(2) {
                prop_assert!(pair[0].timestamp <= pair[1].timestamp);
            }
        }
    }

    #[test]
    fn repeating_a_snapshot_is_a_no_op(rounds in arb_rounds()) {
        let table = run(&rounds);
        let last = rounds.last().cloned().unwrap_or_default();
        // Only meaningful when the last round has one entry per id
        let mut ids: Vec<u64> = last.iter().map(|(id, _)| *id).collect();
        ids.sort();
        ids.dedup();
        prop_assume!(ids.len() == last.len());

        let later = start() + Duration::days(30);
        let again = merge(table.clone(), &snapshot(&last), later);
        prop_assert_eq!(again.table, table);
    }

    #[test]
    fn output_matches_snapshot_order(rounds in arb_rounds()) {
        let (init, rest) = rounds.split_at(rounds.len() - 1);
        let table = run(init);
        let merged = merge(table, &snapshot(&rest[0]), start() + Duration::days(60));
        let ids: Vec<u64> = merged.records.iter().map(|r| r.id).collect();
        let expected: Vec<u64> = rest[0].iter().map(|(id, _)| *id).collect();
        prop_assert_eq!(ids, expected);
    }
}

#[test]
fn price_drop_appends_one_point_and_reports_change() {
    let table = run(&[vec![(1, Some(100.0))], vec![(1, Some(90.0))]]);
    let record = table.get(1).unwrap();
    assert_eq!(record.history.len(), 2);
    assert_eq!(record.history[1].price, Some(90.0));
    assert_eq!(last_change(record), -10.0);
}
