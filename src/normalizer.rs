use crate::model::{ListingSnapshot, NormalizeError, RawListing};
use tracing::warn;

/// Text the search page shows instead of a price.
const PRICE_ON_APPLICATION: &str = "price on application";

/// Validates raw entries, dropping the malformed ones so the rest of the batch still merges.
pub fn normalize_all(raws: &[RawListing]) -> Vec<ListingSnapshot> {
    raws.iter()
        .filter_map(|raw| match normalize_entry(raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("Dropping malformed listing entry: {}", e);
                None
            }
        })
        .collect()
}

pub fn normalize_entry(raw: &RawListing) -> Result<ListingSnapshot, NormalizeError> {
    let id_text = raw.id.as_deref().map(str::trim).unwrap_or_default();
    let id = id_text
        .parse::<u64>()
        .map_err(|_| NormalizeError::MissingId(id_text.to_string()))?;

    let price = match raw.price.as_deref() {
        Some(text) => parse_price(text).map_err(|_| NormalizeError::NonNumericPrice {
            id,
            price: text.to_string(),
        })?,
        None => None,
    };

    let address = raw
        .address
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string);

    Ok(ListingSnapshot { id, price, address })
}

/// `Ok(None)` for "no price"; `Err(())` when something is there but is not a number.
fn parse_price(text: &str) -> Result<Option<f64>, ()> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(PRICE_ON_APPLICATION) {
        return Ok(None);
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|c| *c != '€' && *c != ',' && !c.is_whitespace())
        .collect();

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: Option<&str>, price: Option<&str>, address: Option<&str>) -> RawListing {
        RawListing {
            id: id.map(String::from),
            price: price.map(String::from),
            address: address.map(String::from),
        }
    }

    #[test]
    fn strips_currency_and_separators() {
        let s = normalize_entry(&raw(Some("42"), Some("€1,250,000"), Some(" 1 Main St "))).unwrap();
        assert_eq!(s.id, 42);
        assert_eq!(s.price, Some(1_250_000.0));
        assert_eq!(s.address.as_deref(), Some("1 Main St"));
    }

    #[test]
    fn price_on_application_is_absent_not_zero() {
        let s = normalize_entry(&raw(Some("7"), Some("Price on Application"), None)).unwrap();
        assert_eq!(s.price, None);
        let s = normalize_entry(&raw(Some("7"), None, Some(""))).unwrap();
        assert_eq!(s.price, None);
        assert_eq!(s.address, None);
    }

    #[test]
    fn rejects_bad_id_and_bad_price() {
        assert_eq!(
            normalize_entry(&raw(None, Some("€100"), None)),
            Err(NormalizeError::MissingId(String::new()))
        );
        assert!(matches!(
            normalize_entry(&raw(Some("abc"), Some("€100"), None)),
            Err(NormalizeError::MissingId(_))
        ));
        assert!(matches!(
            normalize_entry(&raw(Some("3"), Some("AMV €300"), None)),
            Err(NormalizeError::NonNumericPrice { id: 3, .. })
        ));
        assert!(matches!(
            normalize_entry(&raw(Some("3"), Some("NaN"), None)),
            Err(NormalizeError::NonNumericPrice { .. })
        ));
    }

    #[test]
    fn normalize_all_keeps_the_good_entries() {
        let batch = vec![
            raw(Some("1"), Some("€100"), Some("A St")),
            raw(Some("x"), Some("€200"), None),
            raw(Some("2"), Some("oops"), None),
            raw(Some("3"), None, None),
        ];
        let out = normalize_all(&batch);
        let ids: Vec<u64> = out.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
