// Utility functions

/// Accepts a bare id (`"123"`) or the page's element id form (`"result-123"`).
pub fn parse_listing_id(text: &str) -> Option<u64> {
    let text = text.trim();
    text.strip_prefix("result-").unwrap_or(text).parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_forms() {
        assert_eq!(parse_listing_id("123"), Some(123));
        assert_eq!(parse_listing_id(" result-45 "), Some(45));
        assert_eq!(parse_listing_id("result-"), None);
        assert_eq!(parse_listing_id("-3"), None);
    }
}
