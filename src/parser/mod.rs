// Search-page parsing: markup -> raw listing entries.

pub mod search_parser;

pub use search_parser::{Parser, SearchResultsParser};
