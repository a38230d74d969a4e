use crate::storage::DEFAULT_STORE_KEY;
use chrono::Duration;
use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// Search result pages polled on every cycle.
    #[serde(default)]
    pub search_urls: Vec<String>,
    #[serde(default = "default_db_path")]
    pub db_path: String,
    #[serde(default = "default_store_key")]
    pub store_key: String,
    #[serde(default = "default_check_interval")]
    pub check_interval_seconds: u64,
    #[serde(default = "default_trend_window")]
    pub trend_window_hours: i64,
    #[serde(default = "default_serialize_writes")]
    pub serialize_writes: bool,
}

fn default_db_path() -> String {
    "data.db".to_string()
}

fn default_store_key() -> String {
    DEFAULT_STORE_KEY.to_string()
}

fn default_check_interval() -> u64 {
    3600
}

fn default_trend_window() -> i64 {
    24
}

fn default_serialize_writes() -> bool {
    true
}

impl AppConfig {
    pub fn trend_window(&self) -> Duration {
        Duration::hours(self.trend_window_hours)
    }
}

pub fn load_config(path: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let config: AppConfig = serde_json::from_str(content)?;
    if config.trend_window_hours <= 0 {
        return Err("trend_window_hours must be positive".into());
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let cfg = parse_config(r#"{ "search_urls": ["https://example.test/search"] }"#).unwrap();
        assert_eq!(cfg.search_urls.len(), 1);
        assert_eq!(cfg.db_path, "data.db");
        assert_eq!(cfg.store_key, "properties");
        assert_eq!(cfg.trend_window(), Duration::days(1));
        assert!(cfg.serialize_writes);
    }

    #[test]
    fn rejects_non_positive_window() {
        assert!(parse_config(r#"{ "trend_window_hours": 0 }"#).is_err());
        assert!(parse_config("not json").is_err());
    }
}
