use chrono::{Duration, Utc};
use futures::future::join_all;
use price_trail::config::{AppConfig, load_config};
use price_trail::engine::{PriceTracker, cutoff_before};
use price_trail::fetcher::{HttpFetcher, PageFetcher};
use price_trail::normalizer::normalize_all;
use price_trail::parser::{Parser, SearchResultsParser};
use price_trail::presenter::{Banner, render_all};
use price_trail::storage::{PersistenceGateway, SqliteStore};
use price_trail::utils::parse_listing_id;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "config.json";
const USAGE: &str = "usage: price-trail [run|list|hide <id>|show <id>] [config.json]";

enum Command {
    Run,
    List,
    SetHidden(u64, bool),
}

fn parse_args(args: &[String]) -> Option<(Command, &str)> {
    let config_at = |i: usize| args.get(i).map(String::as_str).unwrap_or(DEFAULT_CONFIG_PATH);
    match args.first().map(String::as_str) {
        None => Some((Command::Run, DEFAULT_CONFIG_PATH)),
        Some("run") => Some((Command::Run, config_at(1))),
        Some("list") => Some((Command::List, config_at(1))),
        Some(verb @ ("hide" | "show")) => {
            let id = parse_listing_id(args.get(1)?)?;
            Some((Command::SetHidden(id, verb == "hide"), config_at(2)))
        }
        Some(_) => None,
    }
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((command, config_path)) = parse_args(&args) else {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    };

    let config = match load_config(config_path) {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            error!("Config load error ({}): {}", config_path, e);
            return;
        }
    };

    let store = match SqliteStore::new(&config.db_path) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            error!("Failed to initialize storage: {}", e);
            return;
        }
    };

    let mut tracker = PriceTracker::new(PersistenceGateway::with_key(store, config.store_key.clone()));
    if config.serialize_writes {
        tracker = tracker.serialized(Arc::new(Mutex::new(())));
    }
    let tracker = Arc::new(tracker);

    match command {
        Command::Run => run_loop(config, tracker).await,
        Command::List => list_records(&config, &tracker).await,
        Command::SetHidden(id, hidden) => match tracker.set_hidden(id, hidden).await {
            Ok(true) => info!("Listing {} is now {}", id, if hidden { "hidden" } else { "shown" }),
            Ok(false) => warn!("Listing {} is not stored, nothing changed", id),
            Err(e) => error!("Toggle failed for listing {}: {}", id, e),
        },
    }
}

async fn run_loop(config: Arc<AppConfig>, tracker: Arc<PriceTracker<SqliteStore>>) {
    let fetcher = match HttpFetcher::new() {
        Ok(f) => f,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            return;
        }
    };
    let parser = match SearchResultsParser::new() {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to build parser: {}", e);
            return;
        }
    };

    if config.search_urls.is_empty() {
        warn!("No search_urls configured, nothing to watch");
        return;
    }

    loop {
        info!("Checking {} search pages...", config.search_urls.len());

        let tasks: Vec<_> = config
            .search_urls
            .iter()
            .map(|url| process_page(url, &fetcher, &parser, &tracker, config.trend_window()))
            .collect();
        join_all(tasks).await;

        info!("Waiting {}s for the next check...", config.check_interval_seconds);
        tokio::select! {
            _ = sleep(std::time::Duration::from_secs(config.check_interval_seconds)) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping.");
                return;
            }
        }
    }
}

/// Fetches, parses and merges one search page, then logs a banner per listing.
async fn process_page(
    url: &str,
    fetcher: &HttpFetcher,
    parser: &SearchResultsParser,
    tracker: &PriceTracker<SqliteStore>,
    window: Duration,
) {
    let html = match fetcher.fetch(url).await {
        Ok(html) => html,
        Err(e) => {
            warn!("Fetch failed for {}: {}", url, e);
            return;
        }
    };

    let raws = match parser.parse(&html) {
        Ok(r) => r,
        Err(e) => {
            warn!("Parse error for {}: {}", url, e);
            return;
        }
    };

    let snapshot = normalize_all(&raws);
    info!("{}: {} listings ({} dropped)", url, snapshot.len(), raws.len() - snapshot.len());
    if snapshot.is_empty() {
        return;
    }

    let now = Utc::now();
    let outcome = tracker.merge(&snapshot, now).await;
    if let Err(e) = &outcome.persisted {
        warn!("History for {} not persisted: {}", url, e);
    }

    for banner in render_all(&outcome.records, cutoff_before(now, window)) {
        info!("{}", banner);
    }
}

async fn list_records(config: &AppConfig, tracker: &PriceTracker<SqliteStore>) {
    let table = match tracker.records().await {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to load history: {}", e);
            return;
        }
    };

    let cutoff = cutoff_before(Utc::now(), config.trend_window());
    info!("{} listings stored", table.len());
    for record in table.records() {
        info!(
            "{} | {} | {} price points | first seen {}",
            Banner::for_record(record, cutoff),
            record.address.as_deref().unwrap_or("-"),
            record.history.len(),
            record.first_seen.to_rfc3339()
        );
    }
}
