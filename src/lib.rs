pub mod aggregator;
pub mod client;
pub mod config;
pub mod cookie;
pub mod error;
pub mod leader;
pub mod paragraph;
pub mod persist;
pub mod stats;

use anyhow::{Context, Result};
use tracing::info;

use crate::aggregator::LeaderScraper;
use crate::client::ApiClient;
use crate::config::RunConfig;
use crate::stats::RunStats;

/// Scrapes every country's leaders and writes them to `config.output`.
pub async fn run(config: &RunConfig) -> Result<RunStats> {
    let client = ApiClient::new(config.api.clone(), config.timeout)?;
    let scraper = LeaderScraper::new(client, config.on_leaders_error);

    let (data, stats) = scraper
        .collect()
        .await
        .context("Failed to collect leaders data")?;

    persist::to_json_file(&data, &config.output)
        .with_context(|| format!("Failed to save leaders data to {}", config.output.display()))?;

    info!(
        output = %config.output.display(),
        countries = stats.countries_fetched,
        skipped = stats.countries_skipped,
        leaders = stats.leaders_written,
        without_url = stats.leaders_without_url,
        elapsed_ms = stats.elapsed_millis(),
        "saved leaders data"
    );
    Ok(stats)
}
