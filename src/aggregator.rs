use crate::client::ApiClient;
use crate::config::ErrorPolicy;
use crate::error::FetchError;
use crate::leader::{Leader, LeadersByCountry};
use crate::paragraph::first_paragraph;
use crate::stats::RunStats;
use tracing::{debug, info, warn};

/// Leaders of one country, each augmented with its biography paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryLeaders {
    pub country: String,
    pub leaders: Vec<Leader>,
    /// Records skipped because they had no Wikipedia page.
    pub without_url: usize,
}

pub struct LeaderScraper {
    client: ApiClient,
    on_leaders_error: ErrorPolicy,
}

impl LeaderScraper {
    pub fn new(client: ApiClient, on_leaders_error: ErrorPolicy) -> Self {
        Self {
            client,
            on_leaders_error,
        }
    }

    pub async fn get_countries(&self) -> Result<Vec<String>, FetchError> {
        self.client.get_countries().await
    }

    /// Fetches a country's leaders and the paragraph of every leader that has
    /// a Wikipedia page. Each page is requested exactly once.
    pub async fn get_leaders(&self, country: &str) -> Result<CountryLeaders, FetchError> {
        let records = self.client.get_leaders(country).await?;
        let mut leaders = Vec::with_capacity(records.len());
        let mut without_url = 0;

        for record in records {
            let Some(url) = record.wikipedia_url().map(str::to_string) else {
                debug!(country, first_name = ?record.first_name, last_name = ?record.last_name, "leader has no wikipedia url");
                without_url += 1;
                continue;
            };

            let html = self.client.fetch_page(&url).await?;
            let paragraph = first_paragraph(&html, record.birth_year());
            leaders.push(record.with_paragraph(url, paragraph));
        }

        Ok(CountryLeaders {
            country: country.to_string(),
            leaders,
            without_url,
        })
    }

    /// Runs the whole pipeline: countries, then leaders and paragraphs per
    /// country, folded into one mapping.
    pub async fn collect(&self) -> Result<(LeadersByCountry, RunStats), FetchError> {
        let mut stats = RunStats::new();
        let mut data = LeadersByCountry::new();

        let countries = self.get_countries().await?;
        info!(?countries, "fetched countries");
        stats.countries_listed = countries.len();

        for country in countries {
            match self.get_leaders(&country).await {
                Ok(result) => {
                    info!(country = %result.country, leaders = result.leaders.len(), "fetched leaders");
                    stats.countries_fetched += 1;
                    stats.leaders_written += result.leaders.len();
                    stats.leaders_without_url += result.without_url;
                    data.insert(result.country, result.leaders);
                }
                Err(err @ FetchError::Status { .. }) if self.on_leaders_error == ErrorPolicy::Skip => {
                    warn!(country = %country, status = ?err.status(), "skipping country: {}", err);
                    stats.countries_skipped += 1;
                }
                Err(err) => return Err(err),
            }
        }

        Ok((data, stats))
    }
}
