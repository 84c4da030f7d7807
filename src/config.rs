use crate::error::ConfigError;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://country-leaders.onrender.com";
pub const COOKIE_ENDPOINT: &str = "/cookie";
pub const COUNTRIES_ENDPOINT: &str = "/countries";
pub const LEADERS_ENDPOINT: &str = "/leaders";
pub const DEFAULT_OUTPUT: &str = "leaders_data.json";

/// Resolved endpoint URLs of the country leaders API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    cookie_url: Url,
    countries_url: Url,
    leaders_url: Url,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        // Endpoints are appended to the base, so a base path like `/api` survives.
        let base = base_url.trim_end_matches('/');
        let endpoint = |path: &str| {
            Url::parse(&format!("{}{}", base, path)).map_err(|source| ConfigError::InvalidBaseUrl {
                url: base_url.to_string(),
                source,
            })
        };

        Ok(Self {
            cookie_url: endpoint(COOKIE_ENDPOINT)?,
            countries_url: endpoint(COUNTRIES_ENDPOINT)?,
            leaders_url: endpoint(LEADERS_ENDPOINT)?,
        })
    }

    pub fn cookie_url(&self) -> &Url {
        &self.cookie_url
    }

    pub fn countries_url(&self) -> &Url {
        &self.countries_url
    }

    pub fn leaders_url(&self, country: &str) -> Url {
        let mut url = self.leaders_url.clone();
        url.query_pairs_mut().append_pair("country", country);
        url
    }
}

/// What to do when the leaders endpoint rejects a country.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ErrorPolicy {
    /// Log the failure and leave the country out of the output.
    #[default]
    Skip,
    /// Stop the run and report the failure.
    Abort,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub api: ApiConfig,
    pub output: PathBuf,
    pub on_leaders_error: ErrorPolicy,
    pub timeout: Option<Duration>,
}

impl RunConfig {
    pub fn new(api: ApiConfig) -> Self {
        Self {
            api,
            output: PathBuf::from(DEFAULT_OUTPUT),
            on_leaders_error: ErrorPolicy::default(),
            timeout: None,
        }
    }
}
