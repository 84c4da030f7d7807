use crate::config::ApiConfig;
use crate::cookie::CookieSet;
use crate::error::{ConfigError, FetchError};
use crate::leader::RawLeader;
use reqwest::header::COOKIE;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Access to the leaders API and to Wikipedia pages, one request at a time.
pub struct ApiClient {
    http: reqwest::Client,
    api: ApiConfig,
}

impl ApiClient {
    pub fn new(api: ApiConfig, timeout: Option<Duration>) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            api,
        })
    }

    pub fn api(&self) -> &ApiConfig {
        &self.api
    }

    /// Asks the API for a fresh session cookie. Only the cookies matter, the
    /// body and status of the response are ignored.
    pub async fn refresh_cookie(&self) -> Result<CookieSet, FetchError> {
        let url = self.api.cookie_url();
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| transport(url, source))?;

        let cookies = CookieSet::from_response(&response);
        debug!(count = cookies.len(), "refreshed cookie");
        Ok(cookies)
    }

    pub async fn get_countries(&self) -> Result<Vec<String>, FetchError> {
        let url = self.api.countries_url().clone();
        let response = self.get_with_fresh_cookie(&url).await?;
        decode(&url, response).await
    }

    pub async fn get_leaders(&self, country: &str) -> Result<Vec<RawLeader>, FetchError> {
        let url = self.api.leaders_url(country);
        let response = self.get_with_fresh_cookie(&url).await?;
        decode(&url, response).await
    }

    /// Downloads a page body. The status is not checked, error pages are
    /// parsed like any other page.
    pub async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            debug!(url, status = response.status().as_u16(), "page answered with error status");
        }

        response.text().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })
    }

    // Every privileged call gets its own cookie, nothing is kept between calls.
    async fn get_with_fresh_cookie(&self, url: &Url) -> Result<Response, FetchError> {
        let cookies = self.refresh_cookie().await?;

        let mut request = self.http.get(url.clone());
        if let Some(value) = cookies.header_value() {
            request = request.header(COOKIE, value);
        }

        let response = request.send().await.map_err(|source| transport(url, source))?;
        if response.status() != StatusCode::OK {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }
        Ok(response)
    }
}

async fn decode<T: DeserializeOwned>(url: &Url, response: Response) -> Result<T, FetchError> {
    let body = response.text().await.map_err(|source| transport(url, source))?;
    serde_json::from_str(&body).map_err(|source| FetchError::Decode {
        url: url.to_string(),
        source,
    })
}

fn transport(url: &Url, source: reqwest::Error) -> FetchError {
    FetchError::Transport {
        url: url.to_string(),
        source,
    }
}
