//! Blocking HTTP listing source.

use std::time::Duration;

use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use crate::config::FetchConfig;
use crate::error::{Result, SiftError};
use crate::fetch::ListingSource;
use crate::import::lines_from_html;

/// Fetches listing pages over HTTP and flattens their HTML.
pub struct HttpListingSource {
    client: reqwest::blocking::Client,
}

impl HttpListingSource {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|err| SiftError::Config(format!("fetch user agent: {err}")))?,
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(&config.accept_language)
                .map_err(|err| SiftError::Config(format!("fetch accept language: {err}")))?,
        );

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .default_headers(headers)
            .build()
            .map_err(|err| SiftError::Config(format!("fetch http client: {err}")))?;
        Ok(Self { client })
    }

    /// Raw page body; non-2xx statuses are errors.
    pub fn fetch_html(&self, url: &str) -> Result<String> {
        let fetch_error = |reason: String| SiftError::Fetch {
            url: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| fetch_error(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(format!("HTTP {status}")));
        }

        let body = response.text().map_err(|err| fetch_error(err.to_string()))?;
        debug!(url, status = status.as_u16(), bytes = body.len(), "fetched listing page");
        Ok(body)
    }
}

impl ListingSource for HttpListingSource {
    fn fetch_lines(&self, url: &str) -> Result<Vec<String>> {
        let html = self.fetch_html(url)?;
        Ok(lines_from_html(&html))
    }
}
