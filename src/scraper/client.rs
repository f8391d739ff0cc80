// client.rs
use crate::scraper::ScraperError;
use reqwest::blocking::Client;
use reqwest::header::HeaderMap;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::debug;

/// Thin wrapper around a blocking reqwest client with one fixed timeout.
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, ScraperError> {
        Self::build(user_agent, timeout, HeaderMap::new(), false)
    }

    /// Like `new`, with default headers and optionally without certificate checks
    /// (LivingEthio's API is served from a bare IP with a mismatched certificate).
    pub fn build(
        user_agent: &str,
        timeout: Duration,
        default_headers: HeaderMap,
        accept_invalid_certs: bool,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .default_headers(default_headers)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()
            .map_err(|e| ScraperError::Config(e.to_string()))?;

        Ok(Self { client })
    }

    /// GET returning the body as text. Any non-2xx status is an error.
    pub fn get_text(&self, url: &str, query: &[(&str, String)]) -> Result<String, ScraperError> {
        let start = Instant::now();

        let resp = self.client.get(url).query(query).send()?;
        let status = resp.status();

        if !status.is_success() {
            return Err(ScraperError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let text = resp.text()?;
        debug!(url, bytes = text.len(), elapsed = ?start.elapsed(), "fetched");
        Ok(text)
    }

    pub fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value, ScraperError> {
        let text = self.get_text(url, query)?;
        serde_json::from_str(&text).map_err(|e| ScraperError::JsonParse(e.to_string()))
    }
}
