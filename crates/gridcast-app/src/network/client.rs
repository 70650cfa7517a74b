//! Shared HTTP client wrapper
//!
//! Thin wrapper around `reqwest::blocking::Client` that centralizes
//! USER_AGENT and timeout configuration.

use gridcast::config::network::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS, USER_AGENT};
use gridcast::PlaylistError;
use std::time::Duration;
use tracing::debug;

use crate::error::Result;
use crate::network::PlaylistFetcher;

/// Shared HTTP client with standard configuration
pub struct HttpClient {
    inner: reqwest::blocking::Client,
}

impl HttpClient {
    /// Create a new client with default Gridcast settings
    pub fn new() -> Result<Self> {
        let inner = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(READ_TIMEOUT_SECS))
            .build()?;
        Ok(Self { inner })
    }

    /// Access the underlying reqwest client
    pub fn inner(&self) -> &reqwest::blocking::Client {
        &self.inner
    }
}

impl PlaylistFetcher for HttpClient {
    fn fetch_text(&self, url: &str) -> Result<String> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|_| PlaylistError::InvalidUrl(url.to_string()))?;

        debug!(%parsed, "fetching playlist");
        let resp = self.inner.get(parsed).send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(PlaylistError::Fetch(format!("server returned HTTP {status}")).into());
        }

        let body = resp.bytes()?;
        let text = String::from_utf8(body.to_vec())
            .map_err(|_| PlaylistError::Decode("response is not valid UTF-8".to_string()))?;

        debug!(bytes = text.len(), "playlist fetched");
        Ok(text)
    }
}
