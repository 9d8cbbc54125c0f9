//! HTTP client for freies-radio.de
//!
//! Fetches the listing page with bounded retries and probes audio files
//! with HEAD requests. Both capabilities sit behind traits so the
//! orchestrator can run against canned documents and probes.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::{MediathekError, Result};
use crate::url::{BASE_URL, build_mediathek_url};

const USER_AGENT: &str = "frs-proxy/1.0 (+https://github.com/DonMassa84/frs_freies_radio)";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Site root used for audio URLs (default: https://www.freies-radio.de)
    pub base_url: String,
    /// Listing page URL (default: `<base_url>/mediathek`)
    pub mediathek_url: String,
    /// Timeout for the listing request (default: 10s)
    pub request_timeout: Duration,
    /// Timeout for each HEAD probe (default: 5s)
    pub head_timeout: Duration,
    /// Retries after the first failed listing request (default: 2)
    pub max_retries: u32,
    /// First backoff delay, doubled on every retry (default: 300ms)
    pub backoff_base: Duration,
    /// Probes running at the same time (default: 6)
    pub max_concurrent_probes: usize,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            mediathek_url: build_mediathek_url(BASE_URL),
            request_timeout: Duration::from_secs(10),
            head_timeout: Duration::from_secs(5),
            max_retries: 2,
            backoff_base: Duration::from_millis(300),
            max_concurrent_probes: 6,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Points both the listing and audio URLs at another site root
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self.mediathek_url = build_mediathek_url(base_url);
        self
    }
}

/// Source of the raw listing document
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch_document(&self) -> Result<String>;
}

/// Existence check for a candidate audio URL
///
/// Implementations never fail: every error collapses to `false`.
#[async_trait]
pub trait AudioProbe: Send + Sync {
    async fn is_available(&self, url: &str) -> bool;
}

/// HTTP client wrapper with retry logic
///
/// Handles all HTTP communication with freies-radio.de:
/// - GET of the listing page, retried with exponential backoff on 429/5xx
/// - HEAD probes of audio files with their own short timeout
pub struct MediathekClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl MediathekClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(MediathekError::HttpError)?;

        Ok(Self { client, config })
    }

    /// Configuration this client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch the mediathek listing page
    ///
    /// # Errors
    /// - `HttpError` - Network errors or timeout after all retries
    /// - `HttpStatus` - Non-success status (after retries for 429/5xx)
    pub async fn fetch_listing(&self) -> Result<String> {
        self.fetch_with_retry(&self.config.mediathek_url).await
    }

    async fn fetch_with_retry(&self, url: &str) -> Result<String> {
        let mut attempt = 0;

        loop {
            match self.do_fetch(url).await {
                Ok(body) => return Ok(body),
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    let backoff = backoff_delay(self.config.backoff_base, attempt);
                    warn!(url, attempt = attempt + 1, ?backoff, error = %e, "retrying listing fetch");
                    sleep(backoff).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn do_fetch(&self, url: &str) -> Result<String> {
        debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(MediathekError::HttpError)?;

        let status = response.status();
        if !status.is_success() {
            return Err(MediathekError::HttpStatus {
                status,
                url: url.to_string(),
            });
        }

        response.text().await.map_err(MediathekError::HttpError)
    }

    /// Check whether an audio file responds successfully to HEAD
    ///
    /// Returns `false` for empty URLs, transport errors, timeouts and
    /// non-success statuses. Never retried.
    pub async fn head_ok(&self, url: &str) -> bool {
        if url.is_empty() {
            return false;
        }

        match self
            .client
            .head(url)
            .timeout(self.config.head_timeout)
            .send()
            .await
        {
            Ok(response) => {
                let status = response.status();
                debug!(url, %status, "HEAD");
                status.is_success()
            }
            Err(e) => {
                debug!(url, error = %e, "HEAD failed");
                false
            }
        }
    }
}

/// Delay before retry number `attempt + 1`: `base * 2^attempt`, saturating
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2u32.saturating_pow(attempt))
}

#[async_trait]
impl DocumentSource for MediathekClient {
    async fn fetch_document(&self) -> Result<String> {
        self.fetch_listing().await
    }
}

#[async_trait]
impl AudioProbe for MediathekClient {
    async fn is_available(&self, url: &str) -> bool {
        self.head_ok(url).await
    }
}
