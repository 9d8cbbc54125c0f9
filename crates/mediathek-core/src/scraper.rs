//! Main scraper API for the mediathek
//!
//! Composes fetch, parse and probe into one call that returns the annotated
//! item list. Caching is left to the caller.

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use tracing::info;

use crate::client::{AudioProbe, ClientConfig, DocumentSource, MediathekClient};
use crate::error::Result;
use crate::parser::parse_listing_with_base;
use crate::types::MediathekItem;
use crate::url::BASE_URL;

/// Anything that can produce the current, probed item list
#[async_trait]
pub trait ItemSource: Send + Sync {
    async fn fetch_items(&self) -> Result<Vec<MediathekItem>>;
}

/// Orchestrates one scrape of the mediathek
///
/// The document source and audio probe are injectable; by default both are
/// backed by the same [`MediathekClient`].
pub struct MediathekScraper {
    documents: Arc<dyn DocumentSource>,
    probe: Arc<dyn AudioProbe>,
    base_url: String,
    max_concurrent_probes: usize,
}

impl MediathekScraper {
    /// Create a new scraper with default configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new scraper with custom client configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let base_url = config.base_url.clone();
        let max_concurrent_probes = config.max_concurrent_probes;
        let client = Arc::new(MediathekClient::with_config(config)?);

        Ok(Self {
            documents: client.clone(),
            probe: client,
            base_url,
            max_concurrent_probes,
        })
    }

    /// Create a scraper from explicit document and probe implementations
    pub fn with_sources(documents: Arc<dyn DocumentSource>, probe: Arc<dyn AudioProbe>) -> Self {
        Self {
            documents,
            probe,
            base_url: BASE_URL.to_string(),
            max_concurrent_probes: ClientConfig::default().max_concurrent_probes,
        }
    }

    /// Override how many probes may run at once
    pub fn max_concurrent_probes(mut self, limit: usize) -> Self {
        self.max_concurrent_probes = limit.max(1);
        self
    }

    /// Fetch, parse and probe the current listing
    ///
    /// # Returns
    /// Items in document order, each with `audio_available` set
    ///
    /// # Errors
    /// Propagates any failure of the document fetch
    pub async fn fetch_current_items(&self) -> Result<Vec<MediathekItem>> {
        let html = self.documents.fetch_document().await?;
        let mut items = parse_listing_with_base(&html, &self.base_url)?;

        probe_items(&mut items, self.probe.as_ref(), self.max_concurrent_probes).await;

        let available = items
            .iter()
            .filter(|item| item.audio_available == Some(true))
            .count();
        info!(rows = items.len(), available, "mediathek scraped");

        Ok(items)
    }
}

#[async_trait]
impl ItemSource for MediathekScraper {
    async fn fetch_items(&self) -> Result<Vec<MediathekItem>> {
        self.fetch_current_items().await
    }
}

/// Fill in `audio_available` for every item
///
/// At most `limit` probes run at once. Items without an audio URL are
/// marked unavailable without a request.
pub async fn probe_items(items: &mut [MediathekItem], probe: &dyn AudioProbe, limit: usize) {
    let jobs: Vec<(usize, String)> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| !item.audio_url.is_empty())
        .map(|(idx, item)| (idx, item.audio_url.clone()))
        .collect();

    let results: Vec<(usize, bool)> = stream::iter(jobs)
        .map(|(idx, url)| async move { (idx, probe.is_available(&url).await) })
        .buffer_unordered(limit.max(1))
        .collect()
        .await;

    for item in items.iter_mut() {
        item.audio_available = Some(false);
    }
    for (idx, available) in results {
        items[idx].audio_available = Some(available);
    }
}
