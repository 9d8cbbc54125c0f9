//! Error types for the mediathek scraper
//!
//! Only the document fetch can fail in a way callers see. Parsing degrades
//! to empty fields and probing degrades to `false`, so neither has a variant.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for all mediathek operations
#[derive(Error, Debug)]
pub enum MediathekError {
    /// Transport failure, including timeouts
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Listing page answered with a non-success status
    #[error("HTTP {status} from {url}")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    /// Failed to parse HTML content
    #[error("Failed to parse HTML: {0}")]
    ParseError(String),

    /// Configuration value could not be used
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl MediathekError {
    /// Whether another attempt at the same request may succeed
    ///
    /// Covers 429/500/502/503/504 plus connect errors and timeouts.
    pub fn is_retryable(&self) -> bool {
        match self {
            MediathekError::HttpStatus { status, .. } => matches!(
                status.as_u16(),
                429 | 500 | 502 | 503 | 504
            ),
            MediathekError::HttpError(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}

impl Serialize for MediathekError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for mediathek operations
pub type Result<T> = std::result::Result<T, MediathekError>;
