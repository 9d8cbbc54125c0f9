//! Freies Radio Mediathek Core Library
//!
//! Scrapes the program archive of freies-radio.de into structured episode
//! records and checks which audio files can actually be downloaded.
//!
//! # Overview
//!
//! - HTML parser turning listing rows into [`MediathekItem`]s
//! - HTTP client with bounded retries for the listing and HEAD probes for audio
//! - Orchestrator probing all items with bounded concurrency
//! - "today" / "week" view builders and a TTL result cache
//!
//! # Example
//!
//! ```no_run
//! use mediathek_core::{MediathekScraper, Result, build_today, today_in};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let scraper = MediathekScraper::new()?;
//!     let items = scraper.fetch_current_items().await?;
//!
//!     for item in build_today(&items, today_in(chrono_tz::Europe::Berlin)) {
//!         println!("{} {} {} ({:?})", item.start, item.show, item.audio_url, item.audio_available);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Audio URLs
//!
//! Audio URLs are derived from date and start time
//! (`/systemfiles/mediathek/YYYYMMDD-HHMM.mp3`). They are guesses until the
//! probe has confirmed them, see [`MediathekItem::audio_available`].

pub mod cache;
mod client;
pub mod config;
mod error;
pub mod parser;
mod scraper;
mod types;
pub mod url;
pub mod views;

// Re-export client types
pub use client::{AudioProbe, ClientConfig, DocumentSource, MediathekClient};

// Re-export error types
pub use error::{MediathekError, Result};

// Re-export parser functions
pub use parser::{parse_datetime_token, parse_listing};

// Re-export main scraper API
pub use scraper::{ItemSource, MediathekScraper, probe_items};

// Re-export data types
pub use types::{DayGroup, MediathekItem};

// Re-export cache, config and views
pub use cache::{Clock, ManualClock, SystemClock, TtlCache};
pub use config::Settings;
pub use url::build_audio_url;
pub use views::{build_today, build_week, today_in};
