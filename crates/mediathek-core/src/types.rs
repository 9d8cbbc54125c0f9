//! Core data types for the mediathek scraper

use serde::{Deserialize, Serialize};

/// One broadcast episode scraped from the mediathek listing
///
/// Field names serialize in camelCase to match the JSON the front-end reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediathekItem {
    /// Broadcast date as `YYYY-MM-DD`, empty if unknown
    pub date: String,

    /// Start time as `HH:MM`, empty if unknown
    pub start: String,

    /// End time as `HH:MM`, empty if unknown
    pub end: String,

    /// Program title
    pub show: String,

    /// Episode label
    pub episode: String,

    /// Descriptive blurb, never `Some("")`
    pub teaser: Option<String>,

    /// Candidate MP3 URL, empty when date or start is missing
    pub audio_url: String,

    /// Probe result; `None` until the probe phase has run for this item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_available: Option<bool>,
}

/// Items of a single broadcast day, used by the week view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayGroup {
    pub date: String,
    pub items: Vec<MediathekItem>,
}
