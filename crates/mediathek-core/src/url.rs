//! URL helpers for freies-radio.de
//!
//! The audio file location is a naming convention, not a lookup. The
//! availability probe is what confirms a file actually exists.

/// Site root all mediathek URLs hang off
pub const BASE_URL: &str = "https://www.freies-radio.de";

/// Builds the listing page URL for a site root
///
/// # Example
/// ```
/// use mediathek_core::url::build_mediathek_url;
/// let url = build_mediathek_url("https://www.freies-radio.de");
/// assert_eq!(url, "https://www.freies-radio.de/mediathek");
/// ```
pub fn build_mediathek_url(base_url: &str) -> String {
    format!("{}/mediathek", base_url.trim_end_matches('/'))
}

/// Builds the candidate MP3 URL for a broadcast on the default site
///
/// # Arguments
/// * `date` - Broadcast date as `YYYY-MM-DD`
/// * `start` - Start time as `HH:MM`
///
/// # Returns
/// `<base>/systemfiles/mediathek/YYYYMMDD-HHMM.mp3`, or an empty string if
/// either input is missing.
///
/// # Example
/// ```
/// use mediathek_core::url::build_audio_url;
/// let url = build_audio_url(Some("2025-01-13"), Some("08:00"));
/// assert_eq!(url, "https://www.freies-radio.de/systemfiles/mediathek/20250113-0800.mp3");
/// assert_eq!(build_audio_url(Some("2025-01-13"), None), "");
/// ```
pub fn build_audio_url(date: Option<&str>, start: Option<&str>) -> String {
    build_audio_url_with_base(BASE_URL, date, start)
}

/// Same as [`build_audio_url`] against an arbitrary site root
pub fn build_audio_url_with_base(base_url: &str, date: Option<&str>, start: Option<&str>) -> String {
    match (date, start) {
        (Some(date), Some(start)) if !date.is_empty() && !start.is_empty() => {
            let yyyymmdd = date.replace('-', "");
            let hhmm = start.replace(':', "");
            format!(
                "{}/systemfiles/mediathek/{}-{}.mp3",
                base_url.trim_end_matches('/'),
                yyyymmdd,
                hhmm
            )
        }
        _ => String::new(),
    }
}
