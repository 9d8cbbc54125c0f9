//! Date/time token parser
//!
//! Normalizes the text found in `<time>` elements into `YYYY-MM-DD` and
//! `HH:MM` strings. Never fails: anything unrecognized becomes `None`.

use regex::Regex;

/// Parses a raw date/time token
///
/// Accepted shapes, checked in order:
/// 1. ISO combined (`2025-01-13T08:00:00`): split on the first `T`
/// 2. Leading date (`2025-01-13 ...`)
/// 3. Leading time (`08:00 ...`)
///
/// # Arguments
/// * `value` - Attribute value or element text, may be surrounded by whitespace
///
/// # Returns
/// `(date, time)`; each part is `None` if absent
///
/// # Example
/// ```
/// use mediathek_core::parser::parse_datetime_token;
/// assert_eq!(
///     parse_datetime_token("2025-01-13T08:00:00"),
///     (Some("2025-01-13".to_string()), Some("08:00".to_string()))
/// );
/// assert_eq!(parse_datetime_token("08:00"), (None, Some("08:00".to_string())));
/// assert_eq!(parse_datetime_token(""), (None, None));
/// ```
pub fn parse_datetime_token(value: &str) -> (Option<String>, Option<String>) {
    let value = value.trim();
    if value.is_empty() {
        return (None, None);
    }

    if let Some((date_part, time_part)) = value.split_once('T') {
        let date: String = date_part.chars().take(10).collect();
        let time = (time_part.chars().count() >= 5)
            .then(|| time_part.chars().take(5).collect::<String>());
        return (non_empty(date), time);
    }

    if let Some(date) = leading_match(r"^\d{4}-\d{2}-\d{2}", value) {
        return (Some(date), None);
    }

    if let Some(time) = leading_match(r"^\d{2}:\d{2}", value) {
        return (None, Some(time));
    }

    (None, None)
}

fn leading_match(pattern: &str, value: &str) -> Option<String> {
    let re = Regex::new(pattern).ok()?;
    re.find(value).map(|m| m.as_str().to_string())
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
