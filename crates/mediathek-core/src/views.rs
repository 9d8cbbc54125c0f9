//! "Today" and "week" views over a scraped item list
//!
//! Pure functions; `today` is supplied by the caller so the views do not
//! depend on the wall clock or on a time zone.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::types::{DayGroup, MediathekItem};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Current calendar date in `tz`
pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

fn item_date(item: &MediathekItem) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&item.date, DATE_FORMAT).ok()
}

/// Items broadcast on `today`
///
/// If nothing matches, falls back to all items of the most recent date in
/// the list. Document order is kept.
pub fn build_today(items: &[MediathekItem], today: NaiveDate) -> Vec<MediathekItem> {
    let today_items: Vec<MediathekItem> = items
        .iter()
        .filter(|item| item_date(item) == Some(today))
        .cloned()
        .collect();
    if !today_items.is_empty() {
        return today_items;
    }

    let Some(latest) = items.iter().filter_map(item_date).max() else {
        return Vec::new();
    };
    items
        .iter()
        .filter(|item| item_date(item) == Some(latest))
        .cloned()
        .collect()
}

/// Items of the last seven days (today included), grouped per day
///
/// Groups are ordered newest first; items inside a group keep document
/// order. Items without a parsable date are dropped.
pub fn build_week(items: &[MediathekItem], today: NaiveDate) -> Vec<DayGroup> {
    let oldest = today - Duration::days(6);
    // Keyed by the item's own date text so every group member shares it
    let mut grouped: BTreeMap<(NaiveDate, String), Vec<MediathekItem>> = BTreeMap::new();

    for item in items {
        let Some(date) = item_date(item) else {
            continue;
        };
        if date < oldest || date > today {
            continue;
        }
        grouped
            .entry((date, item.date.clone()))
            .or_default()
            .push(item.clone());
    }

    grouped
        .into_iter()
        .rev()
        .map(|((_, date), items)| DayGroup { date, items })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn item(date: &str, show: &str) -> MediathekItem {
        MediathekItem {
            date: date.to_string(),
            start: "08:00".to_string(),
            end: String::new(),
            show: show.to_string(),
            episode: String::new(),
            teaser: None,
            audio_url: String::new(),
            audio_available: Some(false),
        }
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn shows(items: &[MediathekItem]) -> Vec<&str> {
        items.iter().map(|i| i.show.as_str()).collect()
    }

    #[test]
    fn test_today_filters_exact_date() {
        let items = vec![
            item("2025-01-13", "a"),
            item("2025-01-12", "b"),
            item("2025-01-13", "c"),
        ];
        let today = build_today(&items, day("2025-01-13"));
        assert_eq!(shows(&today), vec!["a", "c"]);
    }

    #[test]
    fn test_today_falls_back_to_latest_date() {
        let items = vec![
            item("2025-01-10", "a"),
            item("2025-01-11", "b"),
            item("", "c"),
            item("2025-01-11", "d"),
        ];
        let today = build_today(&items, day("2025-01-13"));
        assert_eq!(shows(&today), vec!["b", "d"]);
    }

    #[test]
    fn test_today_empty_input() {
        assert!(build_today(&[], day("2025-01-13")).is_empty());
    }

    #[test]
    fn test_today_without_any_dates() {
        let items = vec![item("", "a"), item("unbekannt", "b")];
        assert!(build_today(&items, day("2025-01-13")).is_empty());
    }

    #[test]
    fn test_week_groups_descending() {
        let items = vec![
            item("2025-01-11", "a"),
            item("2025-01-13", "b"),
            item("2025-01-11", "c"),
            item("2025-01-12", "d"),
        ];
        let week = build_week(&items, day("2025-01-13"));
        let dates: Vec<&str> = week.iter().map(|g| g.date.as_str()).collect();
        assert_eq!(dates, vec!["2025-01-13", "2025-01-12", "2025-01-11"]);
        assert_eq!(shows(&week[2].items), vec!["a", "c"]);
    }

    #[test]
    fn test_week_range_is_inclusive() {
        let items = vec![
            item("2025-01-06", "too old"),
            item("2025-01-07", "oldest"),
            item("2025-01-13", "today"),
            item("2025-01-14", "future"),
            item("", "undated"),
            item("13.01.2025", "unparsable"),
        ];
        let week = build_week(&items, day("2025-01-13"));
        let dates: Vec<&str> = week.iter().map(|g| g.date.as_str()).collect();
        assert_eq!(dates, vec!["2025-01-13", "2025-01-07"]);
    }

    #[test]
    fn test_week_across_month_boundary() {
        let items = vec![item("2025-02-26", "a"), item("2025-03-01", "b")];
        let week = build_week(&items, day("2025-03-03"));
        assert_eq!(week.len(), 2);
        assert_eq!(week[0].date, "2025-03-01");
    }

    #[test]
    fn test_week_group_date_matches_item_text() {
        let items = vec![item("2025-1-13", "kurz"), item("2025-01-12", "lang")];
        let week = build_week(&items, day("2025-01-13"));
        assert_eq!(week.len(), 2);
        assert_eq!(week[0].date, "2025-1-13");
        for group in &week {
            assert!(group.items.iter().all(|i| i.date == group.date));
        }
    }

    fn date_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            (0i64..20).prop_map(|offset| {
                (day("2025-01-20") - Duration::days(offset))
                    .format(DATE_FORMAT)
                    .to_string()
            }),
            Just(String::new()),
        ]
    }

    proptest! {
        #[test]
        fn prop_week_in_range_and_strictly_descending(
            dates in prop::collection::vec(date_strategy(), 0..30)
        ) {
            let today = day("2025-01-15");
            let items: Vec<MediathekItem> = dates.iter().map(|d| item(d, "x")).collect();
            let week = build_week(&items, today);

            for group in &week {
                let d = day(&group.date);
                prop_assert!(d <= today && d >= today - Duration::days(6));
                prop_assert!(group.items.iter().all(|i| i.date == group.date));
            }
            for pair in week.windows(2) {
                prop_assert!(pair[0].date > pair[1].date);
            }
        }

        #[test]
        fn prop_today_fallback_is_latest_date(
            dates in prop::collection::vec(date_strategy(), 0..30)
        ) {
            let today = day("2025-02-01");
            let items: Vec<MediathekItem> = dates.iter().map(|d| item(d, "x")).collect();
            let result = build_today(&items, today);

            let latest = items.iter().filter_map(item_date).max();
            let expected: Vec<MediathekItem> = items
                .iter()
                .filter(|i| latest.is_some() && item_date(i) == latest)
                .cloned()
                .collect();
            prop_assert_eq!(result, expected);
        }
    }
}
