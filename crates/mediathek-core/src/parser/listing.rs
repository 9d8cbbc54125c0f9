//! Mediathek listing parser
//!
//! Turns the listing page into one [`MediathekItem`] per row. Every lookup
//! goes through an ordered list of selectors so small markup changes on the
//! site degrade gracefully instead of emptying the listing.

use scraper::{ElementRef, Html, Selector};

use crate::error::{MediathekError, Result};
use crate::parser::datetime::parse_datetime_token;
use crate::types::MediathekItem;
use crate::url::{BASE_URL, build_audio_url_with_base};

/// Row containers, most specific first
const ROW_SELECTORS: &[&str] = &[".view-content .views-row", ".views-row", "article"];

/// Show title link inside a row
const SHOW_SELECTORS: &[&str] = &["a.use-ajax", "h3 a", "a"];

/// Episode label inside a row
const EPISODE_SELECTORS: &[&str] = &["span.text-base.font-bold", "span.text-base"];

/// Teaser text inside a row
const TEASER_SELECTORS: &[&str] = &[".field--name-field-teaser", "p"];

struct ListingSelectors {
    rows: Vec<Selector>,
    time: Selector,
    show: Vec<Selector>,
    episode: Vec<Selector>,
    teaser: Vec<Selector>,
}

impl ListingSelectors {
    fn compile() -> Result<Self> {
        Ok(Self {
            rows: compile_all(ROW_SELECTORS)?,
            time: compile("time")?,
            show: compile_all(SHOW_SELECTORS)?,
            episode: compile_all(EPISODE_SELECTORS)?,
            teaser: compile_all(TEASER_SELECTORS)?,
        })
    }
}

fn compile(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| MediathekError::ParseError(format!("Invalid selector {css:?}: {e:?}")))
}

fn compile_all(css: &[&str]) -> Result<Vec<Selector>> {
    css.iter().map(|s| compile(s)).collect()
}

/// Parses the mediathek listing page
///
/// # Arguments
/// * `html` - Raw HTML of the listing page
///
/// # Returns
/// Items in document order. Rows with missing fields are kept with empty
/// values; `audio_available` is left unset.
///
/// # Errors
/// Returns `ParseError` only if an internal selector fails to compile
pub fn parse_listing(html: &str) -> Result<Vec<MediathekItem>> {
    parse_listing_with_base(html, BASE_URL)
}

/// Same as [`parse_listing`], building audio URLs against `base_url`
pub fn parse_listing_with_base(html: &str, base_url: &str) -> Result<Vec<MediathekItem>> {
    let document = Html::parse_document(html);
    let selectors = ListingSelectors::compile()?;

    let items = select_rows(&document, &selectors.rows)
        .iter()
        .map(|row| parse_row(row, &selectors, base_url))
        .collect();

    Ok(items)
}

/// Returns the matches of the first row selector that matches anything
fn select_rows<'a>(document: &'a Html, selectors: &[Selector]) -> Vec<ElementRef<'a>> {
    for selector in selectors {
        let rows: Vec<ElementRef<'a>> = document.select(selector).collect();
        if !rows.is_empty() {
            return rows;
        }
    }
    Vec::new()
}

fn parse_row(row: &ElementRef, selectors: &ListingSelectors, base_url: &str) -> MediathekItem {
    let mut times = row.select(&selectors.time);

    let (date, start) = times
        .next()
        .map(|el| parse_datetime_token(&time_value(&el)))
        .unwrap_or((None, None));
    let end = times
        .next()
        .and_then(|el| parse_datetime_token(&time_value(&el)).1);

    let show = first_match(row, &selectors.show)
        .map(|el| extract_text(&el))
        .unwrap_or_default();

    let episode = first_match(row, &selectors.episode)
        .map(|el| extract_text(&el))
        .unwrap_or_default();

    let teaser = first_match(row, &selectors.teaser)
        .map(|el| extract_text(&el))
        .filter(|text| !text.is_empty());

    let audio_url = build_audio_url_with_base(base_url, date.as_deref(), start.as_deref());

    MediathekItem {
        date: date.unwrap_or_default(),
        start: start.unwrap_or_default(),
        end: end.unwrap_or_default(),
        show,
        episode,
        teaser,
        audio_url,
        audio_available: None,
    }
}

/// Machine-readable `datetime` attribute, falling back to visible text
fn time_value(element: &ElementRef) -> String {
    match element.value().attr("datetime") {
        Some(value) if !value.trim().is_empty() => value.to_string(),
        _ => element.text().collect(),
    }
}

fn first_match<'a>(row: &ElementRef<'a>, selectors: &[Selector]) -> Option<ElementRef<'a>> {
    selectors
        .iter()
        .find_map(|selector| row.select(selector).next())
}

/// Display text with whitespace collapsed across nested nodes
fn extract_text(element: &ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FIXTURE: &str = include_str!("../../tests/fixtures/mediathek_sample.html");

    #[test]
    fn test_parse_fixture() {
        let items = parse_listing(FIXTURE).unwrap();
        assert_eq!(items.len(), 2);

        let first = &items[0];
        assert_eq!(first.date, "2025-01-13");
        assert_eq!(first.start, "08:00");
        assert_eq!(first.end, "09:00");
        assert_eq!(first.show, "Morgenmagazin");
        assert_eq!(first.episode, "Folge 1");
        assert_eq!(first.teaser.as_deref(), Some("Start in den Tag."));
        assert!(
            first
                .audio_url
                .ends_with("/systemfiles/mediathek/20250113-0800.mp3")
        );
        assert_eq!(first.audio_available, None);
    }

    #[test]
    fn test_parse_fixture_second_row() {
        let items = parse_listing(FIXTURE).unwrap();
        let second = &items[1];
        assert_eq!(second.date, "2025-01-12");
        assert_eq!(second.start, "18:00");
        assert_eq!(second.end, "19:00");
        assert_eq!(second.show, "Abendklang");
        assert_eq!(second.episode, "");
        assert_eq!(second.teaser, None);
    }

    #[test]
    fn test_parse_empty_html() {
        let items = parse_listing("<html><body></body></html>").unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_row_selector_falls_back_to_views_row() {
        let html = r#"
        <div class="views-row"><h3><a href="/a">Erste</a></h3></div>
        <div class="views-row"><h3><a href="/b">Zweite</a></h3></div>
        "#;
        let items = parse_listing(html).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].show, "Erste");
        assert_eq!(items[1].show, "Zweite");
    }

    #[test]
    fn test_primary_row_selector_wins() {
        let html = r#"
        <div class="sidebar"><div class="views-row"><a>Sidebar</a></div></div>
        <div class="view-content"><div class="views-row"><a>Inhalt</a></div></div>
        "#;
        let items = parse_listing(html).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].show, "Inhalt");
    }

    #[test]
    fn test_row_selector_falls_back_to_article() {
        let html = r#"
        <main>
            <article><time datetime="2025-02-01T10:00:00">10:00</time><a>Radio Aktiv</a></article>
        </main>
        "#;
        let items = parse_listing(html).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].date, "2025-02-01");
        assert_eq!(items[0].start, "10:00");
        assert_eq!(items[0].show, "Radio Aktiv");
    }

    #[test]
    fn test_row_without_time_or_link() {
        let html = r#"<div class="views-row"><p>Nur Text</p></div>"#;
        let items = parse_listing(html).unwrap();
        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.date, "");
        assert_eq!(item.start, "");
        assert_eq!(item.end, "");
        assert_eq!(item.show, "");
        assert_eq!(item.audio_url, "");
        assert_eq!(item.teaser.as_deref(), Some("Nur Text"));
    }

    #[test]
    fn test_time_text_used_without_attribute() {
        let html = r#"
        <div class="views-row">
            <time>2025-03-04</time>
            <time> 21:00 </time>
        </div>
        "#;
        let items = parse_listing(html).unwrap();
        assert_eq!(items[0].date, "2025-03-04");
        assert_eq!(items[0].start, "");
        assert_eq!(items[0].end, "21:00");
        assert_eq!(items[0].audio_url, "");
    }

    #[test]
    fn test_end_time_discards_date() {
        let html = r#"
        <div class="views-row">
            <time datetime="2025-03-04T20:00:00">20:00</time>
            <time datetime="2025-03-05T00:30:00">00:30</time>
        </div>
        "#;
        let items = parse_listing(html).unwrap();
        assert_eq!(items[0].date, "2025-03-04");
        assert_eq!(items[0].end, "00:30");
    }

    #[test]
    fn test_show_link_priority() {
        let html = r#"
        <div class="views-row">
            <a href="/zurueck">Zurück</a>
            <h3><a href="/sendung">Titel H3</a></h3>
            <a class="use-ajax" href="/ajax">  Titel
                <em>Ajax</em> </a>
        </div>
        "#;
        let items = parse_listing(html).unwrap();
        assert_eq!(items[0].show, "Titel Ajax");
    }

    #[test]
    fn test_episode_prefers_bold_span() {
        let html = r#"
        <div class="views-row">
            <span class="text-base">Untertitel</span>
            <span class="text-base font-bold">Folge 7</span>
        </div>
        "#;
        let items = parse_listing(html).unwrap();
        assert_eq!(items[0].episode, "Folge 7");
    }

    #[test]
    fn test_teaser_field_preferred_over_paragraph() {
        let html = r#"
        <div class="views-row">
            <p>Erster Absatz</p>
            <div class="field--name-field-teaser"><p>Der Teaser</p></div>
        </div>
        "#;
        let items = parse_listing(html).unwrap();
        assert_eq!(items[0].teaser.as_deref(), Some("Der Teaser"));
    }

    #[test]
    fn test_blank_teaser_is_none() {
        let html = r#"<div class="views-row"><p>   </p></div>"#;
        let items = parse_listing(html).unwrap();
        assert_eq!(items[0].teaser, None);
    }

    #[test]
    fn test_custom_base_url() {
        let html = r#"<div class="views-row"><time datetime="2025-01-13T08:00:00"></time></div>"#;
        let items = parse_listing_with_base(html, "http://127.0.0.1:9999").unwrap();
        assert_eq!(
            items[0].audio_url,
            "http://127.0.0.1:9999/systemfiles/mediathek/20250113-0800.mp3"
        );
    }

    fn row_strategy() -> impl Strategy<Value = String> {
        (
            prop::option::of("20[0-9]{2}-[01][0-9]-[0-3][0-9]"),
            prop::option::of("[0-2][0-9]:[0-5][0-9]"),
        )
            .prop_map(|(date, time)| {
                let attr = match (date, time) {
                    (Some(d), Some(t)) => format!(r#"<time datetime="{d}T{t}:00"></time>"#),
                    (Some(d), None) => format!("<time>{d}</time>"),
                    (None, Some(t)) => format!("<time>{t}</time>"),
                    (None, None) => String::new(),
                };
                format!(r#"<div class="views-row">{attr}<a>Sendung</a></div>"#)
            })
    }

    proptest! {
        #[test]
        fn prop_audio_url_iff_date_and_start(rows in prop::collection::vec(row_strategy(), 0..8)) {
            let html = format!("<html><body>{}</body></html>", rows.concat());
            let items = parse_listing(&html).unwrap();
            prop_assert_eq!(items.len(), rows.len());
            for item in items {
                let has_both = !item.date.is_empty() && !item.start.is_empty();
                prop_assert_eq!(!item.audio_url.is_empty(), has_both);
            }
        }
    }
}
