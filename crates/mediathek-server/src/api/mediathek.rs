//! Mediathek endpoints
//!
//! Both endpoints serve from the TTL cache when possible. A failed scrape is
//! logged and answered with an empty list rather than an error status, and
//! is not cached.

use axum::{Json, Router, extract::State, routing::get};
use mediathek_core::{DayGroup, MediathekItem, build_today, build_week};
use tracing::warn;

use crate::{AppState, CachedView};

pub const TODAY_KEY: &str = "today";
pub const WEEK_KEY: &str = "week";

/// GET /mediathek/today
pub async fn mediathek_today(State(state): State<AppState>) -> Json<Vec<MediathekItem>> {
    if let Some(CachedView::Today(items)) = state.cache.get(TODAY_KEY) {
        return Json(items);
    }

    match state.source.fetch_items().await {
        Ok(items) => {
            let today = build_today(&items, state.today());
            state.cache.set(TODAY_KEY, CachedView::Today(today.clone()));
            Json(today)
        }
        Err(e) => {
            warn!(error = %e, "today view unavailable, returning empty list");
            Json(Vec::new())
        }
    }
}

/// GET /mediathek/week
pub async fn mediathek_week(State(state): State<AppState>) -> Json<Vec<DayGroup>> {
    if let Some(CachedView::Week(groups)) = state.cache.get(WEEK_KEY) {
        return Json(groups);
    }

    match state.source.fetch_items().await {
        Ok(items) => {
            let week = build_week(&items, state.today());
            state.cache.set(WEEK_KEY, CachedView::Week(week.clone()));
            Json(week)
        }
        Err(e) => {
            warn!(error = %e, "week view unavailable, returning empty list");
            Json(Vec::new())
        }
    }
}

/// Build mediathek routes
pub fn mediathek_routes() -> Router<AppState> {
    Router::new()
        .route("/mediathek/today", get(mediathek_today))
        .route("/mediathek/week", get(mediathek_week))
}
