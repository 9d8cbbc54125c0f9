//! mediathek-server library
//!
//! HTTP API over the mediathek scraper:
//! - `GET /health`
//! - `GET /mediathek/today`
//! - `GET /mediathek/week`
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use mediathek_core::{MediathekScraper, Settings};
//! use mediathek_server::{AppState, build_router};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::from_env()?;
//! let scraper = MediathekScraper::with_config(settings.client_config())?;
//! let app = build_router(AppState::new(Arc::new(scraper), &settings));
//!
//! let listener = tokio::net::TcpListener::bind(settings.bind_addr).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use axum::Router;
use chrono::NaiveDate;
use chrono_tz::Tz;
use mediathek_core::{Clock, DayGroup, ItemSource, MediathekItem, Settings, TtlCache, today_in};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

pub mod api;
pub mod error;

pub use error::ApiError;

/// Value stored in the result cache, one variant per view
#[derive(Debug, Clone)]
pub enum CachedView {
    Today(Vec<MediathekItem>),
    Week(Vec<DayGroup>),
}

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Produces the current probed item list
    pub source: Arc<dyn ItemSource>,
    /// Computed views, keyed "today" and "week"
    pub cache: Arc<TtlCache<CachedView>>,
    /// Zone deciding which calendar day is "today"
    pub timezone: Tz,
    /// Pinned calendar day overriding the clock, if set
    pub fixed_today: Option<NaiveDate>,
}

impl AppState {
    /// Create new application state with a system-clock cache
    pub fn new(source: Arc<dyn ItemSource>, settings: &Settings) -> Self {
        Self {
            source,
            cache: Arc::new(TtlCache::new(settings.cache_ttl)),
            timezone: settings.timezone,
            fixed_today: None,
        }
    }

    /// Create new application state with a cache reading from `clock`
    pub fn with_clock(
        source: Arc<dyn ItemSource>,
        settings: &Settings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            source,
            cache: Arc::new(TtlCache::with_clock(settings.cache_ttl, clock)),
            timezone: settings.timezone,
            fixed_today: None,
        }
    }

    /// Pin "today" to `date` instead of reading the clock
    pub fn with_fixed_today(mut self, date: NaiveDate) -> Self {
        self.fixed_today = Some(date);
        self
    }

    /// Calendar day the views are built for
    pub fn today(&self) -> NaiveDate {
        self.fixed_today.unwrap_or_else(|| today_in(self.timezone))
    }
}

/// Build application router
///
/// All routes are public and allow any origin.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::mediathek_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(error::panic_response))
        .with_state(state)
}
