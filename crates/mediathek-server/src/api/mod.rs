//! HTTP API handlers for mediathek-server

pub mod health;
pub mod mediathek;

pub use health::health_routes;
pub use mediathek::{mediathek_routes, mediathek_today, mediathek_week};
