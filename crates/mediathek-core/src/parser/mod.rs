//! HTML parsers for the mediathek listing
//!
//! Contains the row parser and the date/time token normalizer it uses.

pub mod datetime;
pub mod listing;

pub use datetime::parse_datetime_token;
pub use listing::{parse_listing, parse_listing_with_base};
