//! SQLite-backed cache for the film listing.
//!
//! This module provides a small persistent cache using SQLite with async
//! access via tokio-rusqlite. It holds:
//!
//! - `items`: rows from the latest fetches, pruned by age
//! - `last_update`: a single timestamp marking the last refresh
//!
//! Timestamps are stored as RFC 3339 UTC strings so they compare in time order.

pub mod connection;
pub mod items;
pub mod last_update;
pub mod migrations;

pub use crate::Error;

pub use connection::CacheDb;
pub use items::{Item, NewItem};

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a timestamp the way it is stored.
pub(crate) fn encode_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp.
pub(crate) fn decode_ts(raw: &str) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|_| Error::BadTimestamp(raw.to_string()))
}
