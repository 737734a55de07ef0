//! HTTP feed server for regal-rss.
//!
//! Serves the cached film listing as RSS, refreshing from the upstream
//! listing API when the cache is stale.

pub mod error;
pub mod feed;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use feed::{FeedService, FeedSnapshot};
pub use server::{AppState, ServerError, build_router, run_server};
