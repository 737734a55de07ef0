//! HTTP routes.

pub mod health;
pub mod index;
pub mod regal;

pub use regal::{FEED_PATH, FeedParams, RSS_CONTENT_TYPE};
