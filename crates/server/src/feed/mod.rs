//! Feed building: cache refresh policy and document rendering.

pub mod index;
pub mod refresh;
pub mod rss;

pub use index::render_index;
pub use refresh::{FeedService, FeedSnapshot};
pub use rss::{Channel, render_rss};
