//! `GET /regal` - the RSS feed.

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::{Router, routing::get};

use crate::error::ApiError;
use crate::feed::{Channel, render_rss};
use crate::server::AppState;

pub const FEED_PATH: &str = "/regal";
pub const RSS_CONTENT_TYPE: &str = "application/rss+xml";

/// Query parameters of the feed route.
///
/// Both are kept as raw strings and read leniently: anything that does not
/// start with a number counts as 0.
#[derive(Debug, Default)]
pub struct FeedParams {
    pub count: Option<String>,
    pub link_comments: Option<String>,
}

impl FeedParams {
    /// Collect the known keys from raw query pairs. A repeated key keeps its last value.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "count" => params.count = Some(value),
                "link_comments" => params.link_comments = Some(value),
                _ => {}
            }
        }
        params
    }

    /// Requested item count; absent, zero or negative values fall back to `default`.
    pub fn count(&self, default: u32) -> usize {
        match self.count.as_deref().map(leading_int) {
            Some(n) if n > 0 => usize::try_from(n).unwrap_or(usize::MAX),
            _ => default as usize,
        }
    }

    /// Whether `link_comments=1` was passed.
    pub fn link_comments(&self) -> bool {
        self.link_comments.as_deref().map(leading_int) == Some(1)
    }
}

/// Integer prefix of `raw`, or 0 when there is none.
///
/// `"12"` and `"12abc"` read as 12, `"-3"` as -3, `"abc"` and `""` as 0.
pub fn leading_int(raw: &str) -> i64 {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let n = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, b| acc.saturating_mul(10).saturating_add(i64::from(b - b'0')));

    if negative { -n } else { n }
}

/// GET /regal
async fn feed(State(state): State<AppState>, Query(pairs): Query<Vec<(String, String)>>) -> Result<Response, ApiError> {
    let params = FeedParams::from_pairs(pairs);
    let count = params.count(state.config.default_count);
    tracing::debug!(count, link_comments = params.link_comments(), "serving feed");

    let snapshot = state.feed.snapshot(count).await?;
    let channel =
        Channel { link: &state.config.site_link, self_href: &state.config.self_uri, last_build: snapshot.last_build };
    let xml = render_rss(&channel, &snapshot.items);

    Ok(([(header::CONTENT_TYPE, RSS_CONTENT_TYPE)], xml).into_response())
}

/// Feed routes
pub fn router() -> Router<AppState> {
    Router::new().route(FEED_PATH, get(feed))
}
