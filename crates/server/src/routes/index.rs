//! `GET /` - landing page.

use axum::extract::State;
use axum::response::Html;
use axum::{Router, routing::get};

use super::regal::FEED_PATH;
use crate::feed::render_index;
use crate::server::AppState;

/// GET /
async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(FEED_PATH, state.config.default_count))
}

/// Index routes
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}
