//! Listing API response types and normalization.
//!
//! The API has shipped two shapes for the same listing:
//!
//! - `{"body": {"films": [{"link", "name", "length"}]}}`
//! - `{"shows": [{"Film": [{"Link", "Title", "Length"}]}]}`
//!
//! Both are accepted; only the first show day of the second shape is used.

use regal_core::NewItem;
use serde::Deserialize;

use super::UpstreamError;

/// Raw response from the film-events endpoint.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListingResponse {
    Body { body: FilmsBody },
    Shows { shows: Vec<ShowDay> },
}

/// `body` object of the first shape.
#[derive(Debug, Deserialize)]
pub struct FilmsBody {
    pub films: Vec<Film>,
}

/// One entry of `shows` in the second shape.
#[derive(Debug, Deserialize)]
pub struct ShowDay {
    #[serde(rename = "Film", alias = "films")]
    pub films: Vec<Film>,
}

/// Individual film from either shape.
#[derive(Debug, Clone, Deserialize)]
pub struct Film {
    #[serde(alias = "Link")]
    pub link: String,
    #[serde(alias = "Title")]
    pub name: String,
    /// Running time in minutes.
    #[serde(alias = "Length")]
    pub length: i64,
}

impl ListingResponse {
    /// Decode a response body.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, UpstreamError> {
        serde_json::from_slice(bytes).map_err(|e| UpstreamError::Parse(e.to_string()))
    }

    /// Flatten into the film list.
    ///
    /// Fails if the second shape has no show days.
    pub fn into_films(self) -> Result<Vec<Film>, UpstreamError> {
        match self {
            ListingResponse::Body { body } => Ok(body.films),
            ListingResponse::Shows { shows } => shows
                .into_iter()
                .next()
                .map(|day| day.films)
                .ok_or_else(|| UpstreamError::Parse("`shows` is empty".to_string())),
        }
    }
}

impl From<Film> for NewItem {
    fn from(film: Film) -> Self {
        NewItem { url: film.link, name: film.name, length: film.length }
    }
}
