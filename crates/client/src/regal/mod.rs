//! Regal film-events listing client.
//!
//! Fetches one theater's film listing for the Friday of the current week.
//!
//! ### Request
//!
//! - **Endpoint**: `{base}/quickbook/{tenant}/film-events/in-cinema/{cinema}/at-date/{YYYY-MM-DD}`
//! - **Query**: `attr=&lang=en_US`
//! - **Date**: recomputed on every fetch from the local calendar day.
//! - **Failures**: no retry. Timeouts, non-2xx statuses and unparsable bodies
//!   surface as `UpstreamError`.

pub mod error;
pub mod request;
pub mod response;

pub use error::UpstreamError;
pub use request::{ListingRequest, listing_date};
pub use response::{Film, ListingResponse};

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use regal_core::{AppConfig, NewItem};
use reqwest::header;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default base URL for the listing API.
const DEFAULT_BASE_URL: &str = "https://www.regmovies.com/us/data-api-service/v1";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "regal-rss/0.1";

/// Source of the current film listing.
///
/// The refresh policy only depends on this trait so it can be driven
/// without the network.
#[async_trait]
pub trait FilmSource: Send + Sync {
    /// Fetch the current listing as rows ready for the cache.
    async fn fetch_films(&self) -> Result<Vec<NewItem>, UpstreamError>;
}

/// Listing client configuration.
#[derive(Debug, Clone)]
pub struct RegalConfig {
    pub base_url: String,
    pub tenant_id: String,
    pub cinema_id: String,
    /// Request timeout (default: 20s).
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for RegalConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            tenant_id: "10110".to_string(),
            cinema_id: "0354".to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl From<&AppConfig> for RegalConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            base_url: config.upstream_base_url.clone(),
            tenant_id: config.tenant_id.clone(),
            cinema_id: config.cinema_id.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// HTTP client for the listing API.
#[derive(Debug, Clone)]
pub struct RegalClient {
    http: reqwest::Client,
    config: RegalConfig,
}

impl RegalClient {
    /// Create a new client with the given configuration.
    pub fn new(config: RegalConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| UpstreamError::Network(Arc::new(e)))?;

        Ok(Self { http, config })
    }

    /// Build the request for the listing shown on `today`.
    pub fn request_for(&self, today: NaiveDate) -> ListingRequest {
        ListingRequest {
            base_url: self.config.base_url.clone(),
            tenant_id: self.config.tenant_id.clone(),
            cinema_id: self.config.cinema_id.clone(),
            date: listing_date(today),
        }
    }

    /// Fetch and decode one listing.
    pub async fn fetch_listing(&self, req: &ListingRequest) -> Result<Vec<Film>, UpstreamError> {
        let url = req.url()?;
        let start = Instant::now();

        tracing::debug!(%url, "fetching film listing");

        let http_response = self
            .http
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = http_response.status();
        tracing::debug!(status = status.as_u16(), "listing response status");

        if status.is_client_error() || status.is_server_error() {
            return Err(UpstreamError::HttpError { status: status.as_u16() });
        }

        let bytes = http_response.bytes().await?;
        let films = ListingResponse::from_slice(&bytes)?.into_films()?;

        tracing::debug!("listing fetched in {:?}, {} films", start.elapsed(), films.len());

        Ok(films)
    }
}

#[async_trait]
impl FilmSource for RegalClient {
    async fn fetch_films(&self) -> Result<Vec<NewItem>, UpstreamError> {
        let req = self.request_for(Local::now().date_naive());
        let films = self.fetch_listing(&req).await?;
        Ok(films.into_iter().map(NewItem::from).collect())
    }
}
