//! Unified error types for regal-rss.
//!
//! Display strings carry a stable upper-case code prefix so log lines and
//! HTTP error bodies can be matched on without parsing the message.

use tokio_rusqlite::rusqlite;

/// Unified error types for the regal-rss feed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Database operation failed.
    #[error("CACHE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("CACHE_ERROR: migration failed: {0}")]
    MigrationFailed(String),

    /// A stored timestamp could not be parsed back.
    #[error("CACHE_ERROR: bad timestamp {0:?}")]
    BadTimestamp(String),

    /// The upstream listing could not be fetched or decoded.
    #[error("UPSTREAM_ERROR: {0}")]
    Upstream(String),

    /// Configuration could not be loaded.
    #[error("CONFIG_ERROR: {0}")]
    Config(String),
}

impl Error {
    /// The code prefix used in the display string.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Database(_) | Error::MigrationFailed(_) | Error::BadTimestamp(_) => "CACHE_ERROR",
            Error::Upstream(_) => "UPSTREAM_ERROR",
            Error::Config(_) => "CONFIG_ERROR",
        }
    }
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

impl From<crate::config::ConfigError> for Error {
    fn from(err: crate::config::ConfigError) -> Self {
        Error::Config(err.to_string())
    }
}
