//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (REGAL_*, plus DATABASE_URL)
//! 2. TOML config file (if REGAL_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (REGAL_*)
/// 2. `DATABASE_URL`, mapped onto `db_path`
/// 3. TOML config file (if REGAL_CONFIG_FILE set)
/// 4. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the SQLite cache database.
    ///
    /// Set via REGAL_DB_PATH or DATABASE_URL.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Address the HTTP server binds to.
    ///
    /// Set via REGAL_BIND_ADDR environment variable.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Base URL of the listing API, without the quickbook path.
    #[serde(default = "default_upstream_base_url")]
    pub upstream_base_url: String,

    /// Tenant segment of the quickbook path.
    #[serde(default = "default_tenant_id")]
    pub tenant_id: String,

    /// Theater whose listing is fetched.
    #[serde(default = "default_cinema_id")]
    pub cinema_id: String,

    /// Seconds after which cached items are stale.
    ///
    /// Set via REGAL_UPDATE_INTERVAL_SECS environment variable.
    #[serde(default = "default_update_interval_secs")]
    pub update_interval_secs: u64,

    /// HTTP request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// User-Agent string for upstream requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// URL the feed advertises as its own location (`atom:link rel="self"`).
    #[serde(default = "default_self_uri")]
    pub self_uri: String,

    /// Channel `<link>` of the feed.
    #[serde(default = "default_site_link")]
    pub site_link: String,

    /// Item count used when a request gives none or a non-positive one.
    #[serde(default = "default_count")]
    pub default_count: u32,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("/tmp/regal.db")
}

fn default_bind_addr() -> String {
    "127.0.0.1:4567".into()
}

fn default_upstream_base_url() -> String {
    "https://www.regmovies.com/us/data-api-service/v1".into()
}

fn default_tenant_id() -> String {
    "10110".into()
}

fn default_cinema_id() -> String {
    "0354".into()
}

fn default_update_interval_secs() -> u64 {
    600
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_user_agent() -> String {
    "regal-rss/0.1".into()
}

fn default_self_uri() -> String {
    "http://api.kanna.in/hnbest".into()
}

fn default_site_link() -> String {
    "https://www.regmovies.com/".into()
}

fn default_count() -> u32 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            bind_addr: default_bind_addr(),
            upstream_base_url: default_upstream_base_url(),
            tenant_id: default_tenant_id(),
            cinema_id: default_cinema_id(),
            update_interval_secs: default_update_interval_secs(),
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
            self_uri: default_self_uri(),
            site_link: default_site_link(),
            default_count: default_count(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Staleness interval as a chrono duration.
    pub fn update_interval(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.update_interval_secs as i64)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("REGAL_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        if let Ok(url) = std::env::var("DATABASE_URL") {
            figment = figment.merge(Serialized::default("db_path", db_path_from_url(&url)?));
        }

        figment = figment.merge(
            Env::prefixed("REGAL_")
                .ignore(&["CONFIG_FILE", "TENANT_ID", "CINEMA_ID"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        for (var, key) in VERBATIM_ENV_KEYS {
            if let Ok(raw) = std::env::var(var) {
                figment = figment.merge(Serialized::default(key, raw));
            }
        }

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}

/// Identifiers read from the environment as-is.
///
/// Figment would parse `0354` as the integer 354, dropping the leading zero
/// and failing to extract into a `String`.
const VERBATIM_ENV_KEYS: [(&str, &str); 2] = [("REGAL_TENANT_ID", "tenant_id"), ("REGAL_CINEMA_ID", "cinema_id")];

/// Map a `DATABASE_URL` value onto a SQLite file path.
///
/// Accepts `sqlite://<path>` (so `sqlite:///tmp/x.db` is `/tmp/x.db`) or a bare path.
fn db_path_from_url(url: &str) -> Result<PathBuf, ConfigError> {
    if let Some(path) = url.strip_prefix("sqlite://") {
        return Ok(PathBuf::from(path));
    }
    if url.contains("://") {
        return Err(ConfigError::Invalid {
            field: "DATABASE_URL".into(),
            reason: format!("only sqlite:// URLs are supported, got {url}"),
        });
    }
    Ok(PathBuf::from(url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.db_path, PathBuf::from("/tmp/regal.db"));
        assert_eq!(config.bind_addr, "127.0.0.1:4567");
        assert_eq!(config.tenant_id, "10110");
        assert_eq!(config.cinema_id, "0354");
        assert_eq!(config.update_interval_secs, 600);
        assert_eq!(config.default_count, 30);
        assert_eq!(config.user_agent, "regal-rss/0.1");
    }

    #[test]
    fn test_durations() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(20_000));
        assert_eq!(config.update_interval(), chrono::Duration::seconds(600));
    }

    #[test]
    fn test_db_path_from_url() {
        assert_eq!(db_path_from_url("sqlite:///tmp/regal.db").unwrap(), PathBuf::from("/tmp/regal.db"));
        assert_eq!(db_path_from_url("./local.db").unwrap(), PathBuf::from("./local.db"));
        assert!(matches!(
            db_path_from_url("postgres://localhost/regal"),
            Err(ConfigError::Invalid { field, .. }) if field == "DATABASE_URL"
        ));
    }

    #[test]
    fn test_load_layers_env_over_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("DATABASE_URL", "sqlite:///var/lib/regal.db");
            jail.set_env("REGAL_UPDATE_INTERVAL_SECS", "120");
            jail.set_env("REGAL_CINEMA_ID", "0999");

            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.db_path, PathBuf::from("/var/lib/regal.db"));
            assert_eq!(config.update_interval_secs, 120);
            assert_eq!(config.cinema_id, "0999");
            assert_eq!(config.tenant_id, "10110");
            Ok(())
        });
    }

    #[test]
    fn test_load_keeps_leading_zero_ids() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("REGAL_CINEMA_ID", "0354");
            jail.set_env("REGAL_TENANT_ID", "10110");

            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.cinema_id, "0354");
            assert_eq!(config.tenant_id, "10110");
            Ok(())
        });
    }

    #[test]
    fn test_load_env_ids_override_toml() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("regal.toml", "cinema_id = \"0100\"\n")?;
            jail.set_env("REGAL_CONFIG_FILE", "regal.toml");
            jail.set_env("REGAL_CINEMA_ID", "0042");

            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.cinema_id, "0042");
            Ok(())
        });
    }

    #[test]
    fn test_load_toml_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("regal.toml", "site_link = \"https://example.com/\"\ndefault_count = 10\n")?;
            jail.set_env("REGAL_CONFIG_FILE", "regal.toml");

            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.site_link, "https://example.com/");
            assert_eq!(config.default_count, 10);
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid_env() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("REGAL_UPDATE_INTERVAL_SECS", "0");
            assert!(matches!(AppConfig::load(), Err(ConfigError::Invalid { .. })));
            Ok(())
        });
    }
}
