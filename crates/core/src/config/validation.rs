//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use std::net::SocketAddr;

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `bind_addr` is not a socket address
    /// - `upstream_base_url` is not an http(s) URL
    /// - `update_interval_secs` is 0 or exceeds one day
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `default_count` is 0
    /// - any identifier or link field is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_addr.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::Invalid {
                field: "bind_addr".into(),
                reason: format!("{:?} is not a socket address", self.bind_addr),
            });
        }

        if !(self.upstream_base_url.starts_with("http://") || self.upstream_base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                field: "upstream_base_url".into(),
                reason: "must be an http or https URL".into(),
            });
        }

        if self.update_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "update_interval_secs".into(),
                reason: "must be greater than 0".into(),
            });
        }
        if self.update_interval_secs > 86_400 {
            return Err(ConfigError::Invalid {
                field: "update_interval_secs".into(),
                reason: "must not exceed one day (86400s)".into(),
            });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.default_count == 0 {
            return Err(ConfigError::Invalid { field: "default_count".into(), reason: "must be at least 1".into() });
        }

        for (field, value) in [
            ("tenant_id", &self.tenant_id),
            ("cinema_id", &self.cinema_id),
            ("user_agent", &self.user_agent),
            ("self_uri", &self.self_uri),
            ("site_link", &self.site_link),
        ] {
            if value.is_empty() {
                return Err(ConfigError::Invalid { field: field.into(), reason: "must not be empty".into() });
            }
        }

        if self.update_interval_secs < 60 {
            tracing::warn!(
                interval_secs = self.update_interval_secs,
                "update interval under a minute; upstream will be hit on most requests"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_bind_addr() {
        let config = AppConfig { bind_addr: "localhost".into(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "bind_addr"));
    }

    #[test]
    fn test_validate_non_http_upstream() {
        let config = AppConfig { upstream_base_url: "ftp://example.com".into(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "upstream_base_url"));
    }

    #[test]
    fn test_validate_interval_zero() {
        let config = AppConfig { update_interval_secs: 0, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "update_interval_secs"));
    }

    #[test]
    fn test_validate_interval_exceeds_limit() {
        let config = AppConfig { update_interval_secs: 86_401, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "update_interval_secs"));
    }

    #[test]
    fn test_validate_timeout_bounds() {
        let config = AppConfig { timeout_ms: 50, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field, .. }) if field == "timeout_ms"));

        let config = AppConfig { timeout_ms: 301_000, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field, .. }) if field == "timeout_ms"));
    }

    #[test]
    fn test_validate_default_count_zero() {
        let config = AppConfig { default_count: 0, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "default_count"));
    }

    #[test]
    fn test_validate_empty_cinema_id() {
        let config = AppConfig { cinema_id: String::new(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "cinema_id"));
    }

    #[test]
    fn test_validate_edge_case_values() {
        let config = AppConfig { update_interval_secs: 1, timeout_ms: 100, default_count: 1, ..Default::default() };
        assert!(config.validate().is_ok());

        let config = AppConfig { update_interval_secs: 86_400, timeout_ms: 300_000, ..Default::default() };
        assert!(config.validate().is_ok());
    }
}
