//! Seller portal configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SELLER_HOST` - Bind address (default: 127.0.0.1)
//! - `SELLER_PORT` - Listen port (default: 3001)
//! - `SELLER_ID` - Dataset user the portal acts for (default: 1)
//! - `SELLER_STATIC_DIR` - Directory served under `/static`; product photos
//!   are shared with the storefront (default: `crates/storefront/static`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `LOG_FORMAT` - `json` for structured logs, anything else for text

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

use hotslice_core::UserId;

const DEFAULT_STATIC_DIR: &str = "crates/storefront/static";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Seller portal configuration.
#[derive(Debug, Clone)]
pub struct SellerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// The shop this portal manages.
    pub seller_id: UserId,
    pub static_dir: PathBuf,
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
    /// Emit logs as JSON lines.
    pub log_json: bool,
}

impl SellerConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            host: parse_or(&lookup, "SELLER_HOST", "127.0.0.1")?,
            port: parse_or(&lookup, "SELLER_PORT", "3001")?,
            seller_id: parse_or(&lookup, "SELLER_ID", "1")?,
            static_dir: lookup("SELLER_STATIC_DIR")
                .map_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR), PathBuf::from),
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
            log_json: lookup("LOG_FORMAT").is_some_and(|format| format.eq_ignore_ascii_case("json")),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for SellerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3001,
            seller_id: UserId::new(1),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            sentry_dsn: None,
            sentry_environment: None,
            log_json: false,
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    raw.trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SellerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3001");
        assert_eq!(config.seller_id, UserId::new(1));
        assert_eq!(config.static_dir, PathBuf::from("crates/storefront/static"));
        assert!(!config.log_json);
    }

    #[test]
    fn test_seller_id_override() {
        let config = SellerConfig::from_lookup(|key| (key == "SELLER_ID").then(|| " 3 ".to_string()))
            .unwrap();
        assert_eq!(config.seller_id, UserId::new(3));
    }

    #[test]
    fn test_invalid_values() {
        let err = SellerConfig::from_lookup(|key| (key == "SELLER_ID").then(|| "shop".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("SELLER_ID"));

        assert!(
            SellerConfig::from_lookup(|key| (key == "SELLER_PORT").then(|| "99999".to_string()))
                .is_err()
        );
    }
}
