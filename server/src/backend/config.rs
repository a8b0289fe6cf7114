//! Server configuration from environment variables.
//!
//! | Variable                          | Default               |
//! |-----------------------------------|-----------------------|
//! | `API_HOST`                        | `0.0.0.0`             |
//! | `API_PORT`                        | `3000`                |
//! | `DATABASE_URL`                    | `sqlite:plannting.db` |
//! | `CORS_ALLOWED_ORIGIN`             | any origin            |
//! | `ASSUME_UTC_WHEN_OFFSET_MISSING`  | `true`                |
//!
//! A `.env` file is honoured when present (see [`AppConfig::from_env`]).

use std::net::{IpAddr, SocketAddr};
use thiserror::Error;

use crate::backend::domain::OffsetPolicy;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE_URL: &str = "sqlite:plannting.db";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub host: IpAddr,
    pub port: u16,
    /// `None` allows any origin
    pub cors_allowed_origin: Option<String>,
}

impl ApiConfig {
    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: DEFAULT_PORT,
            cors_allowed_origin: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    pub time: OffsetPolicy,
}

impl AppConfig {
    /// Load `.env` (if any) and read the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = get("API_HOST")
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                key: "API_HOST",
                reason: e.to_string(),
            })?;

        let port = match get("API_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                key: "API_PORT",
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let assume_utc_when_offset_missing = match get("ASSUME_UTC_WHEN_OFFSET_MISSING") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| ConfigError::InvalidValue {
                key: "ASSUME_UTC_WHEN_OFFSET_MISSING",
                reason: format!("expected true or false, got '{}'", raw),
            })?,
            None => true,
        };

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                cors_allowed_origin: get("CORS_ALLOWED_ORIGIN"),
            },
            database: DatabaseConfig {
                url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            },
            time: OffsetPolicy {
                assume_utc_when_offset_missing,
            },
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.api, ApiConfig::default());
        assert_eq!(config.api.bind_address().to_string(), "0.0.0.0:3000");
        assert_eq!(config.database.url, "sqlite:plannting.db");
        assert!(config.time.assume_utc_when_offset_missing);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("API_HOST", "127.0.0.1"),
            ("API_PORT", "8081"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("CORS_ALLOWED_ORIGIN", "http://localhost:8080"),
            ("ASSUME_UTC_WHEN_OFFSET_MISSING", "false"),
        ])
        .unwrap();

        assert_eq!(config.api.bind_address().to_string(), "127.0.0.1:8081");
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(
            config.api.cors_allowed_origin.as_deref(),
            Some("http://localhost:8080")
        );
        assert!(!config.time.assume_utc_when_offset_missing);
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = config_from(&[("API_PORT", "  "), ("CORS_ALLOWED_ORIGIN", "")]).unwrap();

        assert_eq!(config.api.port, 3000);
        assert_eq!(config.api.cors_allowed_origin, None);
    }

    #[test]
    fn test_invalid_values_name_the_key() {
        let port = config_from(&[("API_PORT", "eighty")]).unwrap_err();
        assert!(matches!(port, ConfigError::InvalidValue { key: "API_PORT", .. }));

        let flag = config_from(&[("ASSUME_UTC_WHEN_OFFSET_MISSING", "maybe")]).unwrap_err();
        assert!(flag.to_string().contains("ASSUME_UTC_WHEN_OFFSET_MISSING"));

        let host = config_from(&[("API_HOST", "not-an-ip")]).unwrap_err();
        assert!(matches!(host, ConfigError::InvalidValue { key: "API_HOST", .. }));
    }
}
