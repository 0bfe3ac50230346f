//! Environment-driven server configuration.
//!
//! `.env` is loaded by `main` via `dotenvy` before [`ApiConfig::from_env`] runs.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `DATABASE_URL` | `postgres://localhost/recipe_book` |
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `5000` |
//! | `ALLOWED_ORIGINS` | `http://localhost:3000,http://localhost:5173` |
//! | `DB_MAX_CONNECTIONS` | `10` |
//! | `DB_CONNECT_TIMEOUT_SECS` | `30` |
//! | `LOG_FORMAT` | `text` (`json` for structured output) |
//! | `LOG_FILE` | unset (stdout) |
//! | `LOG_ANSI` | unset (auto-detect) |

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderValue;
use tracing::warn;

use recipe_core::{defaults, Error, Result};
use recipe_db::pool::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_MAX_CONNECTIONS};
use recipe_db::PoolConfig;

/// Origins allowed when `ALLOWED_ORIGINS` is unset or empty.
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<HeaderValue>,
    pub db_max_connections: u32,
    pub db_connect_timeout: Duration,
    pub log_format: LogFormat,
    pub log_file: Option<String>,
    pub log_ansi: Option<bool>,
}

impl ApiConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| defaults::DATABASE_URL.to_string()),
            host: lookup("HOST").unwrap_or_else(|| defaults::HOST.to_string()),
            port: parse_or("PORT", lookup("PORT"), defaults::PORT),
            allowed_origins: parse_allowed_origins(lookup("ALLOWED_ORIGINS").as_deref()),
            db_max_connections: parse_or(
                "DB_MAX_CONNECTIONS",
                lookup("DB_MAX_CONNECTIONS"),
                DEFAULT_MAX_CONNECTIONS,
            ),
            db_connect_timeout: Duration::from_secs(parse_or(
                "DB_CONNECT_TIMEOUT_SECS",
                lookup("DB_CONNECT_TIMEOUT_SECS"),
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )),
            log_format,
            log_file: lookup("LOG_FILE").filter(|s| !s.trim().is_empty()),
            log_ansi: lookup("LOG_ANSI").map(|v| v == "true" || v == "1"),
        }
    }

    /// Reject settings the server cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.database_url.trim().is_empty() {
            return Err(Error::Config("DATABASE_URL is empty".to_string()));
        }
        if self.allowed_origins.is_empty() {
            return Err(Error::Config(
                "ALLOWED_ORIGINS contains no valid origin".to_string(),
            ));
        }
        Ok(())
    }

    /// Bind address in `host:port` form.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Pool settings derived from this configuration.
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig::new()
            .max_connections(self.db_max_connections)
            .connect_timeout(self.db_connect_timeout)
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match raw {
        None => default,
        Some(value) => value.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value '{value}': {e}, using default: {default}");
            default
        }),
    }
}

/// Parse a comma-separated CORS origin whitelist.
///
/// Falls back to [`DEFAULT_ALLOWED_ORIGINS`] when unset or blank. Entries that
/// are not valid header values are skipped with a warning.
pub fn parse_allowed_origins(raw: Option<&str>) -> Vec<HeaderValue> {
    let origins_str = match raw {
        Some(s) if !s.trim().is_empty() => s,
        _ => DEFAULT_ALLOWED_ORIGINS,
    };

    origins_str
        .split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ApiConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.database_url, defaults::DATABASE_URL);
        assert_eq!(config.port, 5000);
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
        assert_eq!(config.db_max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(config.log_file.is_none());
        assert!(config.log_ansi.is_none());
        assert_eq!(config.allowed_origins.len(), 2);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://db/recipes"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("DB_MAX_CONNECTIONS", "3"),
            ("DB_CONNECT_TIMEOUT_SECS", "5"),
            ("LOG_FORMAT", "json"),
            ("LOG_FILE", "/var/log/recipe-api.log"),
            ("LOG_ANSI", "0"),
        ]);
        assert_eq!(config.database_url, "postgres://db/recipes");
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.db_max_connections, 3);
        assert_eq!(config.db_connect_timeout, Duration::from_secs(5));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.log_file.as_deref(), Some("/var/log/recipe-api.log"));
        assert_eq!(config.log_ansi, Some(false));

        let pool = config.pool_config();
        assert_eq!(pool.max_connections, 3);
        assert_eq!(pool.connect_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_port_falls_back_to_default() {
        let config = config_from(&[("PORT", "not-a-port")]);
        assert_eq!(config.port, 5000);

        let config = config_from(&[("PORT", "70000")]);
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn test_validate() {
        assert!(config_from(&[]).validate().is_ok());

        let err = config_from(&[("DATABASE_URL", " ")]).validate().unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = config_from(&[("ALLOWED_ORIGINS", "bad\norigin")])
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("ALLOWED_ORIGINS"));
    }

    #[test]
    fn test_parse_allowed_origins() {
        let origins = parse_allowed_origins(Some("https://a.example, https://b.example ,,"));
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[0], "https://a.example");
        assert_eq!(origins[1], "https://b.example");
    }

    #[test]
    fn test_blank_allowed_origins_use_defaults() {
        let origins = parse_allowed_origins(Some("   "));
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[0], "http://localhost:3000");
    }

    #[test]
    fn test_invalid_origin_is_skipped() {
        let origins = parse_allowed_origins(Some("https://ok.example,bad\norigin"));
        assert_eq!(origins.len(), 1);
    }
}
