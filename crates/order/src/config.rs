//! Order service configuration loaded from environment variables.

use std::time::Duration;

use crate::payment::RetryPolicy;

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `3000`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT`: `json` for JSON log lines, anything else for plain text
/// - `DATABASE_URL`: Postgres connection string; in-memory store when unset
/// - `PAYMENT_SERVICE_URL`: payment service base URL (default: `"http://127.0.0.1:3001"`)
/// - `PAYMENT_MAX_ATTEMPTS`, `PAYMENT_BACKOFF_MS`, `PAYMENT_ATTEMPT_TIMEOUT_MS`:
///   retry policy overrides (defaults: 5, 1000, 2000)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_json: bool,
    pub database_url: Option<String>,
    pub payment_service_url: String,
    pub payment_retry: RetryPolicy,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let retry_defaults = defaults.payment_retry.clone();

        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: parse_env("PORT").unwrap_or(defaults.port),
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
            log_json: std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")),
            database_url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|url| !url.is_empty()),
            payment_service_url: std::env::var("PAYMENT_SERVICE_URL")
                .unwrap_or(defaults.payment_service_url),
            payment_retry: RetryPolicy {
                max_attempts: parse_env("PAYMENT_MAX_ATTEMPTS")
                    .unwrap_or(retry_defaults.max_attempts),
                backoff_step: parse_env("PAYMENT_BACKOFF_MS")
                    .map(Duration::from_millis)
                    .unwrap_or(retry_defaults.backoff_step),
                attempt_timeout: parse_env("PAYMENT_ATTEMPT_TIMEOUT_MS")
                    .map(Duration::from_millis)
                    .unwrap_or(retry_defaults.attempt_timeout),
                ..retry_defaults
            },
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            log_json: false,
            database_url: None,
            payment_service_url: "http://127.0.0.1:3001".to_string(),
            payment_retry: RetryPolicy::default(),
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
