//! Console configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Cache staleness windows and polling
//! intervals per resource live in [`crate::cache::CachePolicies`]; only the
//! default staleness is configurable here.

use std::net::SocketAddr;
use std::time::Duration;

use crate::error::ConsoleError;

/// Top-level console configuration.
///
/// Loaded once at startup via [`ConsoleConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Base URL of the platform backend API.
    pub backend_url: String,

    /// Optional bearer token sent with every backend request.
    pub backend_token: Option<String>,

    /// Request timeout for backend calls. `None` keeps transport defaults.
    pub backend_timeout: Option<Duration>,

    /// Staleness window for resources without a dedicated policy.
    pub default_stale_after: Duration,

    /// Whether near-real-time widgets are refreshed on a fixed interval.
    pub polling_enabled: bool,

    /// Capacity of the EventBus broadcast channel.
    pub event_bus_capacity: usize,

    /// Emit logs as JSON lines instead of human-readable text.
    pub log_json: bool,
}

impl ConsoleConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Config`] if `LISTEN_ADDR` is set but cannot be
    /// parsed as a [`SocketAddr`], or if `BACKEND_URL` is not an absolute URL.
    pub fn from_env() -> Result<Self, ConsoleError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ConsoleConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConsoleError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup("LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let listen_addr: SocketAddr = raw_addr
            .parse()
            .map_err(|e| ConsoleError::Config(format!("invalid LISTEN_ADDR {raw_addr}: {e}")))?;

        let backend_url = lookup("BACKEND_URL")
            .unwrap_or_else(|| "http://localhost:8080/api/v1".to_string());
        reqwest::Url::parse(&backend_url)
            .map_err(|e| ConsoleError::Config(format!("invalid BACKEND_URL {backend_url}: {e}")))?;

        let backend_token = lookup("BACKEND_TOKEN").filter(|t| !t.trim().is_empty());
        let backend_timeout = lookup("BACKEND_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        let default_stale_after = Duration::from_secs(parse_or(&lookup, "CACHE_STALE_SECS", 30));
        let polling_enabled = parse_bool_or(&lookup, "POLLING_ENABLED", true);
        let event_bus_capacity = parse_or(&lookup, "EVENT_BUS_CAPACITY", 1024);
        let log_json = lookup("LOG_FORMAT").is_some_and(|v| v.eq_ignore_ascii_case("json"));

        Ok(Self {
            listen_addr,
            backend_url,
            backend_token,
            backend_timeout,
            default_stale_after,
            polling_enabled,
            event_bus_capacity,
            log_json,
        })
    }
}

/// Parses a variable as `T`, returning `default` on missing or invalid values.
fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// Parses a variable as a boolean. Accepts `"true"`, `"1"`, `"false"`, `"0"`
/// (case-insensitive). Returns `default` otherwise.
fn parse_bool_or<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|v| v.to_ascii_lowercase()).as_deref() {
        Some("true") | Some("1") => true,
        Some("false") | Some("0") => false,
        _ => default,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let Ok(config) = ConsoleConfig::from_lookup(lookup_from(&[])) else {
            panic!("defaults should load");
        };
        assert_eq!(config.listen_addr.port(), 3000);
        assert_eq!(config.backend_url, "http://localhost:8080/api/v1");
        assert!(config.backend_token.is_none());
        assert!(config.backend_timeout.is_none());
        assert_eq!(config.default_stale_after, Duration::from_secs(30));
        assert!(config.polling_enabled);
        assert!(!config.log_json);
    }

    #[test]
    fn invalid_numbers_fall_back_to_defaults() {
        let lookup = lookup_from(&[("CACHE_STALE_SECS", "soon"), ("EVENT_BUS_CAPACITY", "-1")]);
        let Ok(config) = ConsoleConfig::from_lookup(lookup) else {
            panic!("config should load");
        };
        assert_eq!(config.default_stale_after, Duration::from_secs(30));
        assert_eq!(config.event_bus_capacity, 1024);
    }

    #[test]
    fn overrides_are_applied() {
        let lookup = lookup_from(&[
            ("LISTEN_ADDR", "127.0.0.1:9000"),
            ("BACKEND_TOKEN", "secret"),
            ("BACKEND_TIMEOUT_SECS", "5"),
            ("POLLING_ENABLED", "FALSE"),
            ("LOG_FORMAT", "json"),
        ]);
        let Ok(config) = ConsoleConfig::from_lookup(lookup) else {
            panic!("config should load");
        };
        assert_eq!(config.listen_addr.port(), 9000);
        assert_eq!(config.backend_token.as_deref(), Some("secret"));
        assert_eq!(config.backend_timeout, Some(Duration::from_secs(5)));
        assert!(!config.polling_enabled);
        assert!(config.log_json);
    }

    #[test]
    fn bad_listen_addr_is_an_error() {
        let result = ConsoleConfig::from_lookup(lookup_from(&[("LISTEN_ADDR", "nowhere")]));
        assert!(matches!(result, Err(ConsoleError::Config(_))));
    }

    #[test]
    fn relative_backend_url_is_an_error() {
        let result = ConsoleConfig::from_lookup(lookup_from(&[("BACKEND_URL", "api/v1")]));
        assert!(matches!(result, Err(ConsoleError::Config(_))));
    }
}
