//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default so a minimal (or absent) config file works.

use serde::{Deserialize, Serialize};

/// Root configuration for the FinanceQuery service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Cross-origin policy applied to every route.
    pub cors: CorsConfig,

    /// Shared outbound session settings.
    pub session: SessionConfig,

    /// Upstream data provider settings.
    pub upstream: UpstreamConfig,

    /// Inbound timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Service metadata served by the root endpoint.
    pub api: ApiConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
        }
    }
}

/// Cross-origin resource sharing policy.
///
/// The service fronts native apps as well as browsers, so the default allows
/// any origin. Credentialed requests require an explicit origin list;
/// validation rejects credentials combined with the wildcard.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins. `"*"` anywhere in the list means any origin.
    pub allow_origins: Vec<String>,

    /// Whether to allow credentialed requests.
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origins: vec!["*".to_string()],
            allow_credentials: false,
        }
    }
}

/// Shared session (outbound HTTP client) configuration.
///
/// Fixed at construction; the session manager never mutates these afterward.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Total per-request timeout in seconds for outbound calls.
    pub request_timeout_secs: u64,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// User-Agent header sent on every outbound request.
    pub user_agent: String,

    /// How long idle pooled connections are kept, in seconds.
    pub pool_idle_timeout_secs: u64,

    /// Maximum idle pooled connections per host.
    pub pool_max_idle_per_host: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: concat!("finance-query/", env!("CARGO_PKG_VERSION")).to_string(),
            pool_idle_timeout_secs: 90,
            pool_max_idle_per_host: 8,
        }
    }
}

/// Upstream data provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL the route groups relay to (scheme + authority; a trailing
    /// slash is tolerated).
    pub base_url: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:9000".to_string(),
        }
    }
}

/// Inbound timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Service metadata, served as JSON by the root endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            title: "FinanceQuery".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: "FinanceQuery is a simple API to query financial data. \
                It provides endpoints to get quotes, historical prices, indices, \
                market movers, similar stocks, finance news, indicators, search, \
                and sectors."
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_usable() {
        let config = AppConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8000");
        assert_eq!(config.cors.allow_origins, vec!["*"]);
        assert!(!config.cors.allow_credentials);
        assert_eq!(config.session.request_timeout_secs, 30);
        assert!(config.session.user_agent.starts_with("finance-query/"));
    }

    #[test]
    fn minimal_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "127.0.0.1:8100"

            [upstream]
            base_url = "https://data.example.com"
            "#,
        )
        .expect("minimal config should parse");

        assert_eq!(config.listener.bind_address, "127.0.0.1:8100");
        assert_eq!(config.upstream.base_url, "https://data.example.com");
        // Untouched sections fall back to defaults.
        assert_eq!(config.timeouts.request_secs, 30);
        assert!(config.observability.metrics_enabled);
    }
}
