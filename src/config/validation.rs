//! Configuration validation.
//!
//! Serde handles syntactic checks; this module performs the semantic ones:
//! addresses must parse, the upstream URL must be usable, timeouts must be
//! nonzero, and the CORS policy must be internally consistent. All errors are
//! collected and returned together, not just the first.

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::AppConfig;

/// A single semantic configuration problem.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a valid socket address")]
    BindAddress(String),

    #[error("upstream.base_url {url:?} is invalid: {reason}")]
    UpstreamUrl { url: String, reason: String },

    #[error("session.{field} must be nonzero")]
    ZeroTimeout { field: &'static str },

    #[error("cors.allow_credentials cannot be combined with a wildcard origin")]
    CredentialsWithWildcard,

    #[error("cors.allow_origins entry {0:?} is not a valid origin")]
    CorsOrigin(String),

    #[error("observability.metrics_address {0:?} is not a valid socket address")]
    MetricsAddress(String),
}

/// Validate a parsed configuration, returning every problem found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    match Url::parse(&config.upstream.base_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError::UpstreamUrl {
            url: config.upstream.base_url.clone(),
            reason: format!("unsupported scheme {:?}", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError::UpstreamUrl {
            url: config.upstream.base_url.clone(),
            reason: e.to_string(),
        }),
    }

    for (field, value) in [
        ("request_timeout_secs", config.session.request_timeout_secs),
        ("connect_timeout_secs", config.session.connect_timeout_secs),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroTimeout { field });
        }
    }

    let wildcard = config.cors.allow_origins.iter().any(|o| o == "*");
    if wildcard && config.cors.allow_credentials {
        errors.push(ValidationError::CredentialsWithWildcard);
    }
    if !wildcard {
        for origin in &config.cors.allow_origins {
            if origin.parse::<axum::http::HeaderValue>().is_err() {
                errors.push(ValidationError::CorsOrigin(origin.clone()));
            }
        }
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn collects_every_error() {
        let mut config = AppConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.upstream.base_url = "ftp://example.com".into();
        config.session.request_timeout_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3, "expected all three problems: {errors:?}");
    }

    #[test]
    fn rejects_credentials_with_wildcard_origin() {
        let mut config = AppConfig::default();
        config.cors.allow_credentials = true;

        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::CredentialsWithWildcard)));
    }

    #[test]
    fn accepts_credentials_with_explicit_origins() {
        let mut config = AppConfig::default();
        config.cors.allow_origins = vec!["https://app.example.com".into()];
        config.cors.allow_credentials = true;

        assert!(validate_config(&config).is_ok());
    }
}
