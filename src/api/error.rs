//! Handler-facing error type and its HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::session::SessionError;

/// Errors surfaced by route handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The shared session could not be provided.
    #[error("shared session unavailable: {0}")]
    Session(#[from] SessionError),

    /// The upstream provider could not be reached or misbehaved.
    #[error("upstream request failed: {0}")]
    Upstream(String),

    /// The upstream provider did not answer in time.
    #[error("upstream request timed out")]
    UpstreamTimeout,

    /// The caller supplied unusable parameters.
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    /// Map a reqwest transport failure onto the API error space.
    pub fn from_transport(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ApiError::UpstreamTimeout
        } else {
            ApiError::Upstream(error.to_string())
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::Session(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(status = %status, error = %self, "Request failed");
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_error_classes() {
        assert_eq!(
            ApiError::BadRequest("nope".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Upstream("down".into()).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(ApiError::UpstreamTimeout.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            ApiError::Session(SessionError::Initialization("bad".into())).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
