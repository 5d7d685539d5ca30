//! Route groups.
//!
//! Versioned groups (mounted under `/v1`): quotes, historical prices,
//! indicators, indices, movers, similar stocks, finance news, search,
//! sectors, and the SSE quote stream. Unprefixed groups: service metadata /
//! health, and the websocket group.
//!
//! Every versioned handler follows one shape: parse typed query parameters,
//! acquire the shared session from app state, perform one upstream call, and
//! relay status and body. Handlers never interpret the financial payload.

pub mod error;
pub mod health;
pub mod historical;
pub mod indicators;
pub mod indices;
pub mod movers;
pub mod news;
pub mod quotes;
pub mod search;
pub mod sectors;
pub mod similar;
pub mod sockets;
pub mod stream;

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;
use axum::Router;

use crate::http::server::AppState;
use crate::observability::metrics;
use self::error::ApiError;

/// All route groups served under the `/v1` prefix.
pub fn v1_router() -> Router<AppState> {
    Router::new()
        .merge(quotes::router())
        .merge(historical::router())
        .merge(indicators::router())
        .merge(indices::router())
        .merge(movers::router())
        .merge(similar::router())
        .merge(news::router())
        .merge(search::router())
        .merge(sectors::router())
        .merge(stream::router())
}

/// Route groups mounted without a prefix.
pub fn root_router() -> Router<AppState> {
    Router::new().merge(health::router()).merge(sockets::router())
}

/// Perform one upstream GET with the shared session and relay the answer.
///
/// The session is acquired through the manager, so a handler that somehow
/// runs before the eager startup acquire still constructs it transparently.
pub(crate) async fn relay_get(
    state: &AppState,
    path: &str,
    query: &[(&str, String)],
) -> Result<Response, ApiError> {
    let session = state.sessions.acquire().await?;
    let url = format!(
        "{}{}",
        state.config.upstream.base_url.trim_end_matches('/'),
        path
    );

    let upstream = session
        .http()
        .get(&url)
        .query(query)
        .send()
        .await
        .map_err(ApiError::from_transport)?;

    let status =
        StatusCode::from_u16(upstream.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = upstream
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| HeaderValue::from_bytes(v.as_bytes()).ok())
        .unwrap_or_else(|| HeaderValue::from_static("application/json"));
    let body = upstream.bytes().await.map_err(ApiError::from_transport)?;

    metrics::record_upstream_response(path, status.as_u16());

    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .map_err(|e| ApiError::Upstream(e.to_string()))
}

/// Normalize a comma-separated ticker list: trim, uppercase, drop blanks.
pub(crate) fn normalize_symbols(raw: &str) -> Result<String, ApiError> {
    let symbols: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_uppercase)
        .collect();

    if symbols.is_empty() {
        return Err(ApiError::BadRequest(
            "symbols must contain at least one ticker".into(),
        ));
    }
    Ok(symbols.join(","))
}
