//! Finance news route group.

use axum::extract::{Query, State};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::{normalize_symbols, relay_get};
use crate::http::server::AppState;

#[derive(Debug, Deserialize)]
pub struct NewsParams {
    /// Restrict the feed to one ticker; omitted means general market news.
    pub symbol: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/news", get(get_news))
}

async fn get_news(
    State(state): State<AppState>,
    Query(params): Query<NewsParams>,
) -> Result<Response, ApiError> {
    let mut query = Vec::new();
    if let Some(symbol) = params.symbol.as_deref() {
        query.push(("symbol", normalize_symbols(symbol)?));
    }
    relay_get(&state, "/news", &query).await
}
