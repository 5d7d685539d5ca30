//! Quote route group: full and simplified quotes for one or more tickers.

use axum::extract::{Query, State};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::{normalize_symbols, relay_get};
use crate::http::server::AppState;

#[derive(Debug, Deserialize)]
pub struct QuoteParams {
    /// Comma-separated ticker list, e.g. `AAPL,MSFT`.
    pub symbols: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/quotes", get(get_quotes))
        .route("/simple-quotes", get(get_simple_quotes))
}

async fn get_quotes(
    State(state): State<AppState>,
    Query(params): Query<QuoteParams>,
) -> Result<Response, ApiError> {
    let symbols = normalize_symbols(&params.symbols)?;
    relay_get(&state, "/quotes", &[("symbols", symbols)]).await
}

async fn get_simple_quotes(
    State(state): State<AppState>,
    Query(params): Query<QuoteParams>,
) -> Result<Response, ApiError> {
    let symbols = normalize_symbols(&params.symbols)?;
    relay_get(&state, "/simple-quotes", &[("symbols", symbols)]).await
}
