//! Similar-stocks route group.

use axum::extract::{Query, State};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::{normalize_symbols, relay_get};
use crate::http::server::AppState;

#[derive(Debug, Deserialize)]
pub struct SimilarParams {
    pub symbol: String,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    10
}

pub fn router() -> Router<AppState> {
    Router::new().route("/similar-stocks", get(get_similar_stocks))
}

async fn get_similar_stocks(
    State(state): State<AppState>,
    Query(params): Query<SimilarParams>,
) -> Result<Response, ApiError> {
    let symbol = normalize_symbols(&params.symbol)?;
    if params.limit == 0 || params.limit > 50 {
        return Err(ApiError::BadRequest(
            "limit must be between 1 and 50".into(),
        ));
    }

    relay_get(
        &state,
        "/similar-stocks",
        &[("symbol", symbol), ("limit", params.limit.to_string())],
    )
    .await
}
