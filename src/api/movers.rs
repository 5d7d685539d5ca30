//! Market movers route group: most active, top gainers, top losers.

use axum::extract::{Query, State};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::relay_get;
use crate::http::server::AppState;

/// Result-set sizes the upstream supports.
const COUNTS: &[u32] = &[25, 50, 100];

#[derive(Debug, Deserialize)]
pub struct MoverParams {
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_count() -> u32 {
    25
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/actives", get(get_actives))
        .route("/gainers", get(get_gainers))
        .route("/losers", get(get_losers))
}

async fn get_actives(
    State(state): State<AppState>,
    Query(params): Query<MoverParams>,
) -> Result<Response, ApiError> {
    movers(&state, "/actives", params).await
}

async fn get_gainers(
    State(state): State<AppState>,
    Query(params): Query<MoverParams>,
) -> Result<Response, ApiError> {
    movers(&state, "/gainers", params).await
}

async fn get_losers(
    State(state): State<AppState>,
    Query(params): Query<MoverParams>,
) -> Result<Response, ApiError> {
    movers(&state, "/losers", params).await
}

async fn movers(state: &AppState, path: &str, params: MoverParams) -> Result<Response, ApiError> {
    if !COUNTS.contains(&params.count) {
        return Err(ApiError::BadRequest(format!(
            "count must be one of {COUNTS:?}"
        )));
    }
    relay_get(state, path, &[("count", params.count.to_string())]).await
}
