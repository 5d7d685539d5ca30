//! Symbol search route group.

use axum::extract::{Query, State};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::relay_get;
use crate::http::server::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
    #[serde(default = "default_hits")]
    pub hits: u32,
}

fn default_hits() -> u32 {
    10
}

pub fn router() -> Router<AppState> {
    Router::new().route("/search", get(get_search))
}

async fn get_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Response, ApiError> {
    let query = params.query.trim().to_string();
    if query.is_empty() {
        return Err(ApiError::BadRequest("query must not be empty".into()));
    }
    if params.hits == 0 || params.hits > 20 {
        return Err(ApiError::BadRequest("hits must be between 1 and 20".into()));
    }

    relay_get(
        &state,
        "/search",
        &[("query", query), ("hits", params.hits.to_string())],
    )
    .await
}
