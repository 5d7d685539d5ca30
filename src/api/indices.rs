//! Market indices route group.

use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::Router;

use crate::api::error::ApiError;
use crate::api::relay_get;
use crate::http::server::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/indices", get(get_indices))
}

async fn get_indices(State(state): State<AppState>) -> Result<Response, ApiError> {
    relay_get(&state, "/indices", &[]).await
}
