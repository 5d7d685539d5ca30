//! Service metadata and liveness endpoints, mounted without prefix.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{json, Value};

use crate::http::server::AppState;

#[derive(Serialize)]
pub struct ServiceInfo {
    pub title: String,
    pub version: String,
    pub description: String,
}

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub session_present: bool,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health))
        .route("/ping", get(ping))
}

async fn service_info(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        title: state.config.api.title.clone(),
        version: state.config.api.version.clone(),
        description: state.config.api.description.clone(),
    })
}

async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "operational",
        session_present: state.sessions.is_present().await,
    })
}

async fn ping() -> Json<Value> {
    Json(json!({ "message": "pong" }))
}
