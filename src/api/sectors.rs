//! Sector performance route group.

use axum::extract::{Path, State};
use axum::response::Response;
use axum::routing::get;
use axum::Router;

use crate::api::error::ApiError;
use crate::api::relay_get;
use crate::http::server::AppState;

/// Sector slugs the upstream recognizes.
const SECTORS: &[&str] = &[
    "basic-materials",
    "communication-services",
    "consumer-cyclical",
    "consumer-defensive",
    "energy",
    "financial-services",
    "healthcare",
    "industrials",
    "real-estate",
    "technology",
    "utilities",
];

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sectors", get(get_sectors))
        .route("/sectors/{sector}", get(get_sector_details))
}

async fn get_sectors(State(state): State<AppState>) -> Result<Response, ApiError> {
    relay_get(&state, "/sectors", &[]).await
}

async fn get_sector_details(
    State(state): State<AppState>,
    Path(sector): Path<String>,
) -> Result<Response, ApiError> {
    let sector = sector.trim().to_lowercase();
    if !SECTORS.contains(&sector.as_str()) {
        return Err(ApiError::BadRequest(format!(
            "unknown sector; expected one of {}",
            SECTORS.join(", ")
        )));
    }
    relay_get(&state, &format!("/sectors/{sector}"), &[]).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sector_slugs_are_lowercase_kebab_case() {
        for sector in SECTORS {
            assert_eq!(*sector, sector.to_lowercase());
            assert!(!sector.contains(' '));
        }
    }
}
