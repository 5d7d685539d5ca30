//! Historical price route group.

use axum::extract::{Query, State};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::{normalize_symbols, relay_get};
use crate::http::server::AppState;

const RANGES: &[&str] = &[
    "1d", "5d", "1mo", "3mo", "6mo", "ytd", "1y", "2y", "5y", "10y", "max",
];
const INTERVALS: &[&str] = &["1m", "5m", "15m", "30m", "1h", "1d", "1wk", "1mo"];

#[derive(Debug, Deserialize)]
pub struct HistoricalParams {
    pub symbol: String,
    #[serde(default = "default_range")]
    pub range: String,
    #[serde(default = "default_interval")]
    pub interval: String,
}

fn default_range() -> String {
    "1y".to_string()
}

fn default_interval() -> String {
    "1d".to_string()
}

pub fn router() -> Router<AppState> {
    Router::new().route("/historical", get(get_historical))
}

async fn get_historical(
    State(state): State<AppState>,
    Query(params): Query<HistoricalParams>,
) -> Result<Response, ApiError> {
    let symbol = normalize_symbols(&params.symbol)?;
    let range = validate_choice("range", &params.range, RANGES)?;
    let interval = validate_choice("interval", &params.interval, INTERVALS)?;

    relay_get(
        &state,
        "/historical",
        &[
            ("symbol", symbol),
            ("range", range),
            ("interval", interval),
        ],
    )
    .await
}

fn validate_choice(name: &str, value: &str, allowed: &[&str]) -> Result<String, ApiError> {
    let value = value.trim().to_lowercase();
    if allowed.contains(&value.as_str()) {
        Ok(value)
    } else {
        Err(ApiError::BadRequest(format!(
            "{name} must be one of {}",
            allowed.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_ranges_and_intervals() {
        assert_eq!(validate_choice("range", "1Y", RANGES).unwrap(), "1y");
        assert_eq!(validate_choice("interval", " 1d ", INTERVALS).unwrap(), "1d");
    }

    #[test]
    fn rejects_unknown_values() {
        let err = validate_choice("range", "7y", RANGES).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
        assert!(validate_choice("interval", "45s", INTERVALS).is_err());
    }
}
