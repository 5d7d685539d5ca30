//! Technical indicator route group.

use axum::extract::{Query, State};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::{normalize_symbols, relay_get};
use crate::http::server::AppState;

/// Indicator functions the upstream computes.
const FUNCTIONS: &[&str] = &[
    "sma", "ema", "wma", "vwma", "rsi", "srsi", "stoch", "cci", "macd", "bbands", "aroon", "adx",
    "obv", "super_trend", "ichimoku",
];

#[derive(Debug, Deserialize)]
pub struct IndicatorParams {
    /// Indicator function name, e.g. `sma` or `macd`.
    pub function: String,
    pub symbol: String,
    #[serde(default = "default_range")]
    pub range: String,
    #[serde(default = "default_interval")]
    pub interval: String,
}

fn default_range() -> String {
    "2y".to_string()
}

fn default_interval() -> String {
    "1d".to_string()
}

pub fn router() -> Router<AppState> {
    Router::new().route("/indicators", get(get_indicators))
}

async fn get_indicators(
    State(state): State<AppState>,
    Query(params): Query<IndicatorParams>,
) -> Result<Response, ApiError> {
    let function = params.function.trim().to_lowercase();
    if !FUNCTIONS.contains(&function.as_str()) {
        return Err(ApiError::BadRequest(format!(
            "function must be one of {}",
            FUNCTIONS.join(", ")
        )));
    }
    let symbol = normalize_symbols(&params.symbol)?;

    relay_get(
        &state,
        "/indicators",
        &[
            ("function", function),
            ("symbol", symbol),
            ("range", params.range),
            ("interval", params.interval),
        ],
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_functions_are_lowercased() {
        assert!(FUNCTIONS.contains(&"sma"));
        assert!(FUNCTIONS.contains(&"super_trend"));
        assert!(!FUNCTIONS.contains(&"SMA"));
    }
}
