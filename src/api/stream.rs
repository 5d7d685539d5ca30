//! Server-sent quote stream route group.
//!
//! Polls the upstream on a fixed cadence and pushes each snapshot as an SSE
//! event. The stream re-acquires the session per poll (a cheap clone) and
//! terminates on the shutdown broadcast so the drain can complete.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::routing::get;
use axum::Router;
use futures_util::stream::{self, Stream};
use serde::Deserialize;
use tokio::sync::broadcast;

use crate::api::error::ApiError;
use crate::api::normalize_symbols;
use crate::http::server::AppState;
use crate::session::SessionManager;

#[derive(Debug, Deserialize)]
pub struct StreamParams {
    pub symbols: String,
    /// Poll cadence in seconds; clamped to 1..=60.
    #[serde(default = "default_interval")]
    pub interval: u64,
}

fn default_interval() -> u64 {
    5
}

pub fn router() -> Router<AppState> {
    Router::new().route("/stream", get(stream_quotes))
}

struct PollState {
    sessions: Arc<SessionManager>,
    shutdown: broadcast::Receiver<()>,
    url: String,
    symbols: String,
    period: Duration,
}

async fn stream_quotes(
    State(state): State<AppState>,
    Query(params): Query<StreamParams>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let symbols = normalize_symbols(&params.symbols)?;
    let url = format!(
        "{}/quotes",
        state.config.upstream.base_url.trim_end_matches('/')
    );

    let poll = PollState {
        sessions: state.sessions.clone(),
        shutdown: state.shutdown.subscribe(),
        url,
        symbols,
        period: Duration::from_secs(params.interval.clamp(1, 60)),
    };

    let stream = stream::unfold(poll, |mut poll| async move {
        tokio::select! {
            _ = tokio::time::sleep(poll.period) => {}
            _ = poll.shutdown.recv() => return None,
        }

        let event = match poll_quotes(&poll).await {
            Ok(body) => Event::default().event("quote").data(body),
            Err(e) => Event::default().event("error").data(e.to_string()),
        };
        Some((Ok(event), poll))
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

async fn poll_quotes(poll: &PollState) -> Result<String, ApiError> {
    let session = poll.sessions.acquire().await?;
    let response = session
        .http()
        .get(&poll.url)
        .query(&[("symbols", poll.symbols.as_str())])
        .send()
        .await
        .map_err(ApiError::from_transport)?;
    response.text().await.map_err(ApiError::from_transport)
}
