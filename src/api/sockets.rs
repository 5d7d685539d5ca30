//! Websocket route group, mounted without the version prefix.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use serde_json::json;

use crate::api::error::ApiError;
use crate::api::normalize_symbols;
use crate::http::server::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/ws/quotes", get(upgrade))
}

async fn upgrade(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| serve_quotes(socket, state))
}

/// Serve quote snapshots over a websocket.
///
/// Each inbound text frame is a symbol list; each reply is the upstream
/// payload for it. The loop terminates on close, on error, or on the
/// shutdown broadcast so the drain can complete.
async fn serve_quotes(mut socket: WebSocket, state: AppState) {
    let mut shutdown = state.shutdown.subscribe();

    loop {
        tokio::select! {
            message = socket.recv() => {
                match message {
                    Some(Ok(Message::Text(symbols))) => {
                        let reply = quote_snapshot(&state, symbols.as_str()).await;
                        if socket.send(Message::Text(reply.into())).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    // Pings are answered by axum; ignore other frames.
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::debug!(error = %e, "Websocket receive error");
                        break;
                    }
                }
            }
            _ = shutdown.recv() => {
                let _ = socket.send(Message::Close(None)).await;
                break;
            }
        }
    }
}

async fn quote_snapshot(state: &AppState, raw: &str) -> String {
    let symbols = match normalize_symbols(raw) {
        Ok(symbols) => symbols,
        Err(e) => return json!({ "error": e.to_string() }).to_string(),
    };

    let result: Result<String, ApiError> = async {
        let session = state.sessions.acquire().await?;
        let url = format!(
            "{}/quotes",
            state.config.upstream.base_url.trim_end_matches('/')
        );
        let response = session
            .http()
            .get(&url)
            .query(&[("symbols", symbols.as_str())])
            .send()
            .await
            .map_err(ApiError::from_transport)?;
        response.text().await.map_err(ApiError::from_transport)
    }
    .await;

    match result {
        Ok(body) => body,
        Err(e) => json!({ "error": e.to_string() }).to_string(),
    }
}
