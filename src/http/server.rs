//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the axum Router with every route group: versioned groups under
//!   the /v1 prefix, health and websocket groups at the root
//! - Wire up middleware (request ID, tracing, CORS, request timeout)
//! - Construct the shared session before serving begins
//! - Serve with graceful shutdown and release the session after the drain

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{MatchedPath, Request};
use axum::http::HeaderValue;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::config::{AppConfig, CorsConfig};
use crate::http::request::propagate_request_id;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;
use crate::session::{SessionError, SessionManager};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionManager>,
    pub config: Arc<AppConfig>,
    pub shutdown: Arc<Shutdown>,
}

/// Errors that can stop the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// HTTP server for the FinanceQuery API.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        let state = AppState {
            sessions: Arc::new(SessionManager::new(config.session.clone())),
            config: Arc::new(config),
            shutdown: Arc::new(Shutdown::new()),
        };
        let router = Self::build_router(&state);
        Self { router, state }
    }

    /// Build the axum router with all route groups and middleware layers.
    fn build_router(state: &AppState) -> Router {
        Router::new()
            .nest("/v1", api::v1_router())
            .merge(api::root_router())
            .route_layer(middleware::from_fn(track_metrics))
            .with_state(state.clone())
            .layer(
                ServiceBuilder::new()
                    .layer(middleware::from_fn(propagate_request_id))
                    .layer(TraceLayer::new_for_http())
                    .layer(build_cors(&state.config.cors))
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        state.config.timeouts.request_secs,
                    ))),
            )
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// The shared session is fully constructed before the first connection is
    /// accepted and released only after the graceful drain completes.
    pub async fn run(self, listener: TcpListener) -> Result<(), ServerError> {
        let Self { router, state } = self;
        let addr = listener.local_addr()?;

        let session = state.sessions.acquire().await?;
        tracing::info!(
            address = %addr,
            session_generation = session.generation(),
            "HTTP server starting"
        );
        drop(session);

        tokio::spawn(signals::listen(state.shutdown.clone()));

        let mut drain = state.shutdown.subscribe();
        axum::serve(listener, router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = drain.recv().await;
            })
            .await?;

        // axum::serve returns once in-flight requests have completed; only
        // then may the shared session be torn down.
        state.sessions.release().await;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Shutdown coordinator handle, for triggering a stop externally.
    pub fn shutdown_handle(&self) -> Arc<Shutdown> {
        self.state.shutdown.clone()
    }

    /// Session manager handle.
    pub fn sessions(&self) -> Arc<SessionManager> {
        self.state.sessions.clone()
    }

    /// Get a reference to the effective configuration.
    pub fn config(&self) -> &AppConfig {
        &self.state.config
    }
}

/// Translate the CORS config into a tower-http layer.
///
/// tower-http rejects `Any` combined with credentials, so the credentialed
/// path mirrors the request's methods and headers instead; validation has
/// already guaranteed the origin list is explicit in that case.
fn build_cors(config: &CorsConfig) -> CorsLayer {
    let wildcard = config.allow_origins.iter().any(|o| o == "*");
    if wildcard {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allow_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    if config.allow_credentials {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true)
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Per-request metrics, labelled by matched route template.
async fn track_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());

    let response = next.run(request).await;
    metrics::record_request(&method, response.status().as_u16(), &route, start);
    response
}
