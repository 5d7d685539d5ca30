//! FinanceQuery service library.
//!
//! A simple API to query financial data, built with Tokio and Axum. Route
//! groups relay requests to an upstream data provider through one shared
//! pooled HTTP client. The session subsystem owns its lifecycle: construct
//! before serve, release after drain.

pub mod api;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod session;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use session::{SessionError, SessionManager, SharedSession};
