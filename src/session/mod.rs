//! Shared outbound session subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     HttpServer::run → SessionManager::acquire (construct before serve)
//!
//! Request handling:
//!     handler → AppState.sessions.acquire → clone of the pooled client
//!     → one outbound call → clone dropped
//!
//! Shutdown:
//!     graceful drain completes → SessionManager::release (clear, then close)
//! ```
//!
//! # Design Decisions
//! - At most one client per process; absent or present, nothing in between
//! - Single-flight lazy construction behind an async mutex
//! - Release is idempotent and best-effort; failures are logged, not raised

mod manager;

pub use manager::{SessionError, SessionManager, SharedSession};
