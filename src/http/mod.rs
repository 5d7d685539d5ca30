//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, middleware, graceful shutdown)
//!     → request.rs (request ID injection)
//!     → api route groups (relay via the shared session)
//!     → response to client
//! ```

pub mod request;
pub mod server;

pub use request::REQUEST_ID_HEADER;
pub use server::{AppState, HttpServer, ServerError};
