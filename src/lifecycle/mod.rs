//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (http/server.rs):
//!     Load config → Construct shared session → Start serving
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain connections
//!     → Release shared session → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: session is fully constructed before traffic is served
//! - Ordered shutdown: the session is released only after the drain completes
//! - Long-lived connections (websocket, SSE) observe the broadcast so the
//!   drain can actually finish

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
