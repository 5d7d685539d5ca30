//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured key-value fields, init in main)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape, dedicated listener)
//! ```
//!
//! # Design Decisions
//! - Logging uses the tracing crate; the subscriber is installed in main
//!   with an env-filter so levels are tunable without a rebuild
//! - Request IDs flow through all log events via middleware
//! - Metric updates are cheap atomic operations

pub mod metrics;
