//! Metrics collection and exposition.
//!
//! # Metrics
//! - `financequery_requests_total` (counter): inbound requests by method,
//!   status, route
//! - `financequery_request_duration_seconds` (histogram): inbound latency
//! - `financequery_upstream_responses_total` (counter): relay responses by
//!   route group and status
//! - `financequery_session_events_total` (counter): shared-session lifecycle
//!   events (construct, release)

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
///
/// Failure to install is logged and otherwise ignored: the service keeps
/// running without metrics exposition.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one completed inbound request.
pub fn record_request(method: &str, status: u16, route: &str, start: Instant) {
    metrics::counter!(
        "financequery_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "route" => route.to_string(),
    )
    .increment(1);
    metrics::histogram!(
        "financequery_request_duration_seconds",
        "route" => route.to_string(),
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record one upstream relay response.
pub fn record_upstream_response(route: &str, status: u16) {
    metrics::counter!(
        "financequery_upstream_responses_total",
        "route" => route.to_string(),
        "status" => status.to_string(),
    )
    .increment(1);
}

/// Record a shared-session lifecycle event.
pub fn record_session_event(event: &'static str) {
    metrics::counter!("financequery_session_events_total", "event" => event).increment(1);
}
