//! Metrics collection and exposition.
//!
//! # Metrics
//! - `devproxy_requests_total` (counter): requests by route, method, status
//! - `devproxy_request_duration_seconds` (histogram): latency by route
//!
//! Without an installed recorder the macros are no-ops.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::routing::RouteKind;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled request.
pub fn record_request(route: RouteKind, method: &str, status: u16, start: Instant) {
    let route = route.as_str();
    metrics::counter!(
        "devproxy_requests_total",
        "route" => route,
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("devproxy_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}
