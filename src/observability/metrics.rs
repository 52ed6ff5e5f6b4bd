//! Metrics collection and exposition.
//!
//! # Metrics
//! - `redirector_redirects_total` (counter): redirects by kind, status
//! - `redirector_passthrough_total` (counter): requests handed to the next handler

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record an emitted redirect.
pub fn record_redirect(kind: &'static str, status: u16) {
    metrics::counter!(
        "redirector_redirects_total",
        "kind" => kind,
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record a request forwarded to the next handler.
pub fn record_passthrough() {
    metrics::counter!("redirector_passthrough_total").increment(1);
}
