//! Metrics collection and exposition.
//!
//! # Metrics
//! - `wordgame_lookups_total` (counter): lookups by operation, status
//! - `wordgame_lookup_duration_seconds` (histogram): lookup latency
//! - `wordgame_template_reloads_total` (counter): reloads by outcome
//!
//! Recording without an installed exporter is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_lookup(operation: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "wordgame_lookups_total",
        "operation" => operation,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("wordgame_lookup_duration_seconds", "operation" => operation)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_template_reload(success: bool) {
    let outcome = if success { "success" } else { "failure" };
    metrics::counter!("wordgame_template_reloads_total", "outcome" => outcome).increment(1);
}
