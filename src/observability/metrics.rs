//! Metrics collection and exposition.
//!
//! # Metrics
//! - `uptime_probe_latency_seconds` (histogram): probe latency by service, env
//! - `uptime_service_up` (gauge): 1 = last probe passed, 0 = failed
//! - `uptime_transitions_total` (counter): confirmed transitions by kind
//! - `uptime_cycle_duration_seconds` (histogram): wall time of a full cycle
//! - `uptime_notify_errors_total` (counter): sink failures by operation
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade and is a no-op until
//!   a recorder is installed
//! - The Prometheus listener is only started when enabled in config

use std::net::SocketAddr;
use std::time::Duration;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::health::ProbeOutcome;

/// Install the Prometheus recorder and its HTTP scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_probe(outcome: &ProbeOutcome) {
    let service = outcome.service.name.clone();
    let env = outcome.service.env.clone();

    metrics::histogram!(
        "uptime_probe_latency_seconds",
        "service" => service.clone(),
        "env" => env.clone()
    )
    .record(outcome.latency.as_secs_f64());

    metrics::gauge!("uptime_service_up", "service" => service, "env" => env)
        .set(if outcome.up { 1.0 } else { 0.0 });
}

pub fn record_transition(kind: &'static str) {
    metrics::counter!("uptime_transitions_total", "kind" => kind).increment(1);
}

pub fn record_cycle(duration: Duration) {
    metrics::histogram!("uptime_cycle_duration_seconds").record(duration.as_secs_f64());
}

pub fn record_notify_error(operation: &'static str) {
    metrics::counter!("uptime_notify_errors_total", "operation" => operation).increment(1);
}
