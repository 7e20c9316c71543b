//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Prober, tracker, monitor, notifier produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout, text or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured fields (service, env, error) on every event
//! - Metrics are cheap and optional

pub mod logging;
pub mod metrics;
