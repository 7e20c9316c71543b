//! Uptime board library: probes services, debounces their health and keeps
//! a Slack status board up to date.

pub mod board;
pub mod config;
pub mod health;
pub mod lifecycle;
pub mod notify;
pub mod observability;

pub use config::BoardConfig;
pub use health::{HealthTracker, Monitor};
pub use lifecycle::Shutdown;
