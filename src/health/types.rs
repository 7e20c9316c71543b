//! Value types shared by the probe, tracker and monitor.

use std::fmt;
use std::time::Duration;

pub use crate::config::schema::ServiceConfig as Service;

/// Error tag for a target address that could not be parsed.
pub const INVALID_URL: &str = "invalid_url";
/// Error tag for connection failures and timeouts.
pub const REQUEST_FAILED: &str = "request_failed";

/// Key under which per-service state is tracked: `name:env`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceKey(String);

impl ServiceKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Service {
    pub fn key(&self) -> ServiceKey {
        ServiceKey(format!("{}:{}", self.name, self.env))
    }

    /// Name shown in alerts, e.g. "api (production)".
    pub fn display_name(&self) -> String {
        if self.env.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.env)
        }
    }
}

/// Result of one probe against one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub service: Service,
    pub up: bool,
    pub status: Option<u16>,
    pub latency: Duration,
    pub error: Option<String>,
}

impl ProbeOutcome {
    pub fn up(service: Service, status: u16, latency: Duration) -> Self {
        Self {
            service,
            up: true,
            status: Some(status),
            latency,
            error: None,
        }
    }

    pub fn down(service: Service, error: impl Into<String>, latency: Duration) -> Self {
        Self {
            service,
            up: false,
            status: None,
            latency,
            error: Some(error.into()),
        }
    }

    /// Classify an HTTP response: 2xx is up, anything else is `http_<code>`.
    pub fn from_status(service: Service, status: u16, latency: Duration) -> Self {
        if (200..300).contains(&status) {
            Self::up(service, status, latency)
        } else {
            Self {
                status: Some(status),
                ..Self::down(service, format!("http_{status}"), latency)
            }
        }
    }

    pub fn error_tag(&self) -> &str {
        self.error.as_deref().unwrap_or("")
    }
}

/// What changed for a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionKind {
    /// Confirmed down after the failure threshold.
    Down { error: String },
    /// Recovered. `downtime` is `None` if the down instant was never recorded.
    Up { downtime: Option<Duration> },
}

/// A confirmed change in a service's debounced health.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub key: ServiceKey,
    pub service_name: String,
    pub kind: TransitionKind,
}

impl Transition {
    pub fn is_down(&self) -> bool {
        matches!(self.kind, TransitionKind::Down { .. })
    }
}
