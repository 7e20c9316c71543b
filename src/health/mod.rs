//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Monitor (monitor.rs), once per interval:
//!     → Scheduler fans out probes (scheduler.rs, probe.rs)
//!     → ProbeOutcome per service, in config order
//!     → HealthTracker debounces into transitions (state.rs)
//!     → IncidentMemory keeps the last recovery (incident.rs)
//!     → Board + alerts to the notifier
//!
//! State machine (state.rs):
//!     Up ←→ Down
//!     Threshold on the way down to prevent flapping alerts
//! ```
//!
//! # Design Decisions
//! - Probe failures are data (a "down" outcome), never errors
//! - State is per service key (name + environment)
//! - All state lives in one tracker owned by the monitor; one cycle at a time

pub mod incident;
pub mod monitor;
pub mod probe;
pub mod scheduler;
pub mod state;
pub mod types;

pub use incident::{Incident, IncidentMemory};
pub use monitor::{CycleReport, Monitor};
pub use probe::{HttpProber, Prober};
pub use scheduler::Scheduler;
pub use state::{Health, HealthTracker, ServiceState, DEFAULT_FAILURE_THRESHOLD};
pub use types::{ProbeOutcome, Service, ServiceKey, Transition, TransitionKind, INVALID_URL, REQUEST_FAILED};
