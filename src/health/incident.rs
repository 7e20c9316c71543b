//! Last completed incident, for the board footer.

use std::time::{Duration, Instant};

use crate::health::types::{Transition, TransitionKind};

/// A finished down → up episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incident {
    pub service_name: String,
    pub recovered_at: Instant,
    pub downtime: Duration,
}

/// Single-slot, last-write-wins register of the latest recovery.
#[derive(Debug, Default)]
pub struct IncidentMemory {
    last: Option<Incident>,
}

impl IncidentMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `transition` if it is a recovery with a known downtime.
    pub fn record(&mut self, transition: &Transition, now: Instant) {
        if let TransitionKind::Up { downtime: Some(downtime) } = transition.kind {
            self.last = Some(Incident {
                service_name: transition.service_name.clone(),
                recovered_at: now,
                downtime,
            });
        }
    }

    pub fn current(&self) -> Option<&Incident> {
        self.last.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceConfig;

    fn transition(name: &str, kind: TransitionKind) -> Transition {
        let service = ServiceConfig {
            name: name.into(),
            url: String::new(),
            env: "production".into(),
        };
        Transition {
            key: service.key(),
            service_name: service.display_name(),
            kind,
        }
    }

    #[test]
    fn test_starts_empty() {
        assert!(IncidentMemory::new().current().is_none());
    }

    #[test]
    fn test_ignores_down_and_unknown_downtime() {
        let mut memory = IncidentMemory::new();
        let now = Instant::now();

        memory.record(&transition("api", TransitionKind::Down { error: "http_500".into() }), now);
        memory.record(&transition("api", TransitionKind::Up { downtime: None }), now);

        assert!(memory.current().is_none());
    }

    #[test]
    fn test_latest_recovery_wins() {
        let mut memory = IncidentMemory::new();
        let t0 = Instant::now();
        let t1 = t0 + Duration::from_secs(10);

        memory.record(
            &transition("api", TransitionKind::Up { downtime: Some(Duration::from_secs(60)) }),
            t0,
        );
        memory.record(
            &transition("web", TransitionKind::Up { downtime: Some(Duration::from_secs(5)) }),
            t1,
        );
        memory.record(&transition("api", TransitionKind::Down { error: "http_503".into() }), t1);

        let incident = memory.current().unwrap();
        assert_eq!(incident.service_name, "web (production)");
        assert_eq!(incident.recovered_at, t1);
        assert_eq!(incident.downtime, Duration::from_secs(5));
    }
}
