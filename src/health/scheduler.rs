//! Bounded-concurrency probe fan-out.
//!
//! # Responsibilities
//! - Run one probe per service per cycle
//! - Cap in-flight probes at the configured concurrency
//! - Return outcomes in input order, regardless of completion order
//!
//! # Design Decisions
//! - One task per service, gated by a semaphore permit
//! - Handles are joined in index order, so placement is positional
//! - Each probe carries its own deadline; there is no cycle-wide deadline

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

use crate::health::probe::Prober;
use crate::health::types::{ProbeOutcome, Service, REQUEST_FAILED};

/// Runs a [`Prober`] over every service with at most `concurrency` in flight.
pub struct Scheduler<P> {
    prober: Arc<P>,
    concurrency: usize,
}

impl<P: Prober> Scheduler<P> {
    /// Create a scheduler. A concurrency of 0 is treated as 1.
    pub fn new(prober: P, concurrency: usize) -> Self {
        Self {
            prober: Arc::new(prober),
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Probe all services and return once every one has an outcome.
    pub async fn run_cycle(&self, services: &[Service]) -> Vec<ProbeOutcome> {
        let permits = Arc::new(Semaphore::new(self.concurrency));

        let handles: Vec<_> = services
            .iter()
            .cloned()
            .map(|service| {
                let prober = self.prober.clone();
                let permits = permits.clone();
                tokio::spawn(async move {
                    // Acquire only fails on a closed semaphore; this one is never closed.
                    let _permit = permits.acquire().await.ok();
                    prober.probe(&service).await
                })
            })
            .collect();

        let mut outcomes = Vec::with_capacity(services.len());
        for (service, handle) in services.iter().zip(handles) {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!(service = %service.name, error = %e, "Probe task aborted");
                    ProbeOutcome::down(service.clone(), REQUEST_FAILED, Duration::ZERO)
                }
            };
            outcomes.push(outcome);
        }

        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Prober that sleeps a per-service delay and tracks peak concurrency.
    struct SlowProber {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl SlowProber {
        fn new() -> Self {
            Self {
                in_flight: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
            }
        }
    }

    impl Prober for SlowProber {
        async fn probe(&self, service: &Service) -> ProbeOutcome {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);

            let delay: u64 = service.url.parse().unwrap_or(0);
            tokio::time::sleep(Duration::from_millis(delay)).await;

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            ProbeOutcome::up(service.clone(), 200, Duration::from_millis(delay))
        }
    }

    struct PanickingProber;

    impl Prober for PanickingProber {
        async fn probe(&self, service: &Service) -> ProbeOutcome {
            if service.name == "boom" {
                panic!("probe exploded");
            }
            ProbeOutcome::up(service.clone(), 200, Duration::ZERO)
        }
    }

    fn service(name: &str, delay_ms: u64) -> Service {
        Service {
            name: name.into(),
            url: delay_ms.to_string(),
            env: "production".into(),
        }
    }

    #[tokio::test]
    async fn test_results_follow_input_order() {
        // Completion order is roughly the reverse of input order.
        let services = vec![
            service("a", 120),
            service("b", 90),
            service("c", 60),
            service("d", 30),
            service("e", 0),
        ];
        let scheduler = Scheduler::new(SlowProber::new(), 2);

        let outcomes = scheduler.run_cycle(&services).await;

        let names: Vec<_> = outcomes.iter().map(|o| o.service.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d", "e"]);
        assert!(outcomes.iter().all(|o| o.up));
    }

    #[tokio::test]
    async fn test_concurrency_cap_respected() {
        let services: Vec<_> = (0..8).map(|i| service(&format!("s{i}"), 20)).collect();
        let scheduler = Scheduler::new(SlowProber::new(), 3);

        let outcomes = scheduler.run_cycle(&services).await;

        assert_eq!(outcomes.len(), 8);
        let peak = scheduler.prober.peak.load(Ordering::SeqCst);
        assert!(peak <= 3, "peak concurrency was {peak}");
        assert!(peak >= 2, "probes never overlapped");
    }

    #[tokio::test]
    async fn test_zero_concurrency_clamped() {
        let scheduler = Scheduler::new(SlowProber::new(), 0);
        assert_eq!(scheduler.concurrency(), 1);
        let outcomes = scheduler.run_cycle(&[service("a", 0)]).await;
        assert_eq!(outcomes.len(), 1);
    }

    #[tokio::test]
    async fn test_panicked_probe_counts_as_failure() {
        let services = vec![service("ok", 0), service("boom", 0), service("fine", 0)];
        let scheduler = Scheduler::new(PanickingProber, 2);

        let outcomes = scheduler.run_cycle(&services).await;

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].up);
        assert!(!outcomes[1].up);
        assert_eq!(outcomes[1].error_tag(), REQUEST_FAILED);
        assert_eq!(outcomes[1].service.name, "boom");
        assert!(outcomes[2].up);
    }
}
