//! Periodic cycle driver.
//!
//! # Responsibilities
//! - Run one probe cycle per interval, never overlapping
//! - Feed outcomes through the tracker and incident memory
//! - Publish the board and transition alerts
//!
//! # Design Decisions
//! - Tracker state is committed before the notifier is called, so delivery
//!   failures cannot corrupt it
//! - Notifier errors are logged and swallowed; the next cycle is the retry
//! - Shutdown is only observed between cycles

use std::time::{Duration, Instant};

use chrono::Local;
use tokio::time::{self, MissedTickBehavior};

use crate::board::{render_alerts, render_board};
use crate::config::BoardConfig;
use crate::health::incident::IncidentMemory;
use crate::health::probe::Prober;
use crate::health::scheduler::Scheduler;
use crate::health::state::HealthTracker;
use crate::health::types::{ProbeOutcome, Service, Transition, TransitionKind};
use crate::lifecycle::ShutdownSignal;
use crate::notify::Notifier;
use crate::observability::metrics;

/// What one cycle observed and emitted.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub outcomes: Vec<ProbeOutcome>,
    pub transitions: Vec<Transition>,
}

impl CycleReport {
    pub fn healthy(&self) -> usize {
        self.outcomes.iter().filter(|o| o.up).count()
    }

    pub fn down(&self) -> usize {
        self.outcomes.len() - self.healthy()
    }
}

/// Ties the scheduler, tracker, incident memory and notifier together.
pub struct Monitor<P, N> {
    services: Vec<Service>,
    interval: Duration,
    scheduler: Scheduler<P>,
    tracker: HealthTracker,
    incidents: IncidentMemory,
    notifier: N,
}

impl<P: Prober, N: Notifier> Monitor<P, N> {
    pub fn new(config: &BoardConfig, prober: P, notifier: N) -> Self {
        Self {
            services: config.services.clone(),
            interval: config.interval(),
            scheduler: Scheduler::new(prober, config.concurrency),
            tracker: HealthTracker::new(config.failure_threshold),
            incidents: IncidentMemory::new(),
            notifier,
        }
    }

    pub fn tracker(&self) -> &HealthTracker {
        &self.tracker
    }

    pub fn incidents(&self) -> &IncidentMemory {
        &self.incidents
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Run one full cycle: probe, track, render, notify.
    pub async fn run_cycle(&mut self) -> CycleReport {
        let started = Instant::now();

        let outcomes = self.scheduler.run_cycle(&self.services).await;
        for outcome in &outcomes {
            metrics::record_probe(outcome);
            tracing::debug!(
                service = %outcome.service.name,
                env = %outcome.service.env,
                up = outcome.up,
                status = ?outcome.status,
                latency_ms = outcome.latency.as_millis() as u64,
                error = outcome.error_tag(),
                "Probe finished"
            );
        }

        let now = Instant::now();
        let transitions = self.tracker.observe_at(&outcomes, now);
        for transition in &transitions {
            self.incidents.record(transition, now);
            metrics::record_transition(match transition.kind {
                TransitionKind::Down { .. } => "down",
                TransitionKind::Up { .. } => "up",
            });
        }

        let board = render_board(
            &outcomes,
            &self.tracker,
            self.incidents.current(),
            now,
            &Local::now(),
        );
        if let Err(e) = self.notifier.upsert_board(&board).await {
            tracing::error!(error = %e, "Failed to update board");
            metrics::record_notify_error("upsert_board");
        }

        for alert in render_alerts(&transitions) {
            if let Err(e) = self.notifier.post_alert(&alert).await {
                tracing::error!(error = %e, "Failed to post alert");
                metrics::record_notify_error("post_alert");
            }
        }

        let report = CycleReport {
            outcomes,
            transitions,
        };
        let elapsed = started.elapsed();
        metrics::record_cycle(elapsed);
        tracing::info!(
            healthy = report.healthy(),
            down = report.down(),
            transitions = report.transitions.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Cycle complete"
        );

        report
    }

    /// Run cycles until shutdown. The first cycle starts immediately.
    ///
    /// Returns the monitor so callers can inspect its final state.
    pub async fn run(mut self, mut shutdown: ShutdownSignal) -> Self {
        tracing::info!(
            services = self.services.len(),
            interval_secs = self.interval.as_secs(),
            concurrency = self.scheduler.concurrency(),
            threshold = self.tracker.threshold(),
            "Monitor starting"
        );

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.recv() => {
                    tracing::info!("Monitor received shutdown signal, exiting loop");
                    break;
                }
                _ = ticker.tick() => {
                    self.run_cycle().await;
                }
            }
        }

        self
    }
}
