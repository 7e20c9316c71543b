//! Service health state machine.
//!
//! # States
//! - Up: probes pass, or have failed fewer than `threshold` times in a row
//! - Down: confirmed outage, alert already sent
//!
//! # State Transitions
//! ```text
//! Up → Down: consecutive failures reach threshold (emit Down)
//! Down → Up: first successful probe (emit Up with downtime)
//! ```
//!
//! # Design Decisions
//! - Debounce on the way down, none on the way up
//! - The failure counter only matters while Up; it keeps counting while Down
//! - One transition per service per cycle at most
//! - State is created lazily and never removed

use std::collections::HashMap;
use std::time::Instant;

use crate::health::types::{ProbeOutcome, ServiceKey, Transition, TransitionKind};

/// Consecutive failures needed to confirm an outage.
pub const DEFAULT_FAILURE_THRESHOLD: u32 = 4;

/// Debounced health of one service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Health {
    #[default]
    Up,
    Down,
}

/// Mutable per-service record owned by the [`HealthTracker`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceState {
    pub health: Health,
    pub consecutive_failures: u32,
    pub down_since: Option<Instant>,
}

impl ServiceState {
    pub fn is_down(&self) -> bool {
        self.health == Health::Down
    }
}

/// Turns raw probe outcomes into up/down transitions.
#[derive(Debug)]
pub struct HealthTracker {
    threshold: u32,
    states: HashMap<ServiceKey, ServiceState>,
}

impl Default for HealthTracker {
    fn default() -> Self {
        Self::new(DEFAULT_FAILURE_THRESHOLD)
    }
}

impl HealthTracker {
    /// Create a tracker. A threshold of 0 is treated as 1.
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold: threshold.max(1),
            states: HashMap::new(),
        }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn state(&self, key: &ServiceKey) -> Option<&ServiceState> {
        self.states.get(key)
    }

    /// When the service was confirmed down, if it currently is.
    pub fn down_since(&self, key: &ServiceKey) -> Option<Instant> {
        self.states.get(key).and_then(|s| s.down_since)
    }

    /// Apply one cycle of outcomes using the current time.
    pub fn observe(&mut self, outcomes: &[ProbeOutcome]) -> Vec<Transition> {
        self.observe_at(outcomes, Instant::now())
    }

    /// Apply one cycle of outcomes observed at `now`.
    ///
    /// Returned transitions follow the order of `outcomes`.
    pub fn observe_at(&mut self, outcomes: &[ProbeOutcome], now: Instant) -> Vec<Transition> {
        outcomes
            .iter()
            .filter_map(|outcome| self.apply(outcome, now))
            .collect()
    }

    fn apply(&mut self, outcome: &ProbeOutcome, now: Instant) -> Option<Transition> {
        let key = outcome.service.key();
        let threshold = self.threshold;
        let state = self.states.entry(key.clone()).or_default();

        let kind = if outcome.up {
            state.consecutive_failures = 0;
            match state.health {
                Health::Up => None,
                Health::Down => {
                    let downtime = state
                        .down_since
                        .take()
                        .map(|since| now.saturating_duration_since(since));
                    state.health = Health::Up;
                    tracing::info!(service = %key, downtime = ?downtime, "Service recovered");
                    Some(TransitionKind::Up { downtime })
                }
            }
        } else {
            state.consecutive_failures = state.consecutive_failures.saturating_add(1);
            match state.health {
                Health::Up if state.consecutive_failures >= threshold => {
                    state.health = Health::Down;
                    state.down_since = Some(now);
                    tracing::warn!(
                        service = %key,
                        failures = state.consecutive_failures,
                        error = outcome.error_tag(),
                        "Service marked down"
                    );
                    Some(TransitionKind::Down {
                        error: outcome.error_tag().to_string(),
                    })
                }
                Health::Up => {
                    tracing::debug!(
                        service = %key,
                        failures = state.consecutive_failures,
                        threshold,
                        "Probe failed below threshold"
                    );
                    None
                }
                Health::Down => None,
            }
        };

        kind.map(|kind| Transition {
            key,
            service_name: outcome.service.display_name(),
            kind,
        })
    }
}
