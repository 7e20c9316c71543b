//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the board.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::health::DEFAULT_FAILURE_THRESHOLD;

/// Root configuration for the status board.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Seconds between the start of two probe cycles.
    pub interval_seconds: u64,

    /// Per-probe deadline in milliseconds.
    pub timeout_ms: u64,

    /// Maximum number of probes in flight at once.
    pub concurrency: usize,

    /// Consecutive failures before a service is reported down.
    pub failure_threshold: u32,

    /// Services to probe, in display order.
    pub services: Vec<ServiceConfig>,

    /// Slack channel settings.
    pub slack: SlackConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 60,
            timeout_ms: 5_000,
            concurrency: 5,
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
            services: Vec::new(),
            slack: SlackConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl BoardConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// A single probed endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Display name (e.g., "api").
    pub name: String,

    /// Target URL for the GET probe.
    #[serde(alias = "address")]
    pub url: String,

    /// Environment label used for grouping (e.g., "production").
    #[serde(default)]
    pub env: String,
}

/// Slack Web API settings.
///
/// The bot token is never read from the file; see `SLACK_BOT_TOKEN`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SlackConfig {
    /// Channel that hosts the board. `SLACK_CHANNEL_ID` overrides it.
    pub channel_id: String,

    /// Base URL of the Web API.
    pub api_base: String,

    /// File holding the board message timestamp between restarts.
    pub board_handle_path: String,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            channel_id: String::new(),
            api_base: "https://slack.com/api".to_string(),
            board_handle_path: ".board_ts".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Expose a Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
