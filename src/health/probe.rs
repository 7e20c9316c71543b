//! Single-shot HTTP probes.
//!
//! # Responsibilities
//! - Issue exactly one GET per service per cycle
//! - Bound each attempt by the configured timeout
//! - Fold every failure into a "down" `ProbeOutcome`
//!
//! # Design Decisions
//! - No retries; the next cycle is the retry
//! - Latency is wall-clock time for the attempt, recorded on success and failure
//! - An unparsable URL never reaches the network

use std::future::Future;
use std::time::{Duration, Instant};

use url::Url;

use crate::health::types::{ProbeOutcome, Service, INVALID_URL, REQUEST_FAILED};

/// Something that can check one service and report the outcome.
pub trait Prober: Send + Sync + 'static {
    fn probe(&self, service: &Service) -> impl Future<Output = ProbeOutcome> + Send;
}

/// Production prober backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: reqwest::Client,
}

impl HttpProber {
    /// Build a prober whose requests are cut off after `timeout`.
    ///
    /// The idle pool keeps up to `concurrency` connections per host.
    pub fn new(timeout: Duration, concurrency: usize) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(concurrency)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(concat!("uptime-board/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }
}

impl Prober for HttpProber {
    async fn probe(&self, service: &Service) -> ProbeOutcome {
        let start = Instant::now();

        let url = match Url::parse(&service.url) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(service = %service.name, url = %service.url, error = %e, "Invalid probe URL");
                return ProbeOutcome::down(service.clone(), INVALID_URL, start.elapsed());
            }
        };

        let result = self.client.get(url).send().await;
        let latency = start.elapsed();

        match result {
            Ok(response) => {
                let status = response.status().as_u16();
                if !response.status().is_success() {
                    tracing::debug!(service = %service.name, status, "Probe returned non-success status");
                }
                ProbeOutcome::from_status(service.clone(), status, latency)
            }
            Err(e) => {
                tracing::debug!(
                    service = %service.name,
                    timeout = e.is_timeout(),
                    error = %e,
                    "Probe request failed"
                );
                ProbeOutcome::down(service.clone(), REQUEST_FAILED, latency)
            }
        }
    }
}
