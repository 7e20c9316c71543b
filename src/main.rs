//! Uptime board.
//!
//! Probes a fixed list of HTTP services on an interval and keeps a single
//! Slack message up to date with their status, threading DOWN/UP alerts
//! underneath it.
//!
//! # Architecture Overview
//!
//! ```text
//!   services.toml ──▶ config ──▶ Monitor ─────────────────────────────┐
//!                                  │                                  │
//!                                  ▼                                  │
//!                      Scheduler (≤ concurrency probes)               │
//!                                  │  ProbeOutcome × N (input order)  │
//!                                  ▼                                  │
//!                      HealthTracker (Up ⇄ Down, threshold)           │
//!                                  │  Transition × k                  │
//!                                  ▼                                  │
//!                      IncidentMemory ──▶ board render ──▶ Notifier ◀─┘
//!                                                          (Slack / log)
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use uptime_board::config::{load_config, BoardConfig, ConfigError};
use uptime_board::health::{HttpProber, Monitor};
use uptime_board::lifecycle::{wait_for_signal, Shutdown};
use uptime_board::notify::{BoardHandleStore, LogNotifier, Notifier, SlackNotifier};
use uptime_board::observability::{logging, metrics};

#[derive(Parser, Debug)]
#[command(name = "uptime-board", version)]
#[command(about = "Probe HTTP services and keep a Slack status board up to date", long_about = None)]
struct Cli {
    /// Path to the services file (TOML, or legacy JSON).
    #[arg(short, long, env = "UPTIME_BOARD_CONFIG", default_value = "services.toml")]
    config: PathBuf,

    /// Run a single cycle, print the results and exit.
    #[arg(long)]
    once: bool,

    /// Log the board and alerts instead of posting to Slack.
    #[arg(long)]
    dry_run: bool,

    /// Log level, used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON.
    #[arg(long)]
    log_json: bool,
}

#[derive(Debug, Error)]
enum StartupError {
    #[error("load config: {0}")]
    Config(#[from] ConfigError),

    #[error("{0} is not set")]
    MissingEnv(&'static str),

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),

    #[error("metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level, cli.log_json);

    tracing::info!("uptime-board v{} starting", env!("CARGO_PKG_VERSION"));

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), StartupError> {
    let config = load_config(&cli.config)?;

    tracing::info!(
        path = %cli.config.display(),
        services = config.services.len(),
        interval_secs = config.interval_seconds,
        timeout_ms = config.timeout_ms,
        concurrency = config.concurrency,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|_| StartupError::MetricsAddress(config.observability.metrics_address.clone()))?;
        metrics::init_metrics(addr)?;
    }

    let prober = HttpProber::new(config.probe_timeout(), config.concurrency)?;

    if cli.dry_run {
        drive(cli.once, &config, prober, LogNotifier).await;
        return Ok(());
    }

    let token = non_empty_env("SLACK_BOT_TOKEN").ok_or(StartupError::MissingEnv("SLACK_BOT_TOKEN"))?;
    let channel = non_empty_env("SLACK_CHANNEL_ID")
        .or_else(|| Some(config.slack.channel_id.clone()).filter(|c| !c.is_empty()))
        .ok_or(StartupError::MissingEnv("SLACK_CHANNEL_ID"))?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?;
    let notifier = SlackNotifier::new(
        client,
        config.slack.api_base.as_str(),
        token,
        channel,
        BoardHandleStore::new(&config.slack.board_handle_path),
    );

    drive(cli.once, &config, prober, notifier).await;
    Ok(())
}

async fn drive<N: Notifier>(once: bool, config: &BoardConfig, prober: HttpProber, notifier: N) {
    let mut monitor = Monitor::new(config, prober, notifier);

    if once {
        let report = monitor.run_cycle().await;
        for outcome in &report.outcomes {
            println!(
                "{}: up={}, latency={}ms{}",
                outcome.service.display_name(),
                outcome.up,
                outcome.latency.as_millis(),
                outcome
                    .error
                    .as_deref()
                    .map(|e| format!(", error={e}"))
                    .unwrap_or_default()
            );
        }
        return;
    }

    let shutdown = Shutdown::new();
    let signal = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_signal().await;
        tracing::info!("Shutting down after the current cycle");
        shutdown.trigger();
    });

    monitor.run(signal).await;
    tracing::info!("Shutdown complete");
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}
