//! Notification subsystem.
//!
//! # Data Flow
//! ```text
//! Monitor cycle
//!     → Notifier::upsert_board (edit the board message, or post a new one)
//!     → Notifier::post_alert   (threaded reply under the board message)
//!
//! SlackNotifier (slack.rs):
//!     chat.update / chat.postMessage over the Slack Web API
//!     → board message handle persisted by store.rs
//!
//! LogNotifier (dry_run.rs):
//!     dry-run sink, writes everything to the log
//! ```
//!
//! # Design Decisions
//! - Sink errors are returned, and the monitor logs and swallows them
//! - No retries inside the sink; the next cycle is the retry
//! - If the stored board message is gone, a fresh board is posted

use std::future::Future;
use thiserror::Error;

use crate::board::Board;

pub mod dry_run;
pub mod slack;
pub mod store;

pub use dry_run::LogNotifier;
pub use slack::SlackNotifier;
pub use store::BoardHandleStore;

/// Errors raised while delivering a board or alert.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Slack API {method} failed: {error}")]
    Api { method: String, error: String },

    #[error("Slack API {0} returned no message timestamp")]
    MissingHandle(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no board message to reply to")]
    NoBoard,
}

/// Destination for the status board and transition alerts.
pub trait Notifier: Send + Sync {
    /// Replace the current board, posting a new one if there is nothing to replace.
    fn upsert_board(&self, board: &Board) -> impl Future<Output = Result<(), NotifyError>> + Send;

    /// Post an alert attached to the current board.
    fn post_alert(&self, text: &str) -> impl Future<Output = Result<(), NotifyError>> + Send;
}
