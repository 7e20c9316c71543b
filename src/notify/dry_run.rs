//! Log-only notifier for `--dry-run`.

use crate::board::Board;
use crate::notify::{Notifier, NotifyError};

/// Writes boards and alerts to the log instead of a channel.
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    async fn upsert_board(&self, board: &Board) -> Result<(), NotifyError> {
        tracing::info!(summary = %board.text, blocks = board.blocks.len(), "Board (dry run)");
        Ok(())
    }

    async fn post_alert(&self, text: &str) -> Result<(), NotifyError> {
        tracing::info!(alert = %text, "Alert (dry run)");
        Ok(())
    }
}
