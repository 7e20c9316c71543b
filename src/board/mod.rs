//! Board rendering subsystem.
//!
//! # Data Flow
//! ```text
//! Cycle results (outcomes + tracker + last incident)
//!     → render.rs (Block Kit board, grouped by environment)
//!     → Notifier::upsert_board
//!
//! Cycle transitions
//!     → render.rs (one DOWN batch, one UP batch)
//!     → Notifier::post_alert
//! ```
//!
//! # Design Decisions
//! - Rendering is pure: no I/O, the clock is passed in
//! - Raw outcomes drive the board lines; debounced state only adds the downtime
//! - Alerts are batched per kind, never one message per service

pub mod duration;
pub mod render;

pub use duration::format_duration;
pub use render::{render_alerts, render_board, Board};
