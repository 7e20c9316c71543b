//! Slack Block Kit rendering of the board and alert messages.

use std::time::Instant;

use chrono::{DateTime, Local};
use serde_json::{json, Value};

use crate::board::duration::format_duration;
use crate::health::{HealthTracker, Incident, ProbeOutcome, Transition, TransitionKind};

/// A rendered status board: Block Kit blocks plus plain-text fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub text: String,
    pub blocks: Vec<Value>,
}

fn context(text: impl Into<String>) -> Value {
    json!({
        "type": "context",
        "elements": [{ "type": "mrkdwn", "text": text.into() }],
    })
}

fn section(text: impl Into<String>) -> Value {
    json!({
        "type": "section",
        "text": { "type": "mrkdwn", "text": text.into() },
    })
}

fn divider() -> Value {
    json!({ "type": "divider" })
}

fn env_heading(env: &str) -> String {
    let mut chars = env.chars();
    match chars.next() {
        Some(first) => format!("*{}{}*", first.to_uppercase(), chars.as_str()),
        None => "*Services*".to_string(),
    }
}

/// One board line, e.g. "🟢  *api:* `42ms`" or "🔴  *api:* `http_503 (5m)`".
pub fn render_service_line(outcome: &ProbeOutcome, down_since: Option<Instant>, now: Instant) -> String {
    let (emoji, status) = if outcome.up {
        ("🟢", format!("`{}ms`", outcome.latency.as_millis()))
    } else {
        let status = match down_since {
            Some(since) => format!(
                "`{} ({})`",
                outcome.error_tag(),
                format_duration(now.saturating_duration_since(since))
            ),
            None => format!("`{}`", outcome.error_tag()),
        };
        ("🔴", status)
    };
    format!("{}  *{}:* {}", emoji, outcome.service.name, status)
}

pub fn render_last_incident(incident: Option<&Incident>, now: Instant) -> Option<String> {
    incident.map(|incident| {
        format!(
            "Last incident: {}, {} ago (down {})",
            incident.service_name,
            format_duration(now.saturating_duration_since(incident.recovered_at)),
            format_duration(incident.downtime)
        )
    })
}

/// Render the whole board for one cycle.
///
/// Services are grouped by environment in order of first appearance.
pub fn render_board(
    outcomes: &[ProbeOutcome],
    tracker: &HealthTracker,
    incident: Option<&Incident>,
    now: Instant,
    updated_at: &DateTime<Local>,
) -> Board {
    let mut blocks = vec![context(format!(
        "Updated: {}",
        updated_at.format("%Y-%m-%d %H:%M:%S")
    ))];

    let mut envs: Vec<&str> = Vec::new();
    for outcome in outcomes {
        if !envs.contains(&outcome.service.env.as_str()) {
            envs.push(&outcome.service.env);
        }
    }

    for env in envs {
        blocks.push(context(env_heading(env)));
        for outcome in outcomes.iter().filter(|o| o.service.env == env) {
            let down_since = tracker.down_since(&outcome.service.key());
            blocks.push(section(render_service_line(outcome, down_since, now)));
        }
        blocks.push(divider());
    }

    let healthy = outcomes.iter().filter(|o| o.up).count();
    let down = outcomes.len() - healthy;
    let summary = format!("{healthy} healthy  •  {down} down");

    let mut footer = summary.clone();
    if let Some(line) = render_last_incident(incident, now) {
        footer.push('\n');
        footer.push_str(&line);
    }
    blocks.push(context(footer));

    Board { text: summary, blocks }
}

/// Build at most two alert messages: one for the cycle's downs, one for its ups.
pub fn render_alerts(transitions: &[Transition]) -> Vec<String> {
    let mut down_lines = Vec::new();
    let mut up_lines = Vec::new();

    for transition in transitions {
        match &transition.kind {
            TransitionKind::Down { error } => {
                down_lines.push(format!("• *{}*: `{}`", transition.service_name, error));
            }
            TransitionKind::Up { downtime: Some(downtime) } => {
                up_lines.push(format!(
                    "• *{}* (was down {})",
                    transition.service_name,
                    format_duration(*downtime)
                ));
            }
            TransitionKind::Up { downtime: None } => {
                up_lines.push(format!("• *{}*", transition.service_name));
            }
        }
    }

    let mut alerts = Vec::new();
    if !down_lines.is_empty() {
        alerts.push(format!("🔴 *Services DOWN* <!here>\n{}", down_lines.join("\n")));
    }
    if !up_lines.is_empty() {
        alerts.push(format!("🟢 *Services back UP*\n{}", up_lines.join("\n")));
    }
    alerts
}
