//! Plain-text rendering of workflow results for the terminal.

use std::fmt::Write as _;

use client_core::{
    ClientError, EndpointRegistry, OperationState, ShortenOutcome, StatusView, WorkflowEvent,
    WorkflowOperation, WorkflowState,
};
use shared::domain::LifetimeChoice;

pub fn into_report(err: ClientError) -> anyhow::Error {
    if err.is_user_error() {
        anyhow::anyhow!("{err}")
    } else {
        anyhow::anyhow!("request failed: {err}")
    }
}

pub fn lifetime_label(raw: &str) -> String {
    raw.parse::<LifetimeChoice>()
        .map(|choice| choice.label().to_string())
        .unwrap_or_else(|_| format!("{raw} days"))
}

pub fn shorten_outcome(outcome: &ShortenOutcome) -> String {
    format!(
        "Short URL: {}\nOriginal:  {}\nLifetime:  {}\nCreated:   {}",
        outcome.short_url,
        outcome.original_url,
        lifetime_label(&outcome.lifetime),
        outcome.created_at.format("%Y-%m-%d"),
    )
}

pub fn endpoints(registry: &EndpointRegistry) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "base url:    {}", registry.base_url());
    let _ = writeln!(out, "environment: {}", registry.environment());
    for (operation, definition) in registry.describe() {
        let _ = writeln!(
            out,
            "  {:<15} {:<6} {:<16} {}",
            operation.name(),
            definition.method.as_str(),
            definition.path.render(&["{code}"]),
            definition.description,
        );
    }
    out
}

fn operation_name(operation: WorkflowOperation) -> &'static str {
    match operation {
        WorkflowOperation::Shorten => "shorten",
        WorkflowOperation::Check => "check",
        WorkflowOperation::Extend => "extend",
    }
}

/// One progress line per workflow event; results themselves are printed by
/// the command that started the operation.
pub fn event_line(event: &WorkflowEvent) -> String {
    match event {
        WorkflowEvent::Pending(operation) => format!("[{}] pending", operation_name(*operation)),
        WorkflowEvent::Succeeded(operation) => format!("[{}] done", operation_name(*operation)),
        WorkflowEvent::Failed { operation, .. } => {
            format!("[{}] failed", operation_name(*operation))
        }
    }
}

fn state_line<T>(name: &str, state: &OperationState<T>, describe: impl Fn(&T) -> String) -> String {
    let detail = match state {
        OperationState::Idle => "idle".to_string(),
        OperationState::Pending => "pending".to_string(),
        OperationState::Succeeded(value) => describe(value),
        OperationState::Failed(err) => format!("failed: {err}"),
    };
    format!("{name:<8} {detail}")
}

pub fn workflow_state(state: &WorkflowState, copied: bool) -> String {
    let mut lines = vec![
        state_line("shorten", &state.shorten, |outcome| {
            let marker = if copied { " (copied)" } else { "" };
            format!("{}{marker}", outcome.short_url)
        }),
        state_line("check", &state.check, |status| {
            let view = StatusView::from(status);
            match view.remaining_label() {
                Some(remaining) => format!("{} ({remaining})", view.status_label()),
                None => view.status_label().to_string(),
            }
        }),
        state_line("extend", &state.extend, |status| {
            format!("lifetime {}", StatusView::from(status).lifetime_label())
        }),
    ];
    if let Some(reference) = &state.checked {
        lines.push(format!("checked  {} (code {})", reference.raw_url, reference.code));
    }
    lines.join("\n")
}
