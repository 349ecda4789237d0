use std::fmt::Write;

use crate::api::models::{ChatExchange, Incident, NewsItem};
use crate::ui::dashboard::{OpKind, OpStatus, Snapshot};

/// All three panels plus the status line, ready to print.
pub fn render(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    out.push_str(&news_panel(&snapshot.news));
    out.push_str(&chat_panel(snapshot.chat.as_ref()));
    out.push_str(&incidents_panel(&snapshot.incidents));
    if !snapshot.description_draft.is_empty() || !snapshot.location_draft.is_empty() {
        let _ = writeln!(
            out,
            "draft report: \"{}\" @ \"{}\"",
            snapshot.description_draft, snapshot.location_draft
        );
    }
    let status = status_line(snapshot);
    if !status.is_empty() {
        let _ = writeln!(out, "{status}");
    }
    out
}

pub fn news_panel(items: &[NewsItem]) -> String {
    let mut out = String::from("=== News ===\n");
    if items.is_empty() {
        out.push_str("No news yet.\n");
    }
    for item in items {
        let _ = writeln!(out, "- {}", item.title);
        if !item.summary.is_empty() {
            let _ = writeln!(out, "  {}", item.summary);
        }
        if !item.link.is_empty() {
            let _ = writeln!(out, "  {}", item.link);
        }
    }
    out.push('\n');
    out
}

pub fn chat_panel(exchange: Option<&ChatExchange>) -> String {
    let mut out = String::from("=== Chatbot ===\n");
    match exchange {
        Some(ex) => {
            let _ = writeln!(out, "you: {}", ex.message);
            let _ = writeln!(out, "bot: {}", ex.reply);
        }
        None => out.push_str("No conversation yet.\n"),
    }
    out.push('\n');
    out
}

pub fn incidents_panel(incidents: &[Incident]) -> String {
    let mut out = String::from("=== Incidents ===\n");
    if incidents.is_empty() {
        out.push_str("No incidents reported.\n");
    }
    for inc in incidents {
        let _ = writeln!(out, "#{} [{}] {}", inc.id, inc.location, inc.description);
        if !inc.created_at.is_empty() {
            let _ = writeln!(out, "    reported {}", inc.created_at);
        }
    }
    out.push('\n');
    out
}

/// In-flight and failed operations, one note each; empty when all is quiet.
pub fn status_line(snapshot: &Snapshot) -> String {
    let mut parts = Vec::new();
    for op in OpKind::ALL {
        match snapshot.status(op) {
            OpStatus::Idle => {}
            OpStatus::Busy => parts.push(format!("loading {}…", op.label())),
            OpStatus::Failed(message) => parts.push(message.to_string()),
        }
    }
    parts.join("  ")
}
