//! Text formatting functions for `ticketflow`.
//!
//! Provides plain text (non-ANSI) formatting for terminal output:
//! - Status icons (○ ◐ ✓ ✗)
//! - Priority badges ([critical], [high], ...)
//! - Relative due labels ("Tomorrow", "3 days overdue")
//! - Ticket lines and kanban columns

use chrono::{DateTime, Utc};
use ticketflow_lib::{ColumnStats, Status, Ticket, TicketStats};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Status icon characters.
pub mod icons {
    /// Open ticket - awaiting assignment (hollow circle).
    pub const OPEN: &str = "○";
    /// In progress - active work (half-filled).
    pub const IN_PROGRESS: &str = "◐";
    /// Resolved - completed and verified (checkmark).
    pub const RESOLVED: &str = "✓";
    /// Closed - archived and locked (X mark).
    pub const CLOSED: &str = "✗";
}

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Title width on a single ticket line.
pub const TITLE_WIDTH: usize = 48;

/// Return the icon character for a status.
#[must_use]
pub const fn format_status_icon(status: Status) -> &'static str {
    match status {
        Status::Open => icons::OPEN,
        Status::InProgress => icons::IN_PROGRESS,
        Status::Resolved => icons::RESOLVED,
        Status::Closed => icons::CLOSED,
    }
}

/// Format priority as a bracketed badge.
#[must_use]
pub fn format_priority_badge(priority: ticketflow_lib::Priority) -> String {
    format!("[{}]", priority.as_str())
}

/// Short subtitle under each board column header.
#[must_use]
pub const fn column_description(status: Status) -> &'static str {
    match status {
        Status::Open => "New tickets awaiting assignment",
        Status::InProgress => "Currently being worked on",
        Status::Resolved => "Completed and verified",
        Status::Closed => "Archived and locked",
    }
}

/// Whole days until `due`, rounded up (negative when past).
#[must_use]
pub fn days_until(due: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let ms = (due - now).num_milliseconds();
    -(-ms).div_euclid(MS_PER_DAY)
}

/// Relative due label as shown on a ticket card.
#[must_use]
pub fn format_due_label(due: DateTime<Utc>, now: DateTime<Utc>) -> String {
    match days_until(due, now) {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        days if days > 0 => format!("{days} days left"),
        days => format!("{} days overdue", days.abs()),
    }
}

/// Truncate `text` to at most `max_width` terminal columns, ending in `…`.
#[must_use]
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

/// Format a single-line ticket summary.
///
/// Format: `{icon} #{id} [{priority}] {title} · {assignee} · {due}`
#[must_use]
pub fn format_ticket_line(ticket: &Ticket, now: DateTime<Utc>) -> String {
    let mut line = format!(
        "{} #{} {} {}",
        format_status_icon(ticket.status),
        ticket.id,
        format_priority_badge(ticket.priority),
        truncate_to_width(&ticket.title, TITLE_WIDTH),
    );
    if let Some(ref assignee) = ticket.assignee {
        line.push_str(" · ");
        line.push_str(assignee);
    }
    if let Some(due) = ticket.due_date {
        line.push_str(" · ");
        line.push_str(&format_due_label(due, now));
        if ticket.is_overdue(now) {
            line.push_str(" !");
        }
    }
    line
}

/// Column header, e.g. `◐ In Progress (2)`, with a lock marker on Closed.
#[must_use]
pub fn format_column_header(status: Status, count: usize) -> String {
    let lock = if status.is_restricted() {
        " [locked]"
    } else {
        ""
    };
    format!(
        "{} {} ({count}){lock}  {}",
        format_status_icon(status),
        status.title(),
        column_description(status)
    )
}

/// The badge row under a column header. Empty for locked or empty columns.
#[must_use]
pub fn format_column_stats(stats: &ColumnStats) -> Option<String> {
    if stats.count == 0 || stats.status.is_restricted() {
        return None;
    }
    let mut parts = Vec::new();
    if stats.critical > 0 {
        parts.push(format!("{} Critical", stats.critical));
    }
    if stats.overdue > 0 {
        parts.push(format!("{} Overdue", stats.overdue));
    }
    if stats.high > 0 {
        parts.push(format!("{} High", stats.high));
    }
    (!parts.is_empty()).then(|| parts.join(" · "))
}

/// Dashboard stats cards as text lines.
#[must_use]
pub fn format_stats(stats: &TicketStats) -> Vec<String> {
    vec![
        format!("Total:        {}", stats.total),
        format!("Open:         {}", stats.open),
        format!("In Progress:  {}", stats.in_progress),
        format!("Resolved:     {}", stats.resolved),
        format!("Closed:       {}", stats.closed),
        format!("Critical:     {}", stats.critical),
        format!("Overdue:      {}", stats.overdue),
    ]
}
