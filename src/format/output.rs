use chrono::{DateTime, Utc};
use serde::Serialize;
use ticketflow_lib::{
    ColumnStats, QuickAction, Rejection, Status, Ticket, TicketStats, TicketView, Transition,
    UserProfile,
};

use super::text::{column_description, format_due_label};

/// One kanban column for board/dashboard output.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardColumn<'a> {
    pub status: Status,
    pub title: &'static str,
    pub description: &'static str,
    pub restricted: bool,
    pub stats: ColumnStats,
    pub tickets: Vec<&'a Ticket>,
}

impl<'a> BoardColumn<'a> {
    /// All four columns of `view`, in board order.
    #[must_use]
    pub fn from_view(view: &TicketView<'a>, now: DateTime<Utc>) -> Vec<Self> {
        view.groups
            .columns()
            .map(|(status, tickets)| Self {
                status,
                title: status.title(),
                description: column_description(status),
                restricted: status.is_restricted(),
                stats: ColumnStats::compute(status, tickets, now),
                tickets: tickets.to_vec(),
            })
            .collect()
    }
}

/// Ticket with derived card details for show view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDetails<'a> {
    #[serde(flatten)]
    pub ticket: &'a Ticket,
    pub overdue: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_label: Option<String>,
    pub actions: Vec<&'static str>,
}

impl<'a> TicketDetails<'a> {
    #[must_use]
    pub fn new(ticket: &'a Ticket, now: DateTime<Utc>) -> Self {
        Self {
            ticket,
            overdue: ticket.is_overdue(now),
            due_label: ticket.due_date.map(|d| format_due_label(d, now)),
            actions: QuickAction::offered_for(ticket.status)
                .into_iter()
                .map(QuickAction::as_str)
                .collect(),
        }
    }
}

/// Full dashboard payload: user, stats and the current view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOutput<'a> {
    pub user: &'a UserProfile,
    pub stats: TicketStats,
    pub view: &'static str,
    pub sort: &'static str,
    pub order: &'static str,
    pub assignees: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickets: Option<Vec<&'a Ticket>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<BoardColumn<'a>>>,
}

/// Result of a board move or quick action.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionOutput {
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket: Option<Ticket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&Transition> for TransitionOutput {
    fn from(outcome: &Transition) -> Self {
        match outcome {
            Transition::Accepted(ticket) => Self {
                accepted: true,
                ticket: Some(ticket.clone()),
                reason: None,
                message: None,
            },
            Transition::Rejected(rejection) => Self {
                accepted: false,
                ticket: None,
                reason: Some(rejection_code(*rejection)),
                message: Some(rejection.to_string()),
            },
        }
    }
}

/// Stable machine-readable name for a rejection.
#[must_use]
pub const fn rejection_code(rejection: Rejection) -> &'static str {
    match rejection {
        Rejection::RestrictedColumn => "restricted-column",
        Rejection::LockedTicket { .. } => "locked-ticket",
        Rejection::NotFound { .. } => "not-found",
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutput {
    pub deleted: i64,
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOutput {
    pub path: String,
    pub count: usize,
}
