//! Dashboard statistics.
//!
//! [`TicketStats`] always covers the whole collection, independent of the
//! current filters. [`ColumnStats`] summarizes one rendered board column.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{Priority, Status, Ticket};

/// Counters shown on the dashboard stats cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketStats {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub closed: usize,
    pub critical: usize,
    pub overdue: usize,
}

impl TicketStats {
    /// Compute over the full, unfiltered collection.
    #[must_use]
    pub fn compute(tickets: &[Ticket], now: DateTime<Utc>) -> Self {
        let mut stats = Self {
            total: tickets.len(),
            ..Self::default()
        };
        for ticket in tickets {
            match ticket.status {
                Status::Open => stats.open += 1,
                Status::InProgress => stats.in_progress += 1,
                Status::Resolved => stats.resolved += 1,
                Status::Closed => stats.closed += 1,
            }
            if ticket.priority == Priority::Critical {
                stats.critical += 1;
            }
            if ticket.is_overdue(now) {
                stats.overdue += 1;
            }
        }
        stats
    }

    #[must_use]
    pub const fn count_for(&self, status: Status) -> usize {
        match status {
            Status::Open => self.open,
            Status::InProgress => self.in_progress,
            Status::Resolved => self.resolved,
            Status::Closed => self.closed,
        }
    }
}

/// Per-column breakdown shown in each board column footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnStats {
    pub status: Status,
    pub count: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub overdue: usize,
}

impl ColumnStats {
    #[must_use]
    pub fn compute(status: Status, tickets: &[&Ticket], now: DateTime<Utc>) -> Self {
        let by_priority = |p: Priority| tickets.iter().filter(|t| t.priority == p).count();
        Self {
            status,
            count: tickets.len(),
            critical: by_priority(Priority::Critical),
            high: by_priority(Priority::High),
            medium: by_priority(Priority::Medium),
            low: by_priority(Priority::Low),
            overdue: tickets.iter().filter(|t| t.is_overdue(now)).count(),
        }
    }
}
