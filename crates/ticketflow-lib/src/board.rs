//! Kanban status transitions.
//!
//! A card drop is a request to move ticket `id` into column `target`. The
//! closed column is archived: nothing may be dropped into it and nothing in it
//! may be dragged out. Rejections change nothing.

use std::fmt;
use std::str::FromStr;

use crate::error::TicketError;
use crate::model::{Status, Ticket, TicketId};

/// Why a status change was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The target column does not accept drops.
    RestrictedColumn,
    /// The ticket sits in a locked column.
    LockedTicket { id: TicketId },
    /// No ticket with this id.
    NotFound { id: TicketId },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RestrictedColumn => {
                write!(f, "Cannot move tickets to Closed status via drag and drop")
            }
            Self::LockedTicket { id } => write!(f, "Ticket {id} is closed and cannot be moved"),
            Self::NotFound { id } => write!(f, "Ticket not found: {id}"),
        }
    }
}

/// Outcome of a board status change request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The move was applied; carries the updated ticket.
    Accepted(Ticket),
    Rejected(Rejection),
}

impl Transition {
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Decide whether `ticket` (looked up by `id`) may move into `target`.
///
/// The target column is checked before the ticket, so dropping onto the
/// closed column is refused even for unknown ids.
///
/// # Errors
///
/// Returns the [`Rejection`] describing why the move is refused.
pub fn check_transition(
    id: TicketId,
    ticket: Option<&Ticket>,
    target: Status,
) -> Result<(), Rejection> {
    if target.is_restricted() {
        return Err(Rejection::RestrictedColumn);
    }
    let ticket = ticket.ok_or(Rejection::NotFound { id })?;
    if ticket.status.is_restricted() {
        return Err(Rejection::LockedTicket { id });
    }
    Ok(())
}

/// Card menu shortcuts. Each one is a board move to a fixed column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    Start,
    Resolve,
    Reopen,
}

impl QuickAction {
    pub const ALL: [Self; 3] = [Self::Start, Self::Resolve, Self::Reopen];

    #[must_use]
    pub const fn target(self) -> Status {
        match self {
            Self::Start => Status::InProgress,
            Self::Resolve => Status::Resolved,
            Self::Reopen => Status::Open,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Resolve => "resolve",
            Self::Reopen => "reopen",
        }
    }

    /// Whether the card menu shows this action for a ticket in `status`.
    #[must_use]
    pub const fn is_offered(self, status: Status) -> bool {
        match self {
            Self::Start => matches!(status, Status::Open),
            Self::Resolve => matches!(status, Status::Open | Status::InProgress),
            Self::Reopen => matches!(status, Status::Resolved),
        }
    }

    /// Actions offered for a ticket in `status`, in menu order.
    #[must_use]
    pub fn offered_for(status: Status) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|a| a.is_offered(status))
            .collect()
    }
}

impl fmt::Display for QuickAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuickAction {
    type Err = TicketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "start" => Ok(Self::Start),
            "resolve" => Ok(Self::Resolve),
            "reopen" => Ok(Self::Reopen),
            other => Err(TicketError::validation(
                "action",
                format!("unknown quick action '{other}'"),
            )),
        }
    }
}
