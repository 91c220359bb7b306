//! Payload, patch and query types for ticket operations.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

use crate::error::TicketError;
use crate::model::{Priority, Status};

/// Fields of a ticket about to be created. The store assigns id and timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub assignee: Option<String>,
    pub customer_name: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub estimated_hours: Option<u32>,
    pub tags: Vec<String>,
}

/// Fields to update on a ticket. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub assignee: Option<Option<String>>,
    pub customer_name: Option<Option<String>>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub estimated_hours: Option<Option<u32>>,
    pub tags: Option<Vec<String>>,
}

impl TicketPatch {
    /// Status-only patch, as produced by a board drop.
    #[must_use]
    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.assignee.is_none()
            && self.customer_name.is_none()
            && self.due_date.is_none()
            && self.estimated_hours.is_none()
            && self.tags.is_none()
    }
}

impl From<NewTicket> for TicketPatch {
    /// Full-field patch: every field of the payload overwrites the ticket.
    fn from(draft: NewTicket) -> Self {
        Self {
            title: Some(draft.title),
            description: Some(draft.description),
            status: Some(draft.status),
            priority: Some(draft.priority),
            assignee: Some(draft.assignee),
            customer_name: Some(draft.customer_name),
            due_date: Some(draft.due_date),
            estimated_hours: Some(draft.estimated_hours),
            tags: Some(draft.tags),
        }
    }
}

/// Categorical filters. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketFilters {
    /// Case-insensitive substring over title, description and customer name.
    pub search: String,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub assignee: Option<String>,
}

/// Parse a filter selection where `all` (or empty) means no filter.
///
/// # Errors
///
/// Returns the parse error of `T` for any other unrecognized value.
pub fn parse_selection<T: FromStr>(value: &str) -> Result<Option<T>, T::Err> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
        Ok(None)
    } else {
        trimmed.parse().map(Some)
    }
}

/// Sortable ticket fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    CreatedAt,
    UpdatedAt,
    DueDate,
    Priority,
    Title,
}

impl SortKey {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
            Self::DueDate => "dueDate",
            Self::Priority => "priority",
            Self::Title => "title",
        }
    }

    /// Keys compared as instants rather than by natural value.
    #[must_use]
    pub const fn is_timestamp(&self) -> bool {
        matches!(self, Self::CreatedAt | Self::UpdatedAt | Self::DueDate)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = TicketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', '-'], "").as_str() {
            "createdat" | "created" => Ok(Self::CreatedAt),
            "updatedat" | "updated" => Ok(Self::UpdatedAt),
            "duedate" | "due" => Ok(Self::DueDate),
            "priority" => Ok(Self::Priority),
            "title" => Ok(Self::Title),
            _ => Err(TicketError::InvalidSort {
                value: s.to_string(),
            }),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl FromStr for SortDirection {
    type Err = TicketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            _ => Err(TicketError::InvalidSort {
                value: s.to_string(),
            }),
        }
    }
}

/// How the dashboard lays out the derived view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Kanban,
    List,
}

impl ViewMode {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Kanban => "kanban",
            Self::List => "list",
        }
    }
}

impl FromStr for ViewMode {
    type Err = TicketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kanban" | "board" => Ok(Self::Kanban),
            "list" => Ok(Self::List),
            _ => Err(TicketError::InvalidView {
                value: s.to_string(),
            }),
        }
    }
}

/// Transient dashboard query state; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    pub filters: TicketFilters,
    pub sort: SortKey,
    pub direction: SortDirection,
    pub view: ViewMode,
}
