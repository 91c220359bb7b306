//! Filter → sort → group over the ticket collection.
//!
//! Everything here is a pure function of the tickets and the query state; it
//! runs on every render pass and never touches the store.

use std::cmp::Ordering;

use crate::model::{Status, Ticket};
use crate::query::{QueryState, SortDirection, SortKey, TicketFilters};

/// Tickets partitioned into the four board columns, each in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusGroups<'a> {
    pub open: Vec<&'a Ticket>,
    pub in_progress: Vec<&'a Ticket>,
    pub resolved: Vec<&'a Ticket>,
    pub closed: Vec<&'a Ticket>,
}

impl<'a> StatusGroups<'a> {
    #[must_use]
    pub fn column(&self, status: Status) -> &[&'a Ticket] {
        match status {
            Status::Open => &self.open,
            Status::InProgress => &self.in_progress,
            Status::Resolved => &self.resolved,
            Status::Closed => &self.closed,
        }
    }

    /// Columns in board order.
    pub fn columns(&self) -> impl Iterator<Item = (Status, &[&'a Ticket])> {
        Status::ALL.into_iter().map(|s| (s, self.column(s)))
    }
}

/// The derived view: flat sorted list plus the kanban grouping of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketView<'a> {
    pub tickets: Vec<&'a Ticket>,
    pub groups: StatusGroups<'a>,
}

impl TicketView<'_> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

/// Run the whole pipeline.
#[must_use]
pub fn run<'a>(tickets: &'a [Ticket], state: &QueryState) -> TicketView<'a> {
    let mut filtered = filter_tickets(tickets, &state.filters);
    sort_tickets(&mut filtered, state.sort, state.direction);
    let groups = group_by_status(&filtered);
    TicketView {
        tickets: filtered,
        groups,
    }
}

/// Whether a ticket passes the search text and every categorical filter.
#[must_use]
pub fn matches_filters(ticket: &Ticket, filters: &TicketFilters) -> bool {
    let query = filters.search.to_lowercase();
    let matches_search = query.is_empty()
        || ticket.title.to_lowercase().contains(&query)
        || ticket.description.to_lowercase().contains(&query)
        || ticket
            .customer_name
            .as_ref()
            .is_some_and(|c| c.to_lowercase().contains(&query));
    if !matches_search {
        return false;
    }

    if filters.status.is_some_and(|s| s != ticket.status) {
        return false;
    }
    if filters.priority.is_some_and(|p| p != ticket.priority) {
        return false;
    }
    if let Some(ref assignee) = filters.assignee {
        if ticket.assignee.as_deref() != Some(assignee.as_str()) {
            return false;
        }
    }
    true
}

/// Keep the tickets that pass `filters`, preserving input order.
pub fn filter_tickets<'a, I>(tickets: I, filters: &TicketFilters) -> Vec<&'a Ticket>
where
    I: IntoIterator<Item = &'a Ticket>,
{
    tickets
        .into_iter()
        .filter(|t| matches_filters(t, filters))
        .collect()
}

/// Compare two tickets on `key` in ascending order, without tie-break.
///
/// Missing due dates sort after every present one.
#[must_use]
pub fn compare_key(a: &Ticket, b: &Ticket, key: SortKey) -> Ordering {
    match key {
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        SortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        SortKey::DueDate => match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortKey::Priority => a.priority.cmp(&b.priority),
        SortKey::Title => a.title.cmp(&b.title),
    }
}

/// Full comparator: key in `direction`, then ascending id.
#[must_use]
pub fn compare(a: &Ticket, b: &Ticket, key: SortKey, direction: SortDirection) -> Ordering {
    let primary = compare_key(a, b, key);
    let primary = match direction {
        SortDirection::Asc => primary,
        SortDirection::Desc => primary.reverse(),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

/// Sort in place by `key` and `direction`.
pub fn sort_tickets(tickets: &mut [&Ticket], key: SortKey, direction: SortDirection) {
    tickets.sort_by(|a, b| compare(a, b, key, direction));
}

/// Partition into status columns, keeping relative order.
#[must_use]
pub fn group_by_status<'a>(tickets: &[&'a Ticket]) -> StatusGroups<'a> {
    let mut groups = StatusGroups::default();
    for &ticket in tickets {
        match ticket.status {
            Status::Open => groups.open.push(ticket),
            Status::InProgress => groups.in_progress.push(ticket),
            Status::Resolved => groups.resolved.push(ticket),
            Status::Closed => groups.closed.push(ticket),
        }
    }
    groups
}
