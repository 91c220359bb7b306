//! In-memory ticket store backed by an ordered `Vec`.
//!
//! The store only mutates memory. Flushing to persistence after each
//! mutation is the job of [`crate::desk::TicketDesk`].

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::{Result, TicketError};
use crate::model::{Ticket, TicketId};
use crate::query::{NewTicket, TicketPatch};
use crate::util::{allocate_id, next_timestamp};

/// Ordered, in-memory ticket collection.
///
/// Tickets keep insertion order; that order is what gets persisted.
#[derive(Debug, Clone, Default)]
pub struct TicketStore {
    tickets: Vec<Ticket>,
    last_id: TicketId,
}

impl TicketStore {
    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a loaded collection.
    ///
    /// # Errors
    ///
    /// Returns `IdCollision` if two tickets share an ID.
    pub fn from_tickets(tickets: Vec<Ticket>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(tickets.len());
        for ticket in &tickets {
            if !seen.insert(ticket.id) {
                return Err(TicketError::IdCollision { id: ticket.id });
            }
        }
        let last_id = tickets.iter().map(|t| t.id).max().unwrap_or(0);
        Ok(Self { tickets, last_id })
    }

    // ========================================================================
    // CRUD
    // ========================================================================

    /// Create a ticket stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the title is blank.
    pub fn create(&mut self, payload: NewTicket) -> Result<Ticket> {
        self.create_at(payload, Utc::now())
    }

    /// Create a ticket as of `now`.
    ///
    /// `createdAt` and `updatedAt` are both set to `now`.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the title is blank, or `IdSpaceExhausted`
    /// when no higher ID can be allocated.
    pub fn create_at(&mut self, payload: NewTicket, now: DateTime<Utc>) -> Result<Ticket> {
        if payload.title.trim().is_empty() {
            return Err(TicketError::validation("title", "cannot be empty"));
        }

        let id = allocate_id(now, self.last_id, self.tickets.iter().map(|t| &t.id))?;
        self.last_id = id;

        let ticket = Ticket {
            id,
            title: payload.title,
            description: payload.description,
            status: payload.status,
            priority: payload.priority,
            assignee: payload.assignee,
            customer_name: payload.customer_name,
            created_at: now,
            updated_at: now,
            due_date: payload.due_date,
            estimated_hours: payload.estimated_hours,
            tags: payload.tags,
        };
        self.tickets.push(ticket.clone());

        info!(id, title = %ticket.title, "ticket created");
        Ok(ticket)
    }

    /// Merge `patch` into a ticket, stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns `TicketNotFound` if the ticket doesn't exist,
    /// or `Validation` if the patch blanks the title.
    pub fn update(&mut self, id: TicketId, patch: &TicketPatch) -> Result<Ticket> {
        self.update_at(id, patch, Utc::now())
    }

    /// Merge `patch` into a ticket as of `now`.
    ///
    /// `updatedAt` always moves forward, even when `now` does not.
    ///
    /// # Errors
    ///
    /// Returns `TicketNotFound` if the ticket doesn't exist,
    /// or `Validation` if the patch blanks the title.
    pub fn update_at(
        &mut self,
        id: TicketId,
        patch: &TicketPatch,
        now: DateTime<Utc>,
    ) -> Result<Ticket> {
        if patch.title.as_ref().is_some_and(|t| t.trim().is_empty()) {
            return Err(TicketError::validation("title", "cannot be empty"));
        }

        let ticket = self
            .tickets
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TicketError::TicketNotFound { id })?;

        if let Some(ref title) = patch.title {
            ticket.title.clone_from(title);
        }
        if let Some(ref description) = patch.description {
            ticket.description.clone_from(description);
        }
        if let Some(status) = patch.status {
            ticket.status = status;
        }
        if let Some(priority) = patch.priority {
            ticket.priority = priority;
        }
        if let Some(ref assignee) = patch.assignee {
            ticket.assignee.clone_from(assignee);
        }
        if let Some(ref customer) = patch.customer_name {
            ticket.customer_name.clone_from(customer);
        }
        if let Some(due) = patch.due_date {
            ticket.due_date = due;
        }
        if let Some(hours) = patch.estimated_hours {
            ticket.estimated_hours = hours;
        }
        if let Some(ref tags) = patch.tags {
            ticket.tags.clone_from(tags);
        }

        ticket.updated_at = next_timestamp(now, ticket.updated_at);

        info!(id, status = %ticket.status, "ticket updated");
        Ok(ticket.clone())
    }

    /// Remove a ticket, returning it.
    ///
    /// # Errors
    ///
    /// Returns `TicketNotFound` if the ticket doesn't exist.
    pub fn delete(&mut self, id: TicketId) -> Result<Ticket> {
        let pos = self
            .tickets
            .iter()
            .position(|t| t.id == id)
            .ok_or(TicketError::TicketNotFound { id })?;
        let removed = self.tickets.remove(pos);
        info!(id, "ticket deleted");
        Ok(removed)
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Get a single ticket by ID.
    ///
    /// # Errors
    ///
    /// Returns `TicketNotFound` if the ticket doesn't exist.
    pub fn get(&self, id: TicketId) -> Result<&Ticket> {
        self.tickets
            .iter()
            .find(|t| t.id == id)
            .ok_or(TicketError::TicketNotFound { id })
    }

    #[must_use]
    pub fn id_exists(&self, id: TicketId) -> bool {
        self.tickets.iter().any(|t| t.id == id)
    }

    /// All tickets in insertion order.
    #[must_use]
    pub fn all(&self) -> &[Ticket] {
        &self.tickets
    }

    /// Distinct non-empty assignees in first-seen order.
    #[must_use]
    pub fn unique_assignees(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.tickets
            .iter()
            .filter_map(|t| t.assignee.as_deref())
            .filter(|a| !a.is_empty() && seen.insert(*a))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, Status};
    use chrono::{Duration, TimeZone};

    fn payload(title: &str) -> NewTicket {
        NewTicket {
            title: title.to_string(),
            description: "Something needs attention".to_string(),
            ..Default::default()
        }
    }

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    #[test]
    fn test_create_and_get() {
        let mut store = TicketStore::new();
        let created = store.create(payload("Printer jam")).unwrap();

        assert_eq!(created.created_at, created.updated_at);
        assert_eq!(created.status, Status::Open);
        assert_eq!(store.get(created.id).unwrap().title, "Printer jam");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_create_in_same_millisecond_gets_unique_ids() {
        let mut store = TicketStore::new();
        let now = at(1_700_000_000_000);
        let a = store.create_at(payload("First"), now).unwrap();
        let b = store.create_at(payload("Second"), now).unwrap();
        let c = store.create_at(payload("Third"), now).unwrap();

        assert_eq!(a.id, now.timestamp_millis());
        assert!(a.id < b.id && b.id < c.id);
    }

    #[test]
    fn test_create_empty_title_rejected() {
        let mut store = TicketStore::new();
        let result = store.create(payload("   "));
        assert!(matches!(result, Err(TicketError::Validation { .. })));
        assert!(store.is_empty());
    }

    #[test]
    fn test_from_tickets_rejects_duplicate_ids() {
        let ticket = Ticket {
            id: 4,
            title: "Dup".to_string(),
            ..Default::default()
        };
        let result = TicketStore::from_tickets(vec![ticket.clone(), ticket]);
        assert!(matches!(result, Err(TicketError::IdCollision { id: 4 })));
    }

    #[test]
    fn test_new_ids_follow_loaded_ids() {
        let far_future = Ticket {
            id: i64::from(u32::MAX) * 1_000,
            title: "Future".to_string(),
            ..Default::default()
        };
        let mut store = TicketStore::from_tickets(vec![far_future.clone()]).unwrap();
        let created = store.create(payload("Next")).unwrap();
        assert_eq!(created.id, far_future.id + 1);
    }

    #[test]
    fn test_update_merges_and_refreshes_updated_at() {
        let mut store = TicketStore::new();
        let created = store.create_at(payload("Printer jam"), at(1_000)).unwrap();

        let patch = TicketPatch {
            priority: Some(Priority::Critical),
            assignee: Some(Some("Mike Chen".to_string())),
            ..Default::default()
        };
        let updated = store.update_at(created.id, &patch, at(5_000)).unwrap();

        assert_eq!(updated.priority, Priority::Critical);
        assert_eq!(updated.assignee.as_deref(), Some("Mike Chen"));
        assert_eq!(updated.title, "Printer jam");
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.updated_at, at(5_000));
    }

    #[test]
    fn test_update_advances_even_when_clock_does_not() {
        let mut store = TicketStore::new();
        let created = store.create_at(payload("Printer jam"), at(1_000)).unwrap();

        let first = store
            .update_at(created.id, &TicketPatch::status(Status::Resolved), at(1_000))
            .unwrap();
        let second = store
            .update_at(created.id, &TicketPatch::status(Status::Open), at(900))
            .unwrap();

        assert!(first.updated_at > created.updated_at);
        assert!(second.updated_at > first.updated_at);
        assert_eq!(second.updated_at - first.updated_at, Duration::milliseconds(1));
    }

    #[test]
    fn test_update_clears_optional_fields() {
        let mut store = TicketStore::new();
        let mut draft = payload("Printer jam");
        draft.customer_name = Some("Acme".to_string());
        draft.estimated_hours = Some(4);
        let created = store.create(draft).unwrap();

        let patch = TicketPatch {
            customer_name: Some(None),
            estimated_hours: Some(None),
            ..Default::default()
        };
        let updated = store.update(created.id, &patch).unwrap();
        assert!(updated.customer_name.is_none());
        assert!(updated.estimated_hours.is_none());
    }

    #[test]
    fn test_update_nonexistent() {
        let mut store = TicketStore::new();
        let result = store.update(42, &TicketPatch::status(Status::Resolved));
        assert!(matches!(result, Err(TicketError::TicketNotFound { id: 42 })));
    }

    #[test]
    fn test_delete_ticket() {
        let mut store = TicketStore::new();
        let keep = store.create(payload("Keep me")).unwrap();
        let gone = store.create(payload("Remove me")).unwrap();

        let removed = store.delete(gone.id).unwrap();
        assert_eq!(removed.id, gone.id);
        assert!(!store.id_exists(gone.id));
        assert!(store.id_exists(keep.id));
        assert!(matches!(
            store.delete(gone.id),
            Err(TicketError::TicketNotFound { .. })
        ));
    }

    #[test]
    fn test_unique_assignees_first_seen_order() {
        let mut store = TicketStore::new();
        for assignee in [Some("Lisa"), None, Some("Mike"), Some("Lisa"), Some("")] {
            let mut draft = payload("Assigned work");
            draft.assignee = assignee.map(String::from);
            store.create(draft).unwrap();
        }
        assert_eq!(store.unique_assignees(), vec!["Lisa", "Mike"]);
    }
}
