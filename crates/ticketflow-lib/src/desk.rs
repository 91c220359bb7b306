//! The dashboard's owning state: persistence, session and ticket store.
//!
//! Every mutating operation writes the whole collection back before it
//! returns, so the persisted document always matches memory.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::board::{QuickAction, Transition, check_transition};
use crate::editor::TicketForm;
use crate::error::{Result, TicketError};
use crate::model::{Status, Ticket, TicketId, UserProfile};
use crate::persist::{KeyValueStore, Persistence, keys};
use crate::pipeline::{self, TicketView};
use crate::query::{NewTicket, QueryState, TicketPatch};
use crate::seed::demo_tickets;
use crate::session::SessionGate;
use crate::stats::TicketStats;
use crate::store::TicketStore;

/// How [`TicketDesk::hydrate`] obtained its tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrateSource {
    /// A stored collection was loaded.
    Loaded,
    /// Nothing was stored; the demo set was installed.
    Seeded,
    /// The stored collection was unreadable. It was set aside and the demo
    /// set installed.
    Recovered,
}

/// Application state for one dashboard session.
#[derive(Debug)]
pub struct TicketDesk<S> {
    persistence: Persistence<S>,
    session: SessionGate,
    store: TicketStore,
}

impl<S: KeyValueStore> TicketDesk<S> {
    /// Wrap `store` and restore the session. Tickets are not loaded yet.
    #[must_use]
    pub fn new(store: S) -> Self {
        let persistence = Persistence::new(store);
        let session = SessionGate::restore(&persistence);
        Self {
            persistence,
            session,
            store: TicketStore::new(),
        }
    }

    /// Restore the session and load tickets.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the collection cannot be read or the
    /// fallback set cannot be written.
    pub fn open(store: S) -> Result<Self> {
        let mut desk = Self::new(store);
        desk.hydrate()?;
        Ok(desk)
    }

    /// Load the ticket collection, seeding demo tickets when none is stored.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backing store fails.
    pub fn hydrate(&mut self) -> Result<HydrateSource> {
        self.hydrate_at(Utc::now())
    }

    /// [`hydrate`](Self::hydrate) with demo timestamps relative to `now`.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backing store fails.
    pub fn hydrate_at(&mut self, now: DateTime<Utc>) -> Result<HydrateSource> {
        let Some(raw) = self.persistence.load_raw(keys::TICKETS)? else {
            debug!("no stored tickets, installing demo set");
            self.install(demo_tickets(now))?;
            return Ok(HydrateSource::Seeded);
        };

        let decoded = serde_json::from_str::<Vec<Ticket>>(&raw)
            .map_err(|e| TicketError::Corrupt {
                key: keys::TICKETS.to_string(),
                reason: e.to_string(),
            })
            .and_then(TicketStore::from_tickets);

        match decoded {
            Ok(store) => {
                debug!(count = store.len(), "loaded tickets");
                self.store = store;
                Ok(HydrateSource::Loaded)
            }
            Err(e) => {
                warn!(
                    error = %e,
                    backup = keys::CORRUPT_TICKETS,
                    "stored tickets unreadable, setting them aside"
                );
                self.persistence.save_raw(keys::CORRUPT_TICKETS, &raw)?;
                self.install(demo_tickets(now))?;
                Ok(HydrateSource::Recovered)
            }
        }
    }

    fn install(&mut self, tickets: Vec<Ticket>) -> Result<()> {
        self.store = TicketStore::from_tickets(tickets)?;
        self.flush()
    }

    fn flush(&mut self) -> Result<()> {
        self.persistence.save(keys::TICKETS, self.store.all())
    }

    // ========================================================================
    // Session
    // ========================================================================

    /// # Errors
    ///
    /// Returns `InvalidCredentials` for blank input, or a storage error.
    pub fn login(&mut self, username: &str, password: &str) -> Result<UserProfile> {
        self.session.login(&mut self.persistence, username, password)
    }

    /// # Errors
    ///
    /// Returns a storage error if the session cannot be cleared.
    pub fn logout(&mut self) -> Result<()> {
        self.session.logout(&mut self.persistence)
    }

    #[must_use]
    pub const fn current_user(&self) -> Option<&UserProfile> {
        self.session.current()
    }

    /// # Errors
    ///
    /// Returns `NotLoggedIn` when no session is active.
    pub fn require_user(&self) -> Result<&UserProfile> {
        self.session.require()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// # Errors
    ///
    /// Returns `Validation` for a blank title, or a storage error.
    pub fn create(&mut self, payload: NewTicket) -> Result<Ticket> {
        self.create_at(payload, Utc::now())
    }

    /// # Errors
    ///
    /// Returns `Validation` for a blank title, or a storage error.
    pub fn create_at(&mut self, payload: NewTicket, now: DateTime<Utc>) -> Result<Ticket> {
        let ticket = self.store.create_at(payload, now)?;
        self.flush()?;
        Ok(ticket)
    }

    /// Validate an editor form and create the ticket.
    ///
    /// # Errors
    ///
    /// Returns `Validation`/`ValidationErrors` listing every bad field, in
    /// which case nothing is created.
    pub fn create_from_form(&mut self, form: &TicketForm) -> Result<Ticket> {
        let now = Utc::now();
        let payload = form
            .validate(now.date_naive())
            .map_err(TicketError::from_validation_errors)?;
        self.create_at(payload, now)
    }

    /// # Errors
    ///
    /// Returns `TicketNotFound` for an unknown id, or a storage error.
    pub fn update(&mut self, id: TicketId, patch: &TicketPatch) -> Result<Ticket> {
        self.update_at(id, patch, Utc::now())
    }

    /// # Errors
    ///
    /// Returns `TicketNotFound` for an unknown id, or a storage error.
    pub fn update_at(
        &mut self,
        id: TicketId,
        patch: &TicketPatch,
        now: DateTime<Utc>,
    ) -> Result<Ticket> {
        let ticket = self.store.update_at(id, patch, now)?;
        self.flush()?;
        Ok(ticket)
    }

    /// Validate an editor form and overwrite every field of ticket `id`.
    ///
    /// # Errors
    ///
    /// Returns `TicketNotFound`, or the form's validation errors.
    pub fn edit_from_form(&mut self, id: TicketId, form: &TicketForm) -> Result<Ticket> {
        let stored_due = self.store.get(id)?.due_date;
        let now = Utc::now();
        let payload = form
            .validate_edit(now.date_naive(), stored_due)
            .map_err(TicketError::from_validation_errors)?;
        self.update_at(id, &TicketPatch::from(payload), now)
    }

    /// Delete a ticket. Confirming intent is the caller's job.
    ///
    /// # Errors
    ///
    /// Returns `TicketNotFound` for an unknown id, or a storage error.
    pub fn delete(&mut self, id: TicketId) -> Result<Ticket> {
        let removed = self.store.delete(id)?;
        self.flush()?;
        Ok(removed)
    }

    /// A card dropped on column `target`.
    ///
    /// Rejections leave the store and persistence untouched.
    ///
    /// # Errors
    ///
    /// Only storage errors; refused moves come back as
    /// [`Transition::Rejected`].
    pub fn request_status_change(&mut self, id: TicketId, target: Status) -> Result<Transition> {
        if let Err(rejection) = check_transition(id, self.store.get(id).ok(), target) {
            info!(id, %target, reason = %rejection, "status change rejected");
            return Ok(Transition::Rejected(rejection));
        }
        let ticket = self.update(id, &TicketPatch::status(target))?;
        Ok(Transition::Accepted(ticket))
    }

    /// Run a card menu action through the board gate.
    ///
    /// # Errors
    ///
    /// Only storage errors.
    pub fn apply_quick_action(&mut self, id: TicketId, action: QuickAction) -> Result<Transition> {
        self.request_status_change(id, action.target())
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// # Errors
    ///
    /// Returns `TicketNotFound` for an unknown id.
    pub fn get(&self, id: TicketId) -> Result<&Ticket> {
        self.store.get(id)
    }

    #[must_use]
    pub fn tickets(&self) -> &[Ticket] {
        self.store.all()
    }

    /// Filtered, sorted and grouped view for `state`.
    #[must_use]
    pub fn view(&self, state: &QueryState) -> TicketView<'_> {
        pipeline::run(self.store.all(), state)
    }

    /// Stats over the whole collection, ignoring filters.
    #[must_use]
    pub fn stats(&self, now: DateTime<Utc>) -> TicketStats {
        TicketStats::compute(self.store.all(), now)
    }

    #[must_use]
    pub fn unique_assignees(&self) -> Vec<&str> {
        self.store.unique_assignees()
    }

    #[must_use]
    pub const fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Rejection;
    use crate::model::Priority;
    use crate::persist::MemoryStore;
    use crate::query::TicketFilters;

    fn empty_desk() -> TicketDesk<MemoryStore> {
        let mut store = MemoryStore::new();
        store.set(keys::TICKETS, "[]").unwrap();
        TicketDesk::open(store).unwrap()
    }

    fn stored_ids(desk: &TicketDesk<MemoryStore>) -> Vec<TicketId> {
        let stored: Vec<Ticket> = desk.persistence().load(keys::TICKETS).unwrap().unwrap();
        stored.iter().map(|t| t.id).collect()
    }

    fn form(title: &str) -> TicketForm {
        TicketForm {
            title: title.to_string(),
            description: "Office printer on 3rd floor is jammed".to_string(),
            priority: "high".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn first_open_seeds_and_persists_demo_set() {
        let mut desk = TicketDesk::new(MemoryStore::new());
        assert_eq!(desk.hydrate().unwrap(), HydrateSource::Seeded);
        assert_eq!(desk.tickets().len(), 4);
        assert_eq!(stored_ids(&desk), vec![1, 2, 3, 4]);

        let reopened = TicketDesk::open(desk.persistence.into_inner()).unwrap();
        assert_eq!(reopened.tickets().len(), 4);
    }

    #[test]
    fn corrupt_collection_is_set_aside() {
        let mut store = MemoryStore::new();
        store.set(keys::TICKETS, "{not json").unwrap();
        let mut desk = TicketDesk::new(store);

        assert_eq!(desk.hydrate().unwrap(), HydrateSource::Recovered);
        assert_eq!(desk.tickets().len(), 4);
        assert_eq!(
            desk.persistence().load_raw(keys::CORRUPT_TICKETS).unwrap().as_deref(),
            Some("{not json")
        );
        assert_eq!(stored_ids(&desk).len(), 4);
    }

    #[test]
    fn duplicate_ids_count_as_corrupt() {
        let dup = r#"[{"id":1,"title":"A","createdAt":"2024-01-01T00:00:00Z","updatedAt":"2024-01-01T00:00:00Z"},
                      {"id":1,"title":"B","createdAt":"2024-01-01T00:00:00Z","updatedAt":"2024-01-01T00:00:00Z"}]"#;
        let mut store = MemoryStore::new();
        store.set(keys::TICKETS, dup).unwrap();
        let mut desk = TicketDesk::new(store);
        assert_eq!(desk.hydrate().unwrap(), HydrateSource::Recovered);
    }

    #[test]
    fn create_from_form_scenario() {
        let mut desk = empty_desk();
        let ticket = desk.create_from_form(&form("Printer jam")).unwrap();

        assert_eq!(ticket.status, Status::Open);
        assert_eq!(ticket.priority, Priority::High);
        assert!(ticket.due_date.is_none());
        assert_eq!(stored_ids(&desk), vec![ticket.id]);

        let view = desk.view(&QueryState::default());
        assert_eq!(view.groups.column(Status::Open).len(), 1);
        assert_eq!(view.groups.column(Status::Open)[0].id, ticket.id);
    }

    #[test]
    fn invalid_form_leaves_store_untouched() {
        let mut desk = empty_desk();
        let err = desk.create_from_form(&form("ab")).unwrap_err();
        assert!(matches!(err, TicketError::Validation { ref field, .. } if field == "title"));
        assert!(desk.tickets().is_empty());
        assert!(stored_ids(&desk).is_empty());
    }

    #[test]
    fn edit_from_form_overwrites_fields() {
        let mut desk = empty_desk();
        let ticket = desk.create_from_form(&form("Printer jam")).unwrap();

        let mut edit = TicketForm::from_ticket(&ticket);
        edit.status = "closed".to_string();
        edit.assignee = "Lisa Wang".to_string();
        let updated = desk.edit_from_form(ticket.id, &edit).unwrap();

        assert_eq!(updated.status, Status::Closed);
        assert_eq!(updated.assignee.as_deref(), Some("Lisa Wang"));
        assert!(updated.updated_at > ticket.updated_at);
        assert_eq!(updated.created_at, ticket.created_at);
    }

    #[test]
    fn past_due_demo_ticket_can_be_closed_by_edit() {
        let mut desk = TicketDesk::open(MemoryStore::new()).unwrap();
        let resolved = desk.get(3).unwrap().clone();
        assert!(resolved.due_date.is_some_and(|d| d < Utc::now()));

        let mut edit = TicketForm::from_ticket(&resolved);
        edit.status = "closed".to_string();
        let closed = desk.edit_from_form(3, &edit).unwrap();

        assert_eq!(closed.status, Status::Closed);
        assert_eq!(closed.due_date, resolved.due_date);
    }

    #[test]
    fn exhausted_id_space_fails_create_cleanly() {
        let full = format!(
            r#"[{{"id":{},"title":"Last","createdAt":"2024-01-01T00:00:00Z","updatedAt":"2024-01-01T00:00:00Z"}}]"#,
            i64::MAX
        );
        let mut store = MemoryStore::new();
        store.set(keys::TICKETS, &full).unwrap();
        let mut desk = TicketDesk::new(store);
        assert_eq!(desk.hydrate().unwrap(), HydrateSource::Loaded);

        let err = desk.create_from_form(&form("Printer jam")).unwrap_err();
        assert!(matches!(err, TicketError::IdSpaceExhausted { last: i64::MAX }));
        assert_eq!(stored_ids(&desk), vec![i64::MAX]);
    }

    #[test]
    fn edit_unknown_ticket_is_not_found() {
        let mut desk = empty_desk();
        let err = desk.edit_from_form(99, &form("Printer jam")).unwrap_err();
        assert!(matches!(err, TicketError::TicketNotFound { id: 99 }));
    }

    #[test]
    fn board_drop_onto_closed_changes_nothing() {
        let mut desk = TicketDesk::open(MemoryStore::new()).unwrap();
        let before = desk.tickets().to_vec();

        for ticket in &before {
            let outcome = desk.request_status_change(ticket.id, Status::Closed).unwrap();
            assert_eq!(outcome, Transition::Rejected(Rejection::RestrictedColumn));
        }
        assert_eq!(desk.tickets(), before.as_slice());
    }

    #[test]
    fn board_moves_and_quick_actions() {
        let mut desk = TicketDesk::open(MemoryStore::new()).unwrap();

        let outcome = desk.request_status_change(1, Status::InProgress).unwrap();
        let Transition::Accepted(moved) = outcome else {
            panic!("expected move to be accepted");
        };
        assert_eq!(moved.status, Status::InProgress);

        let outcome = desk.apply_quick_action(1, QuickAction::Resolve).unwrap();
        assert!(outcome.is_accepted());
        assert_eq!(desk.get(1).unwrap().status, Status::Resolved);

        let stored: Vec<Ticket> = desk.persistence().load(keys::TICKETS).unwrap().unwrap();
        assert_eq!(stored[0].status, Status::Resolved);

        assert_eq!(
            desk.request_status_change(404, Status::Open).unwrap(),
            Transition::Rejected(Rejection::NotFound { id: 404 })
        );
    }

    #[test]
    fn closed_tickets_are_locked_on_the_board() {
        let mut desk = empty_desk();
        let ticket = desk.create_from_form(&form("Printer jam")).unwrap();
        desk.update(ticket.id, &TicketPatch::status(Status::Closed))
            .unwrap();

        let outcome = desk.apply_quick_action(ticket.id, QuickAction::Reopen).unwrap();
        assert_eq!(
            outcome,
            Transition::Rejected(Rejection::LockedTicket { id: ticket.id })
        );
        assert_eq!(desk.get(ticket.id).unwrap().status, Status::Closed);
    }

    #[test]
    fn delete_persists() {
        let mut desk = TicketDesk::open(MemoryStore::new()).unwrap();
        desk.delete(2).unwrap();
        assert_eq!(stored_ids(&desk), vec![1, 3, 4]);
        assert!(matches!(
            desk.delete(2),
            Err(TicketError::TicketNotFound { id: 2 })
        ));
    }

    #[test]
    fn stats_ignore_filters() {
        let desk = TicketDesk::open(MemoryStore::new()).unwrap();
        let state = QueryState {
            filters: TicketFilters {
                search: "dark mode".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(desk.view(&state).len(), 1);

        let stats = desk.stats(Utc::now());
        assert_eq!(stats.total, 4);
        assert_eq!(stats.open, 2);
        assert_eq!(stats.critical, 1);
        assert_eq!(stats.overdue, 0);
    }

    #[test]
    fn session_round_trip() {
        let mut desk = TicketDesk::new(MemoryStore::new());
        assert!(matches!(desk.require_user(), Err(TicketError::NotLoggedIn)));

        desk.login("dana", "pw").unwrap();
        let restored = TicketDesk::new(desk.persistence.into_inner());
        assert_eq!(restored.require_user().unwrap().username, "dana");
    }
}
