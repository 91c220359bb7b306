//! `ticketflow-lib` — In-process ticket tracking core.
//!
//! Owns the ticket collection, the mock session, the filter/sort/group
//! pipeline and the kanban status rules. State lives in memory and is
//! mirrored to a key-value store as JSON after every mutation.
//!
//! # Quick Start
//!
//! ```no_run
//! use ticketflow_lib::{FileStore, QueryState, Status, TicketDesk, TicketForm};
//!
//! let mut desk = TicketDesk::open(FileStore::open(".ticketflow").unwrap()).unwrap();
//! desk.login("dana", "secret").unwrap();
//!
//! // Create through the editor rules
//! let form = TicketForm {
//!     title: "Printer jam".into(),
//!     description: "Office printer on 3rd floor is jammed".into(),
//!     ..Default::default()
//! };
//! let ticket = desk.create_from_form(&form).unwrap();
//!
//! // Drag to "In Progress"
//! desk.request_status_change(ticket.id, Status::InProgress).unwrap();
//!
//! // Render the board
//! let view = desk.view(&QueryState::default());
//! println!("{} open", view.groups.open.len());
//! ```

pub mod board;
pub mod desk;
pub mod editor;
pub mod error;
pub mod export;
pub mod model;
pub mod persist;
pub mod pipeline;
pub mod query;
pub mod seed;
pub mod session;
pub mod stats;
pub mod store;
pub mod util;

pub use board::{QuickAction, Rejection, Transition};
pub use desk::{HydrateSource, TicketDesk};
pub use editor::TicketForm;
pub use error::{Result, TicketError, ValidationError};
pub use model::{Priority, Status, Ticket, TicketId, UserProfile};
pub use persist::{FileStore, KeyValueStore, MemoryStore, Persistence};
pub use pipeline::{StatusGroups, TicketView};
pub use query::{
    NewTicket, QueryState, SortDirection, SortKey, TicketFilters, TicketPatch, ViewMode,
};
pub use stats::{ColumnStats, TicketStats};
pub use store::TicketStore;
