//! Output formatting for `ticketflow`.
//!
//! Supports both human-readable text output and machine-parseable JSON.
//!
//! # JSON Output Types
//!
//! - [`BoardColumn`] - One kanban column with its stats (board/dashboard)
//! - [`TicketDetails`] - Ticket with due label and card actions (show)
//! - [`DashboardOutput`] - User, stats and current view (dashboard)
//! - [`TransitionOutput`] - Outcome of a board move (move/start/resolve/reopen)

mod output;
mod text;

pub use output::{
    BoardColumn, DashboardOutput, DeleteOutput, ExportOutput, TicketDetails, TransitionOutput,
    rejection_code,
};
pub use text::{
    TITLE_WIDTH, column_description, days_until, format_column_header, format_column_stats,
    format_due_label, format_priority_badge, format_stats, format_status_icon, format_ticket_line,
    icons, truncate_to_width,
};
