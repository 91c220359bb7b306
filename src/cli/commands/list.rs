//! List command implementation.
//!
//! Flat view of the filtered, sorted tickets.

use anyhow::Result;
use chrono::{DateTime, Utc};
use ticketflow_lib::TicketView;

use super::{Context, print_json};
use crate::cli::QueryArgs;
use crate::format::format_ticket_line;

/// Print the flat list view.
pub fn print_list(view: &TicketView<'_>, now: DateTime<Utc>) {
    if view.is_empty() {
        println!("No tickets found matching your filters.");
        return;
    }
    println!("All Tickets ({})", view.len());
    for ticket in &view.tickets {
        println!("  {}", format_ticket_line(ticket, now));
    }
}

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if there is no session or a flag value is invalid.
pub fn execute(ctx: &Context, args: &QueryArgs) -> Result<()> {
    let state = ctx.query_state(args, None)?;
    let desk = ctx.open_session()?;
    let view = desk.view(&state);

    if ctx.json {
        print_json(&view.tickets)?;
    } else {
        print_list(&view, Utc::now());
    }
    Ok(())
}
