//! Board command implementation.
//!
//! Kanban view: the filtered, sorted tickets in four status columns.

use anyhow::Result;
use chrono::Utc;

use super::{Context, print_json};
use crate::cli::QueryArgs;
use crate::format::{
    BoardColumn, format_column_header, format_column_stats, format_ticket_line,
};

/// Print every column with its badge row and cards.
pub fn print_board(columns: &[BoardColumn<'_>], now: chrono::DateTime<Utc>) {
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", format_column_header(column.status, column.tickets.len()));
        if let Some(badges) = format_column_stats(&column.stats) {
            println!("  {badges}");
        }
        if column.tickets.is_empty() {
            println!("  (empty)");
        }
        for ticket in &column.tickets {
            println!("  {}", format_ticket_line(ticket, now));
        }
    }
}

/// Execute the board command.
///
/// # Errors
///
/// Returns an error if there is no session or a flag value is invalid.
pub fn execute(ctx: &Context, args: &QueryArgs) -> Result<()> {
    let state = ctx.query_state(args, None)?;
    let desk = ctx.open_session()?;
    let view = desk.view(&state);
    let now = Utc::now();
    let columns = BoardColumn::from_view(&view, now);

    if ctx.json {
        print_json(&columns)?;
    } else {
        print_board(&columns, now);
    }
    Ok(())
}
