//! Dashboard command implementation.
//!
//! Stats cards, then the current view in kanban or list layout.

use anyhow::Result;
use chrono::Utc;
use ticketflow_lib::{SortDirection, ViewMode};

use super::board::print_board;
use super::list::print_list;
use super::{Context, print_json};
use crate::cli::DashboardArgs;
use crate::format::{BoardColumn, DashboardOutput, format_stats};

/// Execute the dashboard command.
///
/// # Errors
///
/// Returns an error if there is no session or a flag value is invalid.
pub fn execute(ctx: &Context, args: &DashboardArgs) -> Result<()> {
    let state = ctx.query_state(&args.query, args.view.as_deref())?;
    let desk = ctx.open_session()?;
    let user = desk.require_user()?;
    let now = Utc::now();
    let stats = desk.stats(now);
    let view = desk.view(&state);

    if ctx.json {
        let (tickets, columns) = match state.view {
            ViewMode::List => (Some(view.tickets.clone()), None),
            ViewMode::Kanban => (None, Some(BoardColumn::from_view(&view, now))),
        };
        return print_json(&DashboardOutput {
            user,
            stats,
            view: state.view.as_str(),
            sort: state.sort.as_str(),
            order: state.direction.as_str(),
            assignees: desk.unique_assignees(),
            tickets,
            columns,
        });
    }

    println!("Welcome back, {}!", user.username);
    println!();
    for line in format_stats(&stats) {
        println!("  {line}");
    }
    println!();
    let arrow = match state.direction {
        SortDirection::Asc => "↑ Ascending",
        SortDirection::Desc => "↓ Descending",
    };
    println!("Sort by: {} {arrow}", state.sort);
    println!();
    match state.view {
        ViewMode::List => print_list(&view, now),
        ViewMode::Kanban => print_board(&BoardColumn::from_view(&view, now), now),
    }
    Ok(())
}
