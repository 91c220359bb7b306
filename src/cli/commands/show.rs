//! Show command implementation.

use anyhow::Result;
use chrono::Utc;
use ticketflow_lib::TicketId;

use super::{Context, print_json};
use crate::format::{TicketDetails, format_priority_badge, format_status_icon};

/// Execute the show command.
///
/// # Errors
///
/// Returns an error if there is no session or the ticket doesn't exist.
pub fn execute(ctx: &Context, id: TicketId) -> Result<()> {
    let desk = ctx.open_session()?;
    let ticket = desk.get(id)?;
    let details = TicketDetails::new(ticket, Utc::now());

    if ctx.json {
        return print_json(&details);
    }

    println!(
        "{} #{} {} {}",
        format_status_icon(ticket.status),
        ticket.id,
        format_priority_badge(ticket.priority),
        ticket.title
    );
    println!("Status:    {}", ticket.status.title());
    if let Some(ref assignee) = ticket.assignee {
        println!("Assignee:  {assignee}");
    }
    if let Some(ref customer) = ticket.customer_name {
        println!("Customer:  {customer}");
    }
    if let (Some(due), Some(label)) = (ticket.due_date, &details.due_label) {
        let flag = if details.overdue { " (overdue)" } else { "" };
        println!("Due:       {} ({label}){flag}", due.format("%Y-%m-%d"));
    }
    if let Some(hours) = ticket.estimated_hours {
        println!("Estimate:  {hours}h");
    }
    if !ticket.tags.is_empty() {
        println!("Tags:      {}", ticket.tags.join(", "));
    }
    println!("Created:   {}", ticket.created_at.format("%Y-%m-%d %H:%M UTC"));
    println!("Updated:   {}", ticket.updated_at.format("%Y-%m-%d %H:%M UTC"));
    if !details.actions.is_empty() {
        println!("Actions:   {}", details.actions.join(", "));
    }
    if !ticket.description.is_empty() {
        println!("\n{}", ticket.description);
    }
    Ok(())
}
