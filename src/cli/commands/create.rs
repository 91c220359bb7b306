//! Create command implementation.

use anyhow::Result;
use ticketflow_lib::TicketForm;

use super::{Context, print_json};
use crate::cli::{CreateArgs, TicketFields};

/// Build an editor form from flags; unset fields stay blank.
#[must_use]
pub fn form_from_fields(fields: TicketFields) -> TicketForm {
    TicketForm {
        title: fields.title.unwrap_or_default(),
        description: fields.description.unwrap_or_default(),
        status: fields.status.unwrap_or_default(),
        priority: fields.priority.unwrap_or_default(),
        assignee: fields.assignee.unwrap_or_default(),
        customer_name: fields.customer.unwrap_or_default(),
        due_date: fields.due.unwrap_or_default(),
        estimated_hours: fields.hours.unwrap_or_default(),
        tags: fields.tags.unwrap_or_default(),
    }
}

/// Execute the create command.
///
/// # Errors
///
/// Returns an error if there is no session or any field fails validation.
pub fn execute(ctx: &Context, args: CreateArgs) -> Result<()> {
    let mut desk = ctx.open_session()?;

    let mut fields = args.fields;
    if fields.title.is_none() {
        fields.title = args.title_arg;
    }
    let ticket = desk.create_from_form(&form_from_fields(fields))?;

    if ctx.json {
        print_json(&ticket)?;
    } else {
        ctx.say(format!("Created ticket #{}: {}", ticket.id, ticket.title));
    }
    Ok(())
}
