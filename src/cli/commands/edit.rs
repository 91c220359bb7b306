//! Edit command implementation.
//!
//! The form is prefilled from the stored ticket and each flag replaces one
//! field, then the whole form is validated like a fresh submission.

use anyhow::Result;
use ticketflow_lib::TicketForm;

use super::{Context, print_json};
use crate::cli::{EditArgs, TicketFields};

/// Overlay the flags that were given onto a prefilled form.
#[must_use]
pub fn apply_fields(mut form: TicketForm, fields: &TicketFields) -> TicketForm {
    let overlay = |slot: &mut String, value: Option<&str>| {
        if let Some(v) = value {
            *slot = v.to_string();
        }
    };
    overlay(&mut form.title, fields.title.as_deref());
    overlay(&mut form.description, fields.description.as_deref());
    overlay(&mut form.status, fields.status.as_deref());
    overlay(&mut form.priority, fields.priority.as_deref());
    overlay(&mut form.assignee, fields.assignee.as_deref());
    overlay(&mut form.customer_name, fields.customer.as_deref());
    overlay(&mut form.due_date, fields.due.as_deref());
    overlay(&mut form.estimated_hours, fields.hours.as_deref());
    overlay(&mut form.tags, fields.tags.as_deref());
    form
}

/// Execute the edit command.
///
/// # Errors
///
/// Returns an error if there is no session, the ticket doesn't exist, or the
/// merged form fails validation.
pub fn execute(ctx: &Context, args: &EditArgs) -> Result<()> {
    let mut desk = ctx.open_session()?;
    let form = apply_fields(TicketForm::from_ticket(desk.get(args.id)?), &args.fields);
    let ticket = desk.edit_from_form(args.id, &form)?;

    if ctx.json {
        print_json(&ticket)?;
    } else {
        ctx.say(format!("Updated ticket #{}: {}", ticket.id, ticket.title));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_given_flags_replace_fields() {
        let form = TicketForm {
            title: "Printer jam".to_string(),
            assignee: "Lisa Wang".to_string(),
            due_date: "2030-01-01".to_string(),
            ..Default::default()
        };
        let fields = TicketFields {
            status: Some("resolved".to_string()),
            due: Some(String::new()),
            ..Default::default()
        };
        let merged = apply_fields(form, &fields);
        assert_eq!(merged.title, "Printer jam");
        assert_eq!(merged.assignee, "Lisa Wang");
        assert_eq!(merged.status, "resolved");
        assert!(merged.due_date.is_empty());
    }
}
