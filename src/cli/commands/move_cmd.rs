//! Move command implementation (board drag-and-drop and card quick actions).

use anyhow::{Result, bail};
use ticketflow_lib::{QuickAction, Status, TicketId, Transition};

use super::{Context, print_json};
use crate::cli::MoveArgs;
use crate::format::TransitionOutput;

/// Execute the move command.
///
/// # Errors
///
/// Returns an error if there is no session, the status is unknown, or the
/// board refuses the move.
pub fn execute(ctx: &Context, args: &MoveArgs) -> Result<()> {
    let target: Status = args.status.parse()?;
    let mut desk = ctx.open_session()?;
    let outcome = desk.request_status_change(args.id, target)?;
    report(ctx, &outcome)
}

/// Execute `start`, `resolve` or `reopen`.
///
/// # Errors
///
/// Returns an error if there is no session or the board refuses the move.
pub fn quick_action(ctx: &Context, id: TicketId, action: QuickAction) -> Result<()> {
    let mut desk = ctx.open_session()?;
    let offered = desk.get(id).is_ok_and(|t| action.is_offered(t.status));
    tracing::debug!(id, %action, offered, "quick action");
    let outcome = desk.apply_quick_action(id, action)?;
    report(ctx, &outcome)
}

fn report(ctx: &Context, outcome: &Transition) -> Result<()> {
    if ctx.json {
        print_json(&TransitionOutput::from(outcome))?;
    }
    match outcome {
        Transition::Accepted(ticket) => {
            ctx.say(format!(
                "Moved ticket #{} to {}",
                ticket.id,
                ticket.status.title()
            ));
            Ok(())
        }
        Transition::Rejected(rejection) => bail!("{rejection}"),
    }
}
