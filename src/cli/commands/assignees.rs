//! Assignees command implementation.

use anyhow::Result;

use super::{Context, print_json};

/// Execute the assignees command.
///
/// # Errors
///
/// Returns an error if there is no session.
pub fn execute(ctx: &Context) -> Result<()> {
    let desk = ctx.open_session()?;
    let assignees = desk.unique_assignees();

    if ctx.json {
        print_json(&assignees)?;
    } else if assignees.is_empty() {
        println!("No assignees.");
    } else {
        for name in assignees {
            println!("{name}");
        }
    }
    Ok(())
}
