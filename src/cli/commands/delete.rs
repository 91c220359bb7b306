//! Delete command implementation.

use std::io::{self, BufRead, Write};

use anyhow::{Result, bail};

use super::{Context, print_json};
use crate::cli::DeleteArgs;
use crate::format::DeleteOutput;

/// Whether a prompt answer confirms.
#[must_use]
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn confirm(prompt: &str) -> Result<bool> {
    let mut stderr = io::stderr();
    write!(stderr, "{prompt} [y/N] ")?;
    stderr.flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

/// Execute the delete command.
///
/// # Errors
///
/// Returns an error if there is no session, the ticket doesn't exist, or the
/// prompt is declined.
pub fn execute(ctx: &Context, args: &DeleteArgs) -> Result<()> {
    let mut desk = ctx.open_session()?;
    let title = desk.get(args.id)?.title.clone();

    if !args.yes
        && !confirm(&format!(
            "Are you sure you want to delete ticket #{} \"{title}\"?",
            args.id
        ))?
    {
        bail!("Delete cancelled");
    }

    let removed = desk.delete(args.id)?;
    if ctx.json {
        print_json(&DeleteOutput {
            deleted: removed.id,
            title: removed.title,
        })?;
    } else {
        ctx.say(format!("Deleted ticket #{}: {}", removed.id, removed.title));
    }
    Ok(())
}
