//! Login command implementation.

use anyhow::Result;
use tracing::info;

use super::{Context, print_json};
use crate::cli::LoginArgs;

/// Execute the login command.
///
/// # Errors
///
/// Returns an error if either credential is blank or the session cannot be saved.
pub fn execute(ctx: &Context, args: &LoginArgs) -> Result<()> {
    let mut desk = ctx.open_desk()?;
    let profile = desk.login(&args.username, &args.password)?;
    info!(data_dir = %ctx.data_dir.display(), "session stored");

    if ctx.json {
        print_json(&profile)?;
    } else {
        ctx.say(format!(
            "Logged in as {} ({})",
            profile.username, profile.email
        ));
    }
    Ok(())
}
