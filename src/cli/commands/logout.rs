//! Logout command implementation.

use anyhow::Result;

use super::{Context, print_json};

/// Execute the logout command.
///
/// # Errors
///
/// Returns an error if the session files cannot be removed.
pub fn execute(ctx: &Context) -> Result<()> {
    let mut desk = ctx.open_desk()?;
    let was = desk.current_user().map(|u| u.username.clone());
    desk.logout()?;

    if ctx.json {
        print_json(&serde_json::json!({ "loggedOut": was }))?;
    } else if let Some(username) = was {
        ctx.say(format!("Logged out {username}"));
    } else {
        ctx.say("Not logged in");
    }
    Ok(())
}
