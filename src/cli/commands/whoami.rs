//! Whoami command implementation.

use anyhow::Result;

use super::{Context, print_json};

/// Execute the whoami command.
///
/// # Errors
///
/// Returns an error if the data directory cannot be opened.
pub fn execute(ctx: &Context) -> Result<()> {
    let desk = ctx.open_desk()?;
    let user = desk.current_user();

    if ctx.json {
        print_json(&user)?;
        return Ok(());
    }
    match user {
        Some(profile) => {
            println!("{}", profile.username);
            println!("  Email:  {}", profile.email);
            println!("  Role:   {}", profile.role);
            println!("  Avatar: {}", profile.avatar);
        }
        None => println!("Not logged in"),
    }
    Ok(())
}
