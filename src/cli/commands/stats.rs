//! Stats command implementation.

use anyhow::Result;
use chrono::Utc;

use super::{Context, print_json};
use crate::format::format_stats;

/// Execute the stats command.
///
/// # Errors
///
/// Returns an error if there is no session.
pub fn execute(ctx: &Context) -> Result<()> {
    let desk = ctx.open_session()?;
    let stats = desk.stats(Utc::now());

    if ctx.json {
        print_json(&stats)?;
    } else {
        for line in format_stats(&stats) {
            println!("{line}");
        }
    }
    Ok(())
}
