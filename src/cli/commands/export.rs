//! Export command implementation.

use anyhow::Result;
use chrono::Utc;
use ticketflow_lib::export::write_export;

use super::{Context, print_json};
use crate::cli::ExportArgs;
use crate::format::ExportOutput;

/// Execute the export command.
///
/// # Errors
///
/// Returns an error if there is no session or the file cannot be written.
pub fn execute(ctx: &Context, args: &ExportArgs) -> Result<()> {
    let settings = ctx.settings(&args.query, None, args.output_dir.as_deref())?;
    let state = ctx.query_state(&args.query, None)?;
    let desk = ctx.open_session()?;
    let view = desk.view(&state);

    let path = write_export(&settings.export_dir, &view.tickets, Utc::now().date_naive())?;
    let path = dunce::canonicalize(&path).unwrap_or(path);

    if ctx.json {
        print_json(&ExportOutput {
            path: path.display().to_string(),
            count: view.len(),
        })?;
    } else {
        ctx.say(format!(
            "Exported {} ticket(s) to {}",
            view.len(),
            path.display()
        ));
    }
    Ok(())
}
