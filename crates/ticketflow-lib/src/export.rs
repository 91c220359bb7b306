//! JSON export of the current view.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::error::Result;
use crate::model::Ticket;

/// `tickets-export-YYYY-MM-DD.json`
#[must_use]
pub fn export_file_name(date: NaiveDate) -> String {
    format!("tickets-export-{}.json", date.format("%Y-%m-%d"))
}

/// Pretty-printed JSON array of `tickets`, in the given order.
///
/// # Errors
///
/// Returns `Json` if serialization fails.
pub fn render_export(tickets: &[&Ticket]) -> Result<String> {
    Ok(serde_json::to_string_pretty(tickets)?)
}

/// Write the export file into `dir`, replacing any export from the same day.
///
/// # Errors
///
/// Returns an I/O error if `dir` cannot be created or written.
pub fn write_export(dir: &Path, tickets: &[&Ticket], date: NaiveDate) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(date));
    fs::write(&path, render_export(tickets)?)?;
    info!(path = %path.display(), count = tickets.len(), "exported tickets");
    Ok(path)
}
