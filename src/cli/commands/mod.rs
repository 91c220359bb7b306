//! Command implementations.
//!
//! Every command builds a [`Context`] first; session-gated commands then go
//! through [`Context::open_session`].

pub mod assignees;
pub mod board;
pub mod completions;
pub mod create;
pub mod dashboard;
pub mod delete;
pub mod edit;
pub mod export;
pub mod list;
pub mod login;
pub mod logout;
pub mod move_cmd;
pub mod show;
pub mod stats;
pub mod whoami;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use serde::Serialize;
use ticketflow_lib::query::parse_selection;
use ticketflow_lib::{FileStore, Priority, QueryState, Status, TicketDesk, TicketFilters};

use crate::cli::QueryArgs;
use crate::config::{CliOverrides, Config, Settings, resolve_data_dir};

/// Shared state for one command invocation.
#[derive(Debug, Clone)]
pub struct Context {
    pub data_dir: PathBuf,
    pub config: Config,
    pub json: bool,
    pub quiet: bool,
}

impl Context {
    /// Resolve the data directory and load its config.
    ///
    /// # Errors
    ///
    /// Returns an error if `config.yaml` exists but is invalid.
    pub fn new(data_dir: Option<&Path>, json: bool, quiet: bool) -> Result<Self> {
        let data_dir = resolve_data_dir(data_dir);
        let config = Config::load(&data_dir)?;
        Ok(Self {
            data_dir,
            config,
            json,
            quiet,
        })
    }

    /// Open the desk with the session restored but tickets not yet loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn open_desk(&self) -> Result<TicketDesk<FileStore>> {
        let store = FileStore::open(&self.data_dir)
            .with_context(|| format!("opening data directory {}", self.data_dir.display()))?;
        Ok(TicketDesk::new(store))
    }

    /// Open the desk for a signed-in user and load tickets.
    ///
    /// # Errors
    ///
    /// Returns `NotLoggedIn` when there is no session, or a storage error.
    pub fn open_session(&self) -> Result<TicketDesk<FileStore>> {
        let mut desk = self.open_desk()?;
        desk.require_user()?;
        desk.hydrate()?;
        Ok(desk)
    }

    /// Effective settings: flags, then `config.yaml`, then defaults.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown sort key, order or view.
    pub fn settings(
        &self,
        args: &QueryArgs,
        view: Option<&str>,
        export_dir: Option<&Path>,
    ) -> Result<Settings> {
        let overrides = CliOverrides {
            sort: args.sort.as_deref().map(str::parse).transpose()?,
            order: args.order.as_deref().map(str::parse).transpose()?,
            view: view.map(str::parse).transpose()?,
            export_dir: export_dir.map(Path::to_path_buf),
        };
        Ok(Settings::resolve(&self.config, &overrides)?)
    }

    /// Translate view flags into a pipeline query.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown status, priority or sort values.
    pub fn query_state(&self, args: &QueryArgs, view: Option<&str>) -> Result<QueryState> {
        let settings = self.settings(args, view, None)?;
        let filters = TicketFilters {
            search: args.search.clone().unwrap_or_default(),
            status: args
                .status
                .as_deref()
                .map(parse_selection::<Status>)
                .transpose()?
                .flatten(),
            priority: args
                .priority
                .as_deref()
                .map(parse_selection::<Priority>)
                .transpose()?
                .flatten(),
            assignee: args
                .assignee
                .as_deref()
                .map(str::trim)
                .filter(|a| !a.is_empty() && !a.eq_ignore_ascii_case("all"))
                .map(String::from),
        };
        Ok(QueryState {
            filters,
            sort: settings.sort,
            direction: settings.order,
            view: settings.view,
        })
    }

    /// Print a confirmation line unless `--json` or `--quiet` is set.
    pub fn say(&self, message: impl std::fmt::Display) {
        if !self.json && !self.quiet {
            println!("{message}");
        }
    }
}

/// Print `value` as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use ticketflow_lib::{SortDirection, SortKey, ViewMode};

    fn context(dir: &TempDir) -> Context {
        Context::new(Some(dir.path()), false, false).unwrap()
    }

    #[test]
    fn query_state_from_flags() {
        let tmp = TempDir::new().unwrap();
        let args = QueryArgs {
            search: Some("printer".to_string()),
            status: Some("in-progress".to_string()),
            priority: Some("all".to_string()),
            assignee: Some("All".to_string()),
            sort: Some("priority".to_string()),
            order: Some("asc".to_string()),
        };
        let state = context(&tmp).query_state(&args, Some("list")).unwrap();

        assert_eq!(state.filters.search, "printer");
        assert_eq!(state.filters.status, Some(Status::InProgress));
        assert_eq!(state.filters.priority, None);
        assert_eq!(state.filters.assignee, None);
        assert_eq!(state.sort, SortKey::Priority);
        assert_eq!(state.direction, SortDirection::Asc);
        assert_eq!(state.view, ViewMode::List);
    }

    #[test]
    fn config_supplies_defaults() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("config.yaml"),
            "default_sort: dueDate\ndefault_order: asc\n",
        )
        .unwrap();
        let state = context(&tmp)
            .query_state(&QueryArgs::default(), None)
            .unwrap();
        assert_eq!(state.sort, SortKey::DueDate);
        assert_eq!(state.direction, SortDirection::Asc);
        assert_eq!(state.view, ViewMode::Kanban);
    }

    #[test]
    fn unknown_filter_value_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let args = QueryArgs {
            priority: Some("urgent".to_string()),
            ..Default::default()
        };
        assert!(context(&tmp).query_state(&args, None).is_err());
    }

    #[test]
    fn session_gate_blocks_anonymous_access() {
        let tmp = TempDir::new().unwrap();
        let err = context(&tmp).open_session().unwrap_err();
        assert!(err.to_string().contains("Not logged in"));
        assert!(!tmp.path().join("tickets.json").exists());
    }
}
