//! Command-line interface for `ticketflow`.
//!
//! This module provides the CLI parsing and command routing using clap.

pub mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::logging;
use commands::Context;

/// `ticketflow` (tkt) - Support ticket dashboard.
#[derive(Parser, Debug)]
#[command(name = "tkt")]
#[command(
    author,
    version,
    about = "Support ticket dashboard with a kanban board",
    long_about = None,
    after_help = "Data lives in ./.ticketflow unless --data-dir or TICKETFLOW_DIR says otherwise."
)]
pub struct Cli {
    /// Output format: text (default) or json
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Data directory (default: $TICKETFLOW_DIR or ./.ticketflow)
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in (any non-empty username and password)
    Login(LoginArgs),

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Create a new ticket
    Create(CreateArgs),

    /// Edit a ticket (any field, including status)
    Edit(EditArgs),

    /// Move a ticket to another board column
    Move(MoveArgs),

    /// Start work on a ticket (moves to in-progress)
    Start(IdArg),

    /// Resolve a ticket
    Resolve(IdArg),

    /// Reopen a resolved ticket
    Reopen(IdArg),

    /// Delete a ticket
    Delete(DeleteArgs),

    /// List tickets
    List(QueryArgs),

    /// Show the kanban board
    Board(QueryArgs),

    /// Stats plus the board or list, per config
    Dashboard(DashboardArgs),

    /// Show ticket details
    Show(IdArg),

    /// Stats summary
    Stats,

    /// List distinct assignees
    Assignees,

    /// Export the current view as JSON
    Export(ExportArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    #[arg(short, long)]
    pub username: String,

    #[arg(short, long)]
    pub password: String,
}

/// Editable ticket fields shared by `create` and `edit`.
#[derive(Args, Debug, Default, Clone)]
pub struct TicketFields {
    /// Title (at least 3 characters)
    #[arg(long)]
    pub title: Option<String>,

    /// Description (at least 10 characters)
    #[arg(short, long)]
    pub description: Option<String>,

    /// Status: open, in-progress, resolved, closed
    #[arg(short, long)]
    pub status: Option<String>,

    /// Priority: low, medium, high, critical
    #[arg(short, long)]
    pub priority: Option<String>,

    /// Assignee name (empty to clear)
    #[arg(short, long)]
    pub assignee: Option<String>,

    /// Customer name (empty to clear)
    #[arg(short, long)]
    pub customer: Option<String>,

    /// Due date, YYYY-MM-DD or RFC 3339 (empty to clear)
    #[arg(long)]
    pub due: Option<String>,

    /// Estimated hours (empty to clear)
    #[arg(long)]
    pub hours: Option<String>,

    /// Comma-separated tags (empty to clear)
    #[arg(short, long)]
    pub tags: Option<String>,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Title (positional form of --title)
    #[arg(value_name = "TITLE")]
    pub title_arg: Option<String>,

    #[command(flatten)]
    pub fields: TicketFields,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Ticket ID
    pub id: i64,

    #[command(flatten)]
    pub fields: TicketFields,
}

#[derive(Args, Debug)]
pub struct MoveArgs {
    /// Ticket ID
    pub id: i64,

    /// Target column: open, in-progress, resolved, closed
    pub status: String,
}

#[derive(Args, Debug)]
pub struct IdArg {
    /// Ticket ID
    pub id: i64,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Ticket ID
    pub id: i64,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Filter and sort flags shared by the view commands.
#[derive(Args, Debug, Default, Clone)]
pub struct QueryArgs {
    /// Search title, description and customer (case-insensitive)
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by status (or "all")
    #[arg(short, long)]
    pub status: Option<String>,

    /// Filter by priority (or "all")
    #[arg(short, long)]
    pub priority: Option<String>,

    /// Filter by assignee (or "all")
    #[arg(short, long)]
    pub assignee: Option<String>,

    /// Sort key: createdAt, updatedAt, dueDate, priority, title
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort order: asc or desc
    #[arg(long)]
    pub order: Option<String>,
}

#[derive(Args, Debug)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Layout: kanban or list
    #[arg(long)]
    pub view: Option<String>,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Directory to write the export into
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Run the CLI.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    if let Commands::Completions(args) = &cli.command {
        return commands::completions::execute(args.shell);
    }

    let ctx = Context::new(cli.data_dir.as_deref(), cli.json, cli.quiet)?;
    tracing::debug!(data_dir = %ctx.data_dir.display(), command = cli.command.name(), "dispatch");

    match cli.command {
        Commands::Login(args) => commands::login::execute(&ctx, &args),
        Commands::Logout => commands::logout::execute(&ctx),
        Commands::Whoami => commands::whoami::execute(&ctx),
        Commands::Create(args) => commands::create::execute(&ctx, args),
        Commands::Edit(args) => commands::edit::execute(&ctx, &args),
        Commands::Move(args) => commands::move_cmd::execute(&ctx, &args),
        Commands::Start(args) => {
            commands::move_cmd::quick_action(&ctx, args.id, ticketflow_lib::QuickAction::Start)
        }
        Commands::Resolve(args) => {
            commands::move_cmd::quick_action(&ctx, args.id, ticketflow_lib::QuickAction::Resolve)
        }
        Commands::Reopen(args) => {
            commands::move_cmd::quick_action(&ctx, args.id, ticketflow_lib::QuickAction::Reopen)
        }
        Commands::Delete(args) => commands::delete::execute(&ctx, &args),
        Commands::List(args) => commands::list::execute(&ctx, &args),
        Commands::Board(args) => commands::board::execute(&ctx, &args),
        Commands::Dashboard(args) => commands::dashboard::execute(&ctx, &args),
        Commands::Show(args) => commands::show::execute(&ctx, args.id),
        Commands::Stats => commands::stats::execute(&ctx),
        Commands::Assignees => commands::assignees::execute(&ctx),
        Commands::Export(args) => commands::export::execute(&ctx, &args),
        Commands::Completions(_) => Ok(()),
    }
}

impl Commands {
    const fn name(&self) -> &'static str {
        match self {
            Self::Login(_) => "login",
            Self::Logout => "logout",
            Self::Whoami => "whoami",
            Self::Create(_) => "create",
            Self::Edit(_) => "edit",
            Self::Move(_) => "move",
            Self::Start(_) => "start",
            Self::Resolve(_) => "resolve",
            Self::Reopen(_) => "reopen",
            Self::Delete(_) => "delete",
            Self::List(_) => "list",
            Self::Board(_) => "board",
            Self::Dashboard(_) => "dashboard",
            Self::Show(_) => "show",
            Self::Stats => "stats",
            Self::Assignees => "assignees",
            Self::Export(_) => "export",
            Self::Completions(_) => "completions",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["tkt", "list", "--json", "-vv", "--status", "open"])
            .unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        let Commands::List(args) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.status.as_deref(), Some("open"));
    }

    #[test]
    fn create_accepts_positional_title() {
        let cli =
            Cli::try_parse_from(["tkt", "create", "Printer jam", "-d", "Jammed again", "-p", "high"])
                .unwrap();
        let Commands::Create(args) = cli.command else {
            panic!("expected create");
        };
        assert_eq!(args.title_arg.as_deref(), Some("Printer jam"));
        assert_eq!(args.fields.priority.as_deref(), Some("high"));
    }
}
