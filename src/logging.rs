//! Logging setup.
//!
//! `TICKETFLOW_LOG` takes an `EnvFilter` directive and wins over the
//! verbosity flags. `TICKETFLOW_LOG_FORMAT=json` switches to JSON lines.
//! Everything goes to stderr so stdout stays parseable.

use std::env;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub const LOG_ENV: &str = "TICKETFLOW_LOG";
pub const LOG_FORMAT_ENV: &str = "TICKETFLOW_LOG_FORMAT";

/// Default filter directive for the given flags.
#[must_use]
pub const fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "ticketflow=debug,ticketflow_lib=debug,warn",
        _ => "trace",
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber is already set.
pub fn init_logging(verbose: u8, quiet: bool) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let format = env::var(LOG_FORMAT_ENV).unwrap_or_else(|_| "compact".to_string());
    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => registry
            .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
            .try_init()?,
        _ => registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .try_init()?,
    }
    Ok(())
}
