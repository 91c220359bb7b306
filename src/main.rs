//! `ticketflow` (tkt) - Support ticket dashboard for the terminal
//!
//! Tickets live in a local data directory as JSON documents. Every command
//! loads them, performs one operation, and writes them back.

use ticketflow::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
