//! Message formatting for the command-line front end.
//!
//! Errors and warnings go to stderr, everything else to stdout. Colors follow one
//! scheme: red for errors, yellow for warnings, green for success.

use crate::core::error::{ErrorClass, ExplorerError};
use crate::core::events::ExplorerEvent;
use colored::*;

/// Prints `✕ Error: <message>` in red with blank lines around it
pub fn print_error(message: &str) {
    eprintln!("\n{} {}\n", "✕ Error:".red(), message.white());
}

pub fn print_warning(message: &str) {
    eprintln!("{} {}", "!".yellow(), message.white());
}

pub fn print_success(message: &str) {
    println!("\n{} {}", "✓".green(), message.white());
}

pub fn print_info(message: &str) {
    println!("\n{}\n", message.white());
}

/// Prints `<header>:` with a blank line before and after
pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.white());
}

/// Prints an error with a hint matching its class
pub fn print_explorer_error(error: &ExplorerError) {
    print_error(&error.to_string());
    let hint = match error.class() {
        ErrorClass::Transport => Some("Check that the backend is running and reachable."),
        ErrorClass::Precondition => Some("Nothing was sent; run `ls` to see the current statuses."),
        ErrorClass::Backend | ErrorClass::Local => None,
    };
    if let Some(hint) = hint {
        eprintln!("{}\n", hint.bright_black());
    }
}

/// One-line rendering of an event for the interactive loop; `None` for quiet events
pub fn describe_event(event: &ExplorerEvent) -> Option<String> {
    match event {
        ExplorerEvent::RefreshFailed { path, error } => {
            Some(format!("Could not load {path}: {error}"))
        }
        ExplorerEvent::ActionFailed { action, error } => Some(format!("{action} failed: {error}")),
        ExplorerEvent::ActionRejected { action, reason } => {
            Some(format!("{action} refused: {reason}"))
        }
        ExplorerEvent::RefreshDiscarded { path } => {
            Some(format!("Ignored a late listing for {path}"))
        }
        ExplorerEvent::PathChanged { .. }
        | ExplorerEvent::ListingRefreshed { .. }
        | ExplorerEvent::ActionSucceeded { .. } => None,
    }
}
