//! Utility functions for terminal output and diagnostics
//!
//! This module provides consistent, colored output functions for displaying
//! progress, success, and error messages in the terminal, plus the tracing
//! subscriber setup used for `--verbose` diagnostics.

use colored::*;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

use crate::constants::{DEFAULT_LOG_FILTER, VERBOSE_LOG_FILTER};

/// Displays a progress message with an hourglass
///
/// The message is printed without a newline so a following
/// [`print_success`] or [`print_error`] overwrites it.
///
/// # Example
///
/// ```no_run
/// use devenv::utils::{print_progress, print_success};
///
/// print_progress("Creating Amplify branch...");
/// print_success("Created Amplify branch");
/// ```
pub fn print_progress(message: &str) {
    print!("{} {}", "⏳".yellow(), message);
    let _ = io::stdout().flush();
}

/// Displays a success message with a green checkmark
pub fn print_success(message: &str) {
    println!("\r{} {}", "✓".green(), message);
}

/// Displays a non-fatal notice, e.g. a resource that already exists
pub fn print_warning(message: &str) {
    println!("\r{} {}", "⚠".yellow(), message);
}

/// Displays an error message with a red X mark
pub fn print_error(message: &str) {
    println!("\r{} {}", "✗".red(), message);
}

/// Installs the stderr tracing subscriber
///
/// `RUST_LOG` wins when set. Otherwise only warnings are shown, or debug
/// events from this crate when `verbose` is requested.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // A second init (e.g. from tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
