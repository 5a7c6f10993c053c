//! Error handling utilities
//!
//! This module provides centralized error handling for the application.

use crate::error::StatMergeError;
use tracing::error;

/// Exit code for an error that reached the top of a command.
pub fn exit_code_for(error: &anyhow::Error) -> i32 {
    error
        .downcast_ref::<StatMergeError>()
        .map_or(1, StatMergeError::exit_code)
}

/// Handle fatal errors and exit with appropriate status code
///
/// `StatMergeError`s print their user message, plus the full source chain
/// when `verbose >= 1`. Anything else prints its display form and exits 1.
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    error!("Fatal error: {}", error);

    if let Some(err) = error.downcast_ref::<StatMergeError>() {
        eprintln!("{}", err.user_message());

        if verbose >= 1 {
            eprintln!("\nContext Chain:\n{}", err.developer_message());
        }
    } else {
        eprintln!("Error: {error}");

        if verbose >= 1 {
            eprintln!("\nError chain:");
            for (i, cause) in error.chain().enumerate() {
                eprintln!("  {}: {}", i, cause);
            }
        }
    }

    std::process::exit(exit_code_for(&error))
}
