//! CLI command handlers
//!
//! This module contains all CLI-related functionality including:
//! - Argument parsing structures
//! - Command implementations
//! - Input validation

pub mod args;
pub mod commands;
pub mod router;
pub mod validation;

pub use args::{Cli, Commands, FileType};
pub use router::execute_command;
pub use validation::Violations;
