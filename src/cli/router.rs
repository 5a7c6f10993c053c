//! Command routing and execution
//!
//! This module handles routing CLI commands to their respective implementations.

use crate::app::AppConfig;
use crate::cli::args::{Cli, Commands};
use crate::cli::commands::*;
use anyhow::Result;
use clap::CommandFactory;

/// Execute a CLI command based on the parsed arguments
pub async fn execute_command(command: Option<Commands>, app: &AppConfig) -> Result<()> {
    let Some(command) = command else {
        // No command provided, show help
        println!("{}", Cli::command().render_help());
        return Ok(());
    };

    let settings = app.load_settings()?;

    match command {
        Commands::Partition {
            input_dir,
            output_dir,
            sets_number,
            set_size,
        } => run_partition_command(
            PartitionArgs {
                input_dir,
                output_dir,
                sets_number,
                set_size,
            },
            &settings,
        ),
        Commands::Merge {
            input_dir,
            output_dir,
            jobs,
            quiet,
        } => {
            run_merge_command(
                MergeArgs {
                    input_dir,
                    output_dir,
                    jobs,
                    quiet,
                },
                &settings,
            )
            .await
        }
        Commands::ExtractStats {
            input_file,
            output_dir,
        } => run_extract_stats_command(&input_file, &output_dir, &settings),
        Commands::Clean {
            dir,
            file_type,
            dry_run,
        } => run_clean_command(&dir, file_type, dry_run),
    }
}
