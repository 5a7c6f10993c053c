//! Command implementation modules
//!
//! Each subcommand is implemented as a separate module.

pub mod clean;
pub mod merge;
pub mod partition;
pub mod stats;

pub use clean::{clean_directory, run_clean_command, CleanSummary};
pub use merge::{run_merge_command, MergeArgs};
pub use partition::{run_partition_command, PartitionArgs};
pub use stats::run_extract_stats_command;
