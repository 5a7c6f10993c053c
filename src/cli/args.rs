//! CLI argument structures
//!
//! This module defines the command-line interface of statmerge: the main CLI
//! structure and one subcommand per pipeline stage.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Partition, merge and summarize the statistical output of a run
#[derive(Parser)]
#[command(name = "statmerge")]
#[command(about = "statmerge - Partition inputs, merge per-worker statistics and extract summaries", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to the conventions file (defaults to ./statmerge.toml if present)
    #[arg(short = 'c', long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split the input files of a run into set_<i>.txt manifests
    #[command(name = "partition")]
    Partition {
        /// Directory holding the unclassified input files
        #[arg(long)]
        input_dir: PathBuf,

        /// Directory the manifests are written to (must exist)
        #[arg(long)]
        output_dir: PathBuf,

        /// Maximum number of manifests
        #[arg(long, allow_negative_numbers = true)]
        sets_number: i64,

        /// Maximum number of files per manifest
        #[arg(long, allow_negative_numbers = true)]
        set_size: i64,
    },

    /// Merge the categorized artifacts of a run into one result artifact
    #[command(name = "merge")]
    Merge {
        /// Directory holding the categorized artifacts
        #[arg(long)]
        input_dir: PathBuf,

        /// Directory the merged result is written to
        #[arg(long)]
        output_dir: PathBuf,

        /// Number of parallel merge workers (overrides merge.jobs)
        #[arg(short = 'j', long)]
        jobs: Option<usize>,

        /// Hide the progress bar
        #[arg(short = 'q', long)]
        quiet: bool,
    },

    /// Summarize the marker histograms of a merged artifact
    #[command(name = "extract-stats")]
    ExtractStats {
        /// Merged artifact to summarize
        #[arg(long)]
        input_file: PathBuf,

        /// Directory the report is written to
        #[arg(long)]
        output_dir: PathBuf,
    },

    /// Remove intermediate files of one type from a directory
    #[command(name = "clean")]
    Clean {
        /// Directory to clean
        #[arg(long)]
        dir: PathBuf,

        /// Kind of files to remove
        #[arg(long, value_enum)]
        file_type: FileType,

        /// List matching files without deleting them
        #[arg(long)]
        dry_run: bool,
    },
}

/// File kinds produced along the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FileType {
    /// Log files (*.log)
    #[value(name = "LOGFILE")]
    LogFile,
    /// Categorized artifacts (*.cat.evt.json)
    #[value(name = "CATEVNTFILE")]
    CatEventFile,
    /// Raw ROOT files (*.root)
    #[value(name = "ROOTFILE")]
    RootFile,
    /// Batch scheduler stdout/stderr logs (*.o*-*, *.e*-*)
    #[value(name = "PBSLOGFILES")]
    PbsLogFiles,
}

impl FileType {
    /// Glob patterns, relative to the cleaned directory, for this kind.
    pub fn patterns(self) -> &'static [&'static str] {
        match self {
            Self::LogFile => &["*.log"],
            Self::CatEventFile => &["*.cat.evt.json"],
            Self::RootFile => &["*.root"],
            Self::PbsLogFiles => &["*.o*-*", "*.e*-*"],
        }
    }
}
