//! # statmerge
//!
//! Batch tooling around a distributed event-categorization run: split the raw
//! input files into manifests for external workers, merge the per-worker
//! statistical artifacts back into one, and summarize the merged histograms.
//!
//! ## Usage
//!
//! ```bash
//! statmerge partition --input-dir raw/ --output-dir sets/ --sets-number 10 --set-size 50
//! statmerge merge --input-dir categorized/ --output-dir merged/ [--jobs 4]
//! statmerge extract-stats --input-file merged/results.json --output-dir report/
//! ```
//!
//! ## Modules
//!
//! - `objects` - Histograms and efficiency curves with their combination rules
//! - `artifact` - On-disk JSON representation of worker output
//! - `discovery` - Sorted glob matching of input files
//! - `partition` - Manifest planning and writing
//! - `merge` - Schema discovery, the accumulator fold and the result writer
//! - `stats` - Moments of the merged histograms and the summary report
//! - `config` - The `statmerge.toml` conventions file
//! - `error` - Error type with codes and process exit codes
//! - `app` / `cli` - Logging, argument parsing and subcommands
pub mod app;
pub mod artifact;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod merge;
pub mod objects;
pub mod partition;
pub mod stats;

pub use error::{Result, StatMergeError};
