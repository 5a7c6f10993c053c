//! Clean command implementation
//!
//! Removes one kind of intermediate file from a directory. Only the top level
//! of the directory is considered.

use crate::cli::args::FileType;
use crate::cli::validation::Violations;
use crate::discovery::FileSet;
use crate::error::{ErrorCode, Result as StatResult, StatMergeError};
use anyhow::Result;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// What a clean pass found and removed.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanSummary {
    pub matched: Vec<PathBuf>,
    pub removed: usize,
    pub elapsed: Duration,
}

/// Delete (or, with `dry_run`, only list) every file of `file_type` in `dir`.
pub fn clean_directory(dir: &Path, file_type: FileType, dry_run: bool) -> StatResult<CleanSummary> {
    let started = Instant::now();

    let mut matched = BTreeSet::new();
    for pattern in file_type.patterns() {
        matched.extend(FileSet::discover(dir, pattern)?.files);
    }

    let mut removed = 0;
    if !dry_run {
        for path in &matched {
            std::fs::remove_file(path).map_err(|e| {
                StatMergeError::output_write(ErrorCode::OUTPUT_WRITE_FAILED, path, e.to_string())
                    .with_source(e)
            })?;
            debug!("Removed {}", path.display());
            removed += 1;
        }
    }

    Ok(CleanSummary {
        matched: matched.into_iter().collect(),
        removed,
        elapsed: started.elapsed(),
    })
}

/// Execute the clean command
pub fn run_clean_command(dir: &Path, file_type: FileType, dry_run: bool) -> Result<()> {
    let mut violations = Violations::new();
    violations.require_directory("Directory", dir);
    violations.into_result()?;

    let summary = clean_directory(dir, file_type, dry_run)?;

    if dry_run {
        println!("🔍 Dry run - {} file(s) would be removed:", summary.matched.len());
        for path in &summary.matched {
            println!("   {}", path.display());
        }
    } else {
        info!("Removed {} file(s) from {}", summary.removed, dir.display());
        println!(
            "✅ Removed {} file(s) from {}",
            summary.removed,
            dir.display()
        );
    }
    println!("Elapsed time: {:.3}s", summary.elapsed.as_secs_f64());
    Ok(())
}
