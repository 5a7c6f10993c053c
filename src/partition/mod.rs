//! Partition generator
//!
//! Splits the unclassified input files of a run into `set_<i>.txt` manifests,
//! one per unit of external processing. The generator only writes manifests;
//! it never launches or tracks the processing itself.

pub mod plan;

pub use plan::{assigned_count, manifest_count, plan_partitions, Manifest};

use crate::discovery::FileSet;
use crate::error::{ErrorCode, Result, StatMergeError};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Parameters of one partitioning run.
#[derive(Debug, Clone)]
pub struct PartitionRequest {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub sets_number: i64,
    pub set_size: i64,
    pub pattern: String,
}

/// What a partitioning run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionSummary {
    pub discovered: usize,
    pub assigned: usize,
    pub manifests: Vec<PathBuf>,
}

impl PartitionRequest {
    /// Check every precondition, returning all violations at once.
    pub fn validate(&self) -> Result<(usize, usize)> {
        let mut violations = Vec::new();

        if !self.input_dir.is_dir() {
            violations.push(format!(
                "Input directory does not exist. Directory path: {}",
                self.input_dir.display()
            ));
        }
        if !self.output_dir.is_dir() {
            violations.push(format!(
                "Output directory does not exist. Directory path: {}",
                self.output_dir.display()
            ));
        }
        if self.sets_number < 1 {
            violations.push(format!("Incorrect sets number: {}.", self.sets_number));
        }
        if self.set_size < 1 {
            violations.push(format!("Incorrect set size: {}.", self.set_size));
        }

        if !violations.is_empty() {
            return Err(StatMergeError::configuration(violations));
        }
        Ok((self.sets_number as usize, self.set_size as usize))
    }
}

/// Validate, discover, plan and write manifests.
pub fn generate(request: &PartitionRequest) -> Result<PartitionSummary> {
    let (sets_number, set_size) = request.validate()?;
    let file_set = FileSet::discover_non_empty(&request.input_dir, &request.pattern)?;

    let manifests = plan_partitions(&file_set.files, sets_number, set_size);
    info!(
        "Assigning {} of {} file(s) to {} manifest(s)",
        assigned_count(file_set.len(), sets_number, set_size),
        file_set.len(),
        manifests.len()
    );

    let written = write_manifests(&request.output_dir, &manifests)?;
    Ok(PartitionSummary {
        discovered: file_set.len(),
        assigned: manifests.iter().map(|m| m.files.len()).sum(),
        manifests: written,
    })
}

/// Persist each manifest as `set_<index>.txt` in `output_dir`.
pub fn write_manifests(output_dir: &Path, manifests: &[Manifest]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(manifests.len());
    for manifest in manifests {
        let path = output_dir.join(manifest.file_name());
        std::fs::write(&path, manifest.render()).map_err(|e| {
            StatMergeError::output_write(ErrorCode::OUTPUT_WRITE_FAILED, &path, e.to_string())
                .with_source(e)
        })?;
        debug!("Wrote {} ({} files)", path.display(), manifest.files.len());
        written.push(path);
    }
    Ok(written)
}

/// Read a manifest back into its list of paths.
pub fn read_manifest(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.is_file() {
        return Err(StatMergeError::input_missing(path));
    }
    let content = std::fs::read_to_string(path).map_err(|e| {
        StatMergeError::other(format!("Cannot read manifest {}: {}", path.display(), e))
    })?;
    Ok(content
        .lines()
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect())
}
