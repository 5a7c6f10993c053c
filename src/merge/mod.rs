//! Merge pipeline
//!
//! Schema discovery, the accumulator fold and the result writer, run as one
//! pipeline over the categorized artifacts of a run:
//!
//! 1. the first artifact (in file-set order) becomes the template; failing to
//!    read it aborts before any other file is opened;
//! 2. every other artifact is staged and folded in, failures are counted;
//! 3. the template is written as one output artifact.

pub mod accumulator;
pub mod parallel;
pub mod schema;
pub mod writer;

pub use accumulator::{
    fold_artifacts, stage_artifact, ArtifactOutcome, MergeState, SkippedArtifact, StagedArtifact,
};
pub use parallel::{chunk_bounds, merge_parallel};
pub use schema::{discover_schema, Template};
pub use writer::write_result;

use crate::config::MergeConfig;
use crate::discovery::FileSet;
use crate::error::{Result, StatMergeError};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::info;

/// Runtime knobs that do not change the merged data.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    pub jobs: usize,
    pub show_progress: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            jobs: 1,
            show_progress: false,
        }
    }
}

/// Final state of a merge.
#[derive(Debug, Clone)]
pub struct MergeResult {
    pub template: Template,
    /// Artifacts after the schema source that could not be merged.
    pub error_count: usize,
    pub merged: usize,
    pub skipped: Vec<SkippedArtifact>,
    pub elapsed: Duration,
}

/// What the pipeline wrote.
#[derive(Debug, Clone)]
pub struct MergeReport {
    pub output: PathBuf,
    pub files: usize,
    pub merged: usize,
    pub error_count: usize,
    pub skipped: Vec<SkippedArtifact>,
    pub elapsed: Duration,
}

/// Discover the schema from the first file and fold in the rest.
pub async fn merge_file_set(
    file_set: &FileSet,
    settings: &MergeConfig,
    options: &MergeOptions,
) -> Result<MergeResult> {
    let started = Instant::now();
    let Some((schema_source, rest)) = file_set.files.split_first() else {
        return Err(StatMergeError::empty_input(&file_set.root, &file_set.pattern));
    };

    let template = discover_schema(schema_source, settings)?;

    info!("Merging files ...");
    let progress = create_progress_bar(file_set.len(), options.show_progress);
    progress.inc(1);

    let state = if options.jobs > 1 && rest.len() > 1 {
        merge_parallel(template, rest.to_vec(), settings, options.jobs, &progress).await?
    } else {
        fold_artifacts(
            MergeState::new(template),
            rest,
            settings,
            2,
            file_set.len(),
            &progress,
        )
    };
    progress.finish_and_clear();

    Ok(MergeResult {
        template: state.template,
        error_count: state.error_count,
        merged: state.merged,
        skipped: state.skipped,
        elapsed: started.elapsed(),
    })
}

/// Discover artifacts under `input_dir`, merge them and write the result
/// into `output_dir`.
pub async fn run_pipeline(
    input_dir: &Path,
    output_dir: &Path,
    pattern: &str,
    settings: &MergeConfig,
    options: &MergeOptions,
) -> Result<MergeReport> {
    let file_set = FileSet::discover_non_empty(input_dir, pattern)?;
    let result = merge_file_set(&file_set, settings, options).await?;

    info!("Elapsed time: {:?}", result.elapsed);
    info!("Final error counter : {}", result.error_count);

    let output = write_result(&result.template, output_dir, &settings.output_name)?;
    Ok(MergeReport {
        output,
        files: file_set.len(),
        merged: result.merged,
        error_count: result.error_count,
        skipped: result.skipped,
        elapsed: result.elapsed,
    })
}

fn create_progress_bar(total: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("█▓▒░ "));
    }
    pb
}
