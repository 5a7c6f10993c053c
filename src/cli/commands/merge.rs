//! Merge command implementation

use crate::cli::validation::Violations;
use crate::config::Config;
use crate::merge::{run_pipeline, MergeOptions};
use anyhow::Result;
use std::path::PathBuf;

/// Arguments of `statmerge merge`.
#[derive(Debug, Clone)]
pub struct MergeArgs {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub jobs: Option<usize>,
    pub quiet: bool,
}

/// Merge every categorized artifact under the input directory.
pub async fn run_merge_command(args: MergeArgs, settings: &Config) -> Result<()> {
    let mut violations = Violations::new();
    violations
        .require_directory("Input directory", &args.input_dir)
        .require_jobs(args.jobs);
    violations.into_result()?;

    let options = MergeOptions {
        jobs: args.jobs.unwrap_or(settings.merge.jobs),
        show_progress: !args.quiet,
    };

    let report = run_pipeline(
        &args.input_dir,
        &args.output_dir,
        &settings.discovery.artifact_pattern,
        &settings.merge,
        &options,
    )
    .await?;

    if !args.quiet {
        for skipped in &report.skipped {
            eprintln!("⚠️  Skipped {}: {}", skipped.path.display(), skipped.reason);
        }
    }

    println!(
        "✅ Merged {} of {} file(s) into {}",
        report.merged + 1,
        report.files,
        report.output.display()
    );
    println!("Elapsed time: {:.3}s", report.elapsed.as_secs_f64());
    println!("Final error counter : {}", report.error_count);
    Ok(())
}
