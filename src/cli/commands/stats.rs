//! Extract-stats command implementation

use crate::config::Config;
use crate::stats::extract_stats;
use anyhow::Result;
use std::path::Path;

/// Summarize a merged artifact into the stats report.
pub fn run_extract_stats_command(
    input_file: &Path,
    output_dir: &Path,
    settings: &Config,
) -> Result<()> {
    let report = extract_stats(
        input_file,
        output_dir,
        &settings.stats,
        &settings.merge.efficiency_prefix,
    )?;
    println!("✅ Stats written to {}", report.display());
    Ok(())
}
