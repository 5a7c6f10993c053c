//! Partition command implementation

use crate::config::Config;
use crate::partition::{generate, PartitionRequest};
use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

/// Arguments of `statmerge partition`.
#[derive(Debug, Clone)]
pub struct PartitionArgs {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub sets_number: i64,
    pub set_size: i64,
}

/// Write the manifests for one run.
pub fn run_partition_command(args: PartitionArgs, settings: &Config) -> Result<()> {
    let request = PartitionRequest {
        input_dir: args.input_dir,
        output_dir: args.output_dir,
        sets_number: args.sets_number,
        set_size: args.set_size,
        pattern: settings.discovery.partition_pattern.clone(),
    };

    let summary = generate(&request)?;
    info!(
        "Found {} file(s), assigned {}",
        summary.discovered, summary.assigned
    );

    println!(
        "✅ Wrote {} manifest(s) to {}",
        summary.manifests.len(),
        request.output_dir.display()
    );
    for path in &summary.manifests {
        println!("   {}", path.display());
    }
    Ok(())
}
