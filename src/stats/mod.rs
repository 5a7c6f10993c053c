//! Stats extractor
//!
//! Reads a (usually merged) artifact and derives a summary report:
//!
//! - every histogram whose name contains the configured marker contributes its
//!   mean, standard deviation and skewness with their errors, computed only
//!   from the final bin contents;
//! - the reserved events histogram contributes its entry count as
//!   `events_detected`.

pub mod report;

pub use report::{HistogramSummary, StatsReport};

use crate::artifact::{decode_object, Artifact};
use crate::config::StatsConfig;
use crate::error::{ErrorCode, Result, StatMergeError};
use crate::objects::StatObject;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Build the report from named objects. Pure; no I/O.
pub fn build_report<'a>(
    source: &str,
    objects: impl IntoIterator<Item = (&'a str, &'a StatObject)>,
    settings: &StatsConfig,
) -> StatsReport {
    let mut report = StatsReport::new(source);

    for (name, object) in objects {
        let Some(histogram) = object.as_histogram() else {
            continue;
        };
        if name == settings.events_histogram {
            report.events_detected = Some(histogram.entries);
        }
        if name.contains(&settings.marker) {
            debug!("Computing moments of {}", name);
            report
                .histograms
                .insert(name.to_string(), HistogramSummary::from_bins(histogram));
        }
    }

    if report.events_detected.is_none() {
        warn!(
            "Events histogram '{}' not found in {}",
            settings.events_histogram, source
        );
    }
    report
}

/// Decode every object of every directory in `artifact`.
///
/// Objects that cannot be decoded are skipped with a warning; when a name
/// appears in several directories the first one wins.
pub fn collect_objects(artifact: Artifact, efficiency_prefix: &str) -> BTreeMap<String, StatObject> {
    let mut objects = BTreeMap::new();
    for (directory, entries) in artifact.directories {
        for (name, raw) in entries {
            if objects.contains_key(&name) {
                warn!("Ignoring duplicate object '{}' in '{}'", name, directory);
                continue;
            }
            match decode_object(&name, raw, efficiency_prefix) {
                Ok(object) => {
                    objects.insert(name, object);
                }
                Err(e) => warn!("Skipping object '{}' in '{}': {}", name, directory, e),
            }
        }
    }
    objects
}

/// Read `input_file`, build the report and write it into `output_dir`.
pub fn extract_stats(
    input_file: &Path,
    output_dir: &Path,
    settings: &StatsConfig,
    efficiency_prefix: &str,
) -> Result<PathBuf> {
    if !input_file.is_file() {
        return Err(StatMergeError::input_missing(input_file));
    }
    if !output_dir.exists() {
        info!("Creating output directory {}", output_dir.display());
    }
    std::fs::create_dir_all(output_dir).map_err(|e| {
        StatMergeError::output_write(ErrorCode::OUTPUT_CREATE_DIR_FAILED, output_dir, e.to_string())
            .with_source(e)
    })?;

    let artifact = Artifact::read(input_file).map_err(|e| {
        StatMergeError::other(format!("Cannot read {}: {}", input_file.display(), e))
    })?;
    let objects = collect_objects(artifact, efficiency_prefix);
    let report = build_report(
        &input_file.display().to_string(),
        objects.iter().map(|(name, object)| (name.as_str(), object)),
        settings,
    );
    info!(
        "Summarized {} histogram(s) from {}",
        report.histograms.len(),
        input_file.display()
    );

    write_report(&report, &output_dir.join(&settings.report_name))
}

/// Serialize the report as pretty-printed UTF-8 JSON.
pub fn write_report(report: &StatsReport, path: &Path) -> Result<PathBuf> {
    let fail = |e: String| StatMergeError::output_write(ErrorCode::OUTPUT_WRITE_FAILED, path, e);
    let json = serde_json::to_string_pretty(report).map_err(|e| fail(e.to_string()))?;
    std::fs::write(path, json).map_err(|e| fail(e.to_string()))?;
    Ok(path.to_path_buf())
}
