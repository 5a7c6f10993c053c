//! Naming conventions and defaults
//!
//! Every convention the tools depend on (discovery patterns, the statistics
//! directory, name prefixes, output file names) lives here. Values come from
//! built-in defaults, optionally overridden by a TOML file and then by
//! `STATMERGE_*` environment variables.
//!
//! ```toml
//! [discovery]
//! partition_pattern = "*.unk.evt.root"
//! artifact_pattern = "*.cat.evt.json"
//!
//! [merge]
//! stats_directory = "EventCategorizer subtask 0 stats"
//! efficiency_prefix = "eff"
//! output_name = "results.json"
//! jobs = 4
//!
//! [stats]
//! marker = "DeltaPhi"
//! events_histogram = "CHMN_FoundHitsSize"
//! report_name = "stats.json"
//! ```

use crate::error::{ErrorCode, StatMergeError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "statmerge.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub merge: MergeConfig,
    #[serde(default)]
    pub stats: StatsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Unclassified event files split into manifests.
    #[serde(default = "default_partition_pattern")]
    pub partition_pattern: String,
    /// Categorized event artifacts consumed by the merge.
    #[serde(default = "default_artifact_pattern")]
    pub artifact_pattern: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeConfig {
    #[serde(default = "default_stats_directory")]
    pub stats_directory: String,
    #[serde(default = "default_efficiency_prefix")]
    pub efficiency_prefix: String,
    #[serde(default = "default_output_name")]
    pub output_name: String,
    /// Worker count; 1 merges sequentially.
    #[serde(default = "default_jobs")]
    pub jobs: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Substring selecting histograms for the moments report.
    #[serde(default = "default_marker")]
    pub marker: String,
    /// Histogram whose entry count is reported as events detected.
    #[serde(default = "default_events_histogram")]
    pub events_histogram: String,
    #[serde(default = "default_report_name")]
    pub report_name: String,
}

fn default_partition_pattern() -> String {
    "*.unk.evt.root".to_string()
}

fn default_artifact_pattern() -> String {
    "*.cat.evt.json".to_string()
}

fn default_stats_directory() -> String {
    "EventCategorizer subtask 0 stats".to_string()
}

fn default_efficiency_prefix() -> String {
    "eff".to_string()
}

fn default_output_name() -> String {
    "results.json".to_string()
}

fn default_jobs() -> usize {
    1
}

fn default_marker() -> String {
    "DeltaPhi".to_string()
}

fn default_events_histogram() -> String {
    "CHMN_FoundHitsSize".to_string()
}

fn default_report_name() -> String {
    "stats.json".to_string()
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            partition_pattern: default_partition_pattern(),
            artifact_pattern: default_artifact_pattern(),
        }
    }
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            stats_directory: default_stats_directory(),
            efficiency_prefix: default_efficiency_prefix(),
            output_name: default_output_name(),
            jobs: default_jobs(),
        }
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            marker: default_marker(),
            events_histogram: default_events_histogram(),
            report_name: default_report_name(),
        }
    }
}

impl Config {
    /// Load configuration from `explicit`, else from `statmerge.toml` in
    /// `working_dir` if present, else defaults. Environment overrides apply
    /// last and the result is validated.
    pub fn load(explicit: Option<&Path>, working_dir: &Path) -> Result<Self, StatMergeError> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let candidate = working_dir.join(DEFAULT_CONFIG_FILE);
                candidate.is_file().then_some(candidate)
            }
        };

        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.merge_env_vars();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, StatMergeError> {
        debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| {
            StatMergeError::configuration_with_code(
                ErrorCode::CONFIG_FILE_UNREADABLE,
                format!("Cannot read config file {}: {}", path.display(), e),
            )
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, StatMergeError> {
        toml::from_str(content).map_err(|e| {
            StatMergeError::configuration_with_code(
                ErrorCode::CONFIG_PARSE_ERROR,
                format!("Invalid config file: {}", e),
            )
        })
    }

    pub fn merge_env_vars(&mut self) {
        if let Ok(dir) = std::env::var("STATMERGE_STATS_DIRECTORY") {
            self.merge.stats_directory = dir;
        }

        if let Ok(jobs) = std::env::var("STATMERGE_JOBS") {
            if let Ok(value) = jobs.parse::<usize>() {
                self.merge.jobs = value;
            }
        }

        if let Ok(marker) = std::env::var("STATMERGE_MARKER") {
            self.stats.marker = marker;
        }
    }

    /// Check every field, reporting all problems together.
    pub fn validate(&self) -> Result<(), StatMergeError> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("discovery.partition_pattern", &self.discovery.partition_pattern),
            ("discovery.artifact_pattern", &self.discovery.artifact_pattern),
        ] {
            if let Err(e) = glob::Pattern::new(value) {
                errors.push(format!("{} is not a valid pattern: {}", field, e));
            }
        }

        for (field, value) in [
            ("merge.stats_directory", &self.merge.stats_directory),
            ("merge.efficiency_prefix", &self.merge.efficiency_prefix),
            ("merge.output_name", &self.merge.output_name),
            ("stats.marker", &self.stats.marker),
            ("stats.events_histogram", &self.stats.events_histogram),
            ("stats.report_name", &self.stats.report_name),
        ] {
            if value.is_empty() {
                errors.push(format!("{} must not be empty", field));
            }
        }

        if self.merge.jobs == 0 {
            errors.push("merge.jobs must be at least 1".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(StatMergeError::Configuration {
                code: ErrorCode::CONFIG_INVALID_VALUE,
                violations: errors,
            })
        }
    }
}
