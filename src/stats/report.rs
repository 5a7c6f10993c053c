//! Summary report types and their derivation from histograms.

use crate::objects::Histogram;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Moments of one histogram, derived from its final bin contents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramSummary {
    pub mean: f64,
    pub mean_error: f64,
    pub std: f64,
    pub std_error: f64,
    pub skewness: f64,
    pub skewness_error: f64,
    pub entries: f64,
}

impl HistogramSummary {
    /// Summarize `histogram` after rebuilding its statistics from the bins.
    ///
    /// The input is left untouched; the reset happens on a copy.
    pub fn from_bins(histogram: &Histogram) -> Self {
        let mut h = histogram.clone();
        h.reset_stats();
        Self {
            mean: h.mean(),
            mean_error: h.mean_error(),
            std: h.std_dev(),
            std_error: h.std_dev_error(),
            skewness: h.skewness(),
            skewness_error: h.skewness_error(),
            entries: h.entries,
        }
    }
}

/// The report written by the stats extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    /// Artifact the report was derived from.
    pub source: String,
    pub generated_at: DateTime<Utc>,
    /// Entry count of the reserved events histogram, absent if the artifact
    /// does not contain it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events_detected: Option<f64>,
    pub histograms: BTreeMap<String, HistogramSummary>,
}

impl StatsReport {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            generated_at: Utc::now(),
            events_detected: None,
            histograms: BTreeMap::new(),
        }
    }
}
