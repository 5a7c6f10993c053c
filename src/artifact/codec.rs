//! Conversion between stored objects and [`StatObject`] values.

use crate::objects::{Axis, CombineError, Efficiency, HistStats, Histogram, StatObject};
use serde::{Deserialize, Serialize};

/// An object as it is stored in an artifact.
///
/// Histograms and efficiencies share one shape; which fields are meaningful
/// depends on the kind the object is classified as.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawObject {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub axes: Vec<Axis>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contents: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sumw2: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entries: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<HistStats>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub passed: Vec<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub total: Vec<u64>,
}

/// Classify and decode a stored object.
///
/// Names starting with `efficiency_prefix` are efficiency curves; anything
/// else is a histogram whose kind follows from its number of axes.
pub fn decode_object(
    name: &str,
    raw: RawObject,
    efficiency_prefix: &str,
) -> Result<StatObject, CombineError> {
    let object = if name.starts_with(efficiency_prefix) {
        StatObject::EfficiencyCurve(decode_efficiency(raw)?)
    } else {
        StatObject::from_histogram(decode_histogram(raw))?
    };
    object.validate()?;
    Ok(object)
}

fn decode_efficiency(raw: RawObject) -> Result<Efficiency, CombineError> {
    let [axis] = raw.axes[..] else {
        return Err(CombineError::Malformed(format!(
            "efficiency curves have 1 axis, found {}",
            raw.axes.len()
        )));
    };
    Ok(Efficiency {
        title: raw.title,
        axis,
        passed: raw.passed,
        total: raw.total,
    })
}

fn decode_histogram(raw: RawObject) -> Histogram {
    // Unweighted histograms may omit sumw2; it then equals the contents.
    let sumw2 = raw.sumw2.unwrap_or_else(|| raw.contents.clone());
    let mut histogram = Histogram {
        title: raw.title,
        axes: raw.axes,
        contents: raw.contents,
        sumw2,
        entries: raw.entries.unwrap_or_default(),
        stats: raw.stats.unwrap_or_default(),
    };
    if raw.stats.is_none() && histogram.validate().is_ok() {
        histogram.reset_stats();
        if let Some(entries) = raw.entries {
            histogram.entries = entries;
        }
    }
    histogram
}

/// Encode an object for storage.
pub fn encode_object(object: &StatObject) -> RawObject {
    match object {
        StatObject::Histogram1D(h) | StatObject::Histogram2D(h) => RawObject {
            title: h.title.clone(),
            axes: h.axes.clone(),
            contents: h.contents.clone(),
            sumw2: Some(h.sumw2.clone()),
            entries: Some(h.entries),
            stats: Some(h.stats),
            ..RawObject::default()
        },
        StatObject::EfficiencyCurve(e) => RawObject {
            title: e.title.clone(),
            axes: vec![e.axis],
            passed: e.passed.clone(),
            total: e.total.clone(),
            ..RawObject::default()
        },
    }
}
