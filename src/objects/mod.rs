//! Statistical objects and their combination rules
//!
//! Every object stored in an artifact is one of three kinds. The kind is a
//! discriminant on [`StatObject`]; merging and statistics extraction match on
//! it instead of inspecting payload shapes at each use.

pub mod efficiency;
pub mod histogram;

pub use efficiency::Efficiency;
pub use histogram::{Axis, HistStats, Histogram};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised when two objects cannot be combined or an object is unusable
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CombineError {
    #[error("object kinds differ: expected {expected}, found {found}")]
    KindMismatch { expected: StatKind, found: StatKind },

    #[error("binning differs from the template")]
    BinningMismatch,

    #[error("malformed object: {0}")]
    Malformed(String),
}

/// Kind discriminant of a statistical object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    Histogram1D,
    Histogram2D,
    EfficiencyCurve,
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Histogram1D => "Histogram1D",
            Self::Histogram2D => "Histogram2D",
            Self::EfficiencyCurve => "EfficiencyCurve",
        };
        f.write_str(name)
    }
}

/// A named object's payload, tagged by kind
#[derive(Debug, Clone, PartialEq)]
pub enum StatObject {
    Histogram1D(Histogram),
    Histogram2D(Histogram),
    EfficiencyCurve(Efficiency),
}

impl StatObject {
    /// Wrap a histogram under the kind matching its dimensionality.
    pub fn from_histogram(histogram: Histogram) -> Result<Self, CombineError> {
        match histogram.dimension() {
            1 => Ok(Self::Histogram1D(histogram)),
            2 => Ok(Self::Histogram2D(histogram)),
            n => Err(CombineError::Malformed(format!(
                "histograms have 1 or 2 axes, found {}",
                n
            ))),
        }
    }

    pub fn kind(&self) -> StatKind {
        match self {
            Self::Histogram1D(_) => StatKind::Histogram1D,
            Self::Histogram2D(_) => StatKind::Histogram2D,
            Self::EfficiencyCurve(_) => StatKind::EfficiencyCurve,
        }
    }

    pub fn as_histogram(&self) -> Option<&Histogram> {
        match self {
            Self::Histogram1D(h) | Self::Histogram2D(h) => Some(h),
            Self::EfficiencyCurve(_) => None,
        }
    }

    pub fn as_efficiency(&self) -> Option<&Efficiency> {
        match self {
            Self::EfficiencyCurve(e) => Some(e),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), CombineError> {
        match self {
            Self::Histogram1D(h) | Self::Histogram2D(h) => h.validate(),
            Self::EfficiencyCurve(e) => e.validate(),
        }
    }

    /// Check that `other` could be combined into `self`, without mutating.
    pub fn check_compatible(&self, other: &StatObject) -> Result<(), CombineError> {
        match (self, other) {
            (Self::Histogram1D(a), Self::Histogram1D(b))
            | (Self::Histogram2D(a), Self::Histogram2D(b)) => a.check_compatible(b),
            (Self::EfficiencyCurve(a), Self::EfficiencyCurve(b)) => a.check_compatible(b),
            _ => Err(CombineError::KindMismatch {
                expected: self.kind(),
                found: other.kind(),
            }),
        }
    }

    /// Fold `other` into `self` with the kind-specific rule: bin-wise sum for
    /// histograms, independent sums of passed and total for efficiencies.
    pub fn combine(&mut self, other: &StatObject) -> Result<(), CombineError> {
        let expected = self.kind();
        match (self, other) {
            (Self::Histogram1D(a), Self::Histogram1D(b))
            | (Self::Histogram2D(a), Self::Histogram2D(b)) => a.add(b),
            (Self::EfficiencyCurve(a), Self::EfficiencyCurve(b)) => a.add(b),
            (_, other) => Err(CombineError::KindMismatch {
                expected,
                found: other.kind(),
            }),
        }
    }

    /// Same kind and binning with a zero payload.
    pub fn empty_like(&self) -> Self {
        match self {
            Self::Histogram1D(h) => Self::Histogram1D(h.empty_like()),
            Self::Histogram2D(h) => Self::Histogram2D(h.empty_like()),
            Self::EfficiencyCurve(e) => Self::EfficiencyCurve(e.empty_like()),
        }
    }
}
