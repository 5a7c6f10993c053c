//! Binned distributions with one or two axes.
//!
//! A histogram keeps its bin contents, the per-bin sum of squared weights and
//! a set of running meta-statistics. The meta-statistics travel with the
//! histogram through merges and are only trusted after [`Histogram::reset_stats`]
//! has rebuilt them from the final bin contents.

use super::CombineError;
use serde::{Deserialize, Serialize};

/// A regular binning along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    /// Number of bins (excluding under/overflow).
    pub bins: usize,
    /// Lower edge of first bin.
    pub min: f64,
    /// Upper edge of last bin.
    pub max: f64,
}

impl Axis {
    pub fn new(bins: usize, min: f64, max: f64) -> Self {
        Self { bins, min, max }
    }

    pub fn bin_width(&self) -> f64 {
        (self.max - self.min) / self.bins as f64
    }

    /// Centre of bin `index` (0-based, excluding underflow).
    pub fn bin_center(&self, index: usize) -> f64 {
        self.min + (index as f64 + 0.5) * self.bin_width()
    }

    /// Bin index holding `x`, or `None` if `x` falls outside the axis.
    pub fn find_bin(&self, x: f64) -> Option<usize> {
        if !(self.min..self.max).contains(&x) {
            return None;
        }
        let index = ((x - self.min) / self.bin_width()) as usize;
        Some(index.min(self.bins - 1))
    }

    pub fn is_valid(&self) -> bool {
        self.bins > 0 && self.min.is_finite() && self.max.is_finite() && self.max > self.min
    }
}

/// Running sums used to derive moments along the x axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HistStats {
    pub sumw: f64,
    pub sumw2: f64,
    pub sumwx: f64,
    pub sumwx2: f64,
}

impl HistStats {
    fn add(&mut self, other: &HistStats) {
        self.sumw += other.sumw;
        self.sumw2 += other.sumw2;
        self.sumwx += other.sumwx;
        self.sumwx2 += other.sumwx2;
    }
}

fn cell_count(axes: &[Axis]) -> Option<usize> {
    axes.iter().try_fold(1usize, |n, axis| n.checked_mul(axis.bins))
}

/// A 1D or 2D histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub title: String,
    /// One axis for 1D, two for 2D.
    pub axes: Vec<Axis>,
    /// Bin contents, x index fastest.
    pub contents: Vec<f64>,
    /// Sum of weights squared per bin.
    pub sumw2: Vec<f64>,
    /// Total number of entries.
    pub entries: f64,
    pub stats: HistStats,
}

impl Histogram {
    /// Create an empty 1D histogram.
    pub fn new_1d(title: impl Into<String>, x: Axis) -> Self {
        Self::with_axes(title, vec![x])
    }

    /// Create an empty 2D histogram.
    pub fn new_2d(title: impl Into<String>, x: Axis, y: Axis) -> Self {
        Self::with_axes(title, vec![x, y])
    }

    /// An unrepresentable binning gets no cells, which [`Histogram::validate`]
    /// then rejects.
    fn with_axes(title: impl Into<String>, axes: Vec<Axis>) -> Self {
        let n = cell_count(&axes).unwrap_or(0);
        Self {
            title: title.into(),
            axes,
            contents: vec![0.0; n],
            sumw2: vec![0.0; n],
            entries: 0.0,
            stats: HistStats::default(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.axes.len()
    }

    /// Number of bins over all axes, `None` if it does not fit in `usize`.
    pub fn n_cells(&self) -> Option<usize> {
        cell_count(&self.axes)
    }

    /// Fill a 1D histogram with weight `w`. Values outside the axis count as
    /// entries but land in no bin.
    pub fn fill(&mut self, x: f64, w: f64) {
        self.entries += 1.0;
        let Some(ix) = self.axes[0].find_bin(x) else {
            return;
        };
        self.contents[ix] += w;
        self.sumw2[ix] += w * w;
        self.record(x, w);
    }

    /// Fill a 2D histogram with weight `w`.
    pub fn fill_2d(&mut self, x: f64, y: f64, w: f64) {
        self.entries += 1.0;
        let (Some(ix), Some(iy)) = (self.axes[0].find_bin(x), self.axes[1].find_bin(y)) else {
            return;
        };
        let cell = iy * self.axes[0].bins + ix;
        self.contents[cell] += w;
        self.sumw2[cell] += w * w;
        self.record(x, w);
    }

    fn record(&mut self, x: f64, w: f64) {
        self.stats.sumw += w;
        self.stats.sumw2 += w * w;
        self.stats.sumwx += w * x;
        self.stats.sumwx2 += w * x * x;
    }

    /// Check that payload lengths match the binning.
    pub fn validate(&self) -> Result<(), CombineError> {
        if self.axes.iter().any(|a| !a.is_valid()) {
            return Err(CombineError::Malformed("invalid axis".to_string()));
        }
        let n = self
            .n_cells()
            .ok_or_else(|| CombineError::Malformed("binning too large".to_string()))?;
        if self.contents.len() != n || self.sumw2.len() != n {
            return Err(CombineError::Malformed(format!(
                "expected {} bins, found {} contents and {} sumw2",
                n,
                self.contents.len(),
                self.sumw2.len()
            )));
        }
        Ok(())
    }

    /// Bin-wise sum of `other` into `self`.
    ///
    /// Fails without touching `self` if the binnings differ.
    pub fn add(&mut self, other: &Histogram) -> Result<(), CombineError> {
        self.check_compatible(other)?;
        for (a, b) in self.contents.iter_mut().zip(&other.contents) {
            *a += b;
        }
        for (a, b) in self.sumw2.iter_mut().zip(&other.sumw2) {
            *a += b;
        }
        self.entries += other.entries;
        self.stats.add(&other.stats);
        Ok(())
    }

    pub fn check_compatible(&self, other: &Histogram) -> Result<(), CombineError> {
        if self.axes != other.axes {
            return Err(CombineError::BinningMismatch);
        }
        other.validate()
    }

    /// Same binning, zero payload.
    pub fn empty_like(&self) -> Self {
        Self::with_axes(self.title.clone(), self.axes.clone())
    }

    /// Per x bin `(content, sumw2)`, summed over y.
    fn x_projection(&self) -> Vec<(f64, f64)> {
        let nx = self.axes[0].bins;
        let mut projected = vec![(0.0, 0.0); nx];
        for (cell, (w, w2)) in self.contents.iter().zip(&self.sumw2).enumerate() {
            let slot = &mut projected[cell % nx];
            slot.0 += w;
            slot.1 += w2;
        }
        projected
    }

    /// Rebuild the meta-statistics and entry count from the current bin
    /// contents, discarding whatever was accumulated during filling or merging.
    pub fn reset_stats(&mut self) {
        let axis = self.axes[0];
        let mut stats = HistStats::default();
        for (ix, (w, w2)) in self.x_projection().into_iter().enumerate() {
            let x = axis.bin_center(ix);
            stats.sumw += w;
            stats.sumw2 += w2;
            stats.sumwx += w * x;
            stats.sumwx2 += w * x * x;
        }
        self.stats = stats;
        self.entries = self.effective_entries();
    }

    /// `sumw² / sumw2`, equal to the plain entry count for unit weights.
    pub fn effective_entries(&self) -> f64 {
        if self.stats.sumw2 > 0.0 {
            self.stats.sumw * self.stats.sumw / self.stats.sumw2
        } else {
            0.0
        }
    }

    pub fn mean(&self) -> f64 {
        if self.stats.sumw == 0.0 {
            return 0.0;
        }
        self.stats.sumwx / self.stats.sumw
    }

    pub fn std_dev(&self) -> f64 {
        if self.stats.sumw == 0.0 {
            return 0.0;
        }
        let mean = self.mean();
        (self.stats.sumwx2 / self.stats.sumw - mean * mean)
            .max(0.0)
            .sqrt()
    }

    pub fn mean_error(&self) -> f64 {
        let neff = self.effective_entries();
        if neff > 0.0 {
            self.std_dev() / neff.sqrt()
        } else {
            0.0
        }
    }

    pub fn std_dev_error(&self) -> f64 {
        let neff = self.effective_entries();
        if neff > 0.0 {
            self.std_dev() / (2.0 * neff).sqrt()
        } else {
            0.0
        }
    }

    /// Third standardized moment along x, computed from bin centres.
    pub fn skewness(&self) -> f64 {
        let std = self.std_dev();
        if self.stats.sumw == 0.0 || std == 0.0 {
            return 0.0;
        }
        let axis = self.axes[0];
        let mean = self.mean();
        let third: f64 = self
            .x_projection()
            .into_iter()
            .enumerate()
            .map(|(ix, (w, _))| w * (axis.bin_center(ix) - mean).powi(3))
            .sum();
        third / self.stats.sumw / std.powi(3)
    }

    pub fn skewness_error(&self) -> f64 {
        let neff = self.effective_entries();
        if neff > 0.0 {
            (6.0 / neff).sqrt()
        } else {
            0.0
        }
    }

    pub fn integral(&self) -> f64 {
        self.contents.iter().sum()
    }
}
