//! Pass/total counters per bin.

use super::histogram::Axis;
use super::CombineError;

/// Two-sided 68.27% coverage, the usual one-sigma band.
const ONE_SIGMA_Z: f64 = 1.0;

/// An efficiency curve: per-bin passed and total counts.
///
/// Merging sums both counters independently, so the merged ratio is always
/// `Σpassed / Σtotal` and never an average of per-file ratios.
#[derive(Debug, Clone, PartialEq)]
pub struct Efficiency {
    pub title: String,
    pub axis: Axis,
    pub passed: Vec<u64>,
    pub total: Vec<u64>,
}

impl Efficiency {
    pub fn new(title: impl Into<String>, axis: Axis) -> Self {
        Self {
            title: title.into(),
            axis,
            passed: vec![0; axis.bins],
            total: vec![0; axis.bins],
        }
    }

    /// Record one trial at `x`.
    pub fn fill(&mut self, accepted: bool, x: f64) {
        if let Some(bin) = self.axis.find_bin(x) {
            self.total[bin] += 1;
            if accepted {
                self.passed[bin] += 1;
            }
        }
    }

    pub fn validate(&self) -> Result<(), CombineError> {
        if !self.axis.is_valid() {
            return Err(CombineError::Malformed("invalid axis".to_string()));
        }
        if self.passed.len() != self.axis.bins || self.total.len() != self.axis.bins {
            return Err(CombineError::Malformed(format!(
                "expected {} bins, found {} passed and {} total",
                self.axis.bins,
                self.passed.len(),
                self.total.len()
            )));
        }
        if let Some(bin) = self
            .passed
            .iter()
            .zip(&self.total)
            .position(|(p, t)| p > t)
        {
            return Err(CombineError::Malformed(format!(
                "bin {} has more passed than total events",
                bin
            )));
        }
        Ok(())
    }

    /// Check that `other` has the same binning, is well formed, and that the
    /// summed counters fit in `u64`.
    pub fn check_compatible(&self, other: &Efficiency) -> Result<(), CombineError> {
        if self.axis != other.axis {
            return Err(CombineError::BinningMismatch);
        }
        other.validate()?;
        summed(&self.total, &other.total).map(|_| ())
    }

    /// Add the counters of `other` bin by bin.
    ///
    /// Fails without touching `self` on a binning mismatch or overflow.
    pub fn add(&mut self, other: &Efficiency) -> Result<(), CombineError> {
        if self.axis != other.axis {
            return Err(CombineError::BinningMismatch);
        }
        other.validate()?;
        let passed = summed(&self.passed, &other.passed)?;
        let total = summed(&self.total, &other.total)?;
        self.passed = passed;
        self.total = total;
        Ok(())
    }

    pub fn empty_like(&self) -> Self {
        Self::new(self.title.clone(), self.axis)
    }

    /// `passed / total` for one bin, zero for an empty bin.
    pub fn ratio(&self, bin: usize) -> f64 {
        match self.total[bin] {
            0 => 0.0,
            total => self.passed[bin] as f64 / total as f64,
        }
    }

    /// Ratio over all bins together.
    pub fn overall_ratio(&self) -> f64 {
        let total: f64 = self.total.iter().map(|&t| t as f64).sum();
        if total == 0.0 {
            return 0.0;
        }
        self.passed.iter().map(|&p| p as f64).sum::<f64>() / total
    }

    /// Wilson score interval `(low, high)` around the ratio of one bin.
    pub fn interval(&self, bin: usize) -> (f64, f64) {
        let n = self.total[bin] as f64;
        if n == 0.0 {
            return (0.0, 1.0);
        }
        let p = self.ratio(bin);
        let z2 = ONE_SIGMA_Z * ONE_SIGMA_Z;
        let denom = 1.0 + z2 / n;
        let centre = (p + z2 / (2.0 * n)) / denom;
        let half = ONE_SIGMA_Z * (p * (1.0 - p) / n + z2 / (4.0 * n * n)).sqrt() / denom;
        ((centre - half).max(0.0), (centre + half).min(1.0))
    }

    /// Asymmetric errors `(below, above)` of one bin's ratio.
    pub fn errors(&self, bin: usize) -> (f64, f64) {
        let p = self.ratio(bin);
        let (low, high) = self.interval(bin);
        (p - low, high - p)
    }
}

fn summed(a: &[u64], b: &[u64]) -> Result<Vec<u64>, CombineError> {
    a.iter()
        .zip(b)
        .enumerate()
        .map(|(bin, (x, y))| {
            x.checked_add(*y).ok_or_else(|| {
                CombineError::Malformed(format!("bin {} count overflows when combined", bin))
            })
        })
        .collect()
}
