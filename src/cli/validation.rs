//! Input validation for CLI arguments
//!
//! Every check runs; all violations are reported together as one
//! configuration error.

use crate::error::{Result, StatMergeError};
use std::path::Path;

/// Collects violations across several checks.
#[derive(Debug, Default)]
pub struct Violations(Vec<String>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation if `dir` is not an existing directory.
    pub fn require_directory(&mut self, label: &str, dir: &Path) -> &mut Self {
        if !dir.is_dir() {
            self.0.push(format!(
                "{} does not exist. Directory path: {}",
                label,
                dir.display()
            ));
        }
        self
    }

    /// Record a violation if an explicit job count is zero.
    pub fn require_jobs(&mut self, jobs: Option<usize>) -> &mut Self {
        if jobs == Some(0) {
            self.0.push("Number of jobs must be at least 1".to_string());
        }
        self
    }

    pub fn into_result(self) -> Result<()> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(StatMergeError::configuration(self.0))
        }
    }
}
