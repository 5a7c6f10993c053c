//! File discovery
//!
//! A [`FileSet`] is the ordered list of files matching a glob pattern directly
//! under a directory. Paths are sorted so that partitioning and the merge
//! order do not depend on directory iteration order.

use crate::error::{ErrorCode, Result, StatMergeError};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct FileSet {
    pub root: PathBuf,
    pub pattern: String,
    pub files: Vec<PathBuf>,
}

impl FileSet {
    /// Match `pattern` against file names in `root`.
    ///
    /// An empty match is not an error here; callers decide whether it is.
    pub fn discover(root: &Path, pattern: &str) -> Result<Self> {
        let root_str = root.to_str().ok_or_else(|| {
            StatMergeError::configuration_with_code(
                ErrorCode::CONFIG_INVALID_VALUE,
                format!("Path is not valid UTF-8: {}", root.display()),
            )
        })?;
        // The directory is literal; only `pattern` carries wildcards.
        let full = Path::new(&glob::Pattern::escape(root_str)).join(pattern);

        let paths = glob::glob(&full.to_string_lossy()).map_err(|e| StatMergeError::EmptyInput {
            code: ErrorCode::EMPTY_INPUT_BAD_PATTERN,
            dir: root.to_path_buf(),
            pattern: format!("{} ({})", pattern, e),
        })?;

        let mut files = Vec::new();
        for entry in paths {
            match entry {
                Ok(path) if path.is_file() => files.push(path),
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable path during discovery: {}", e),
            }
        }
        files.sort();

        debug!(
            "Discovered {} file(s) matching '{}' in {}",
            files.len(),
            pattern,
            root.display()
        );

        Ok(Self {
            root: root.to_path_buf(),
            pattern: pattern.to_string(),
            files,
        })
    }

    /// Like [`FileSet::discover`], failing with an empty input error when
    /// nothing matches.
    pub fn discover_non_empty(root: &Path, pattern: &str) -> Result<Self> {
        let set = Self::discover(root, pattern)?;
        if set.is_empty() {
            return Err(StatMergeError::empty_input(root, pattern));
        }
        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
