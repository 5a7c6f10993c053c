//! Pure partition planning
//!
//! Slicing a file list into manifests involves no I/O; the same inputs always
//! produce the same manifests.

use std::path::PathBuf;

/// One partition of work: an ordered list of files with a 1-based index.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    pub index: usize,
    pub files: Vec<PathBuf>,
}

impl Manifest {
    /// File name the manifest is persisted under.
    pub fn file_name(&self) -> String {
        format!("set_{}.txt", self.index)
    }

    /// One path per line, each line newline-terminated.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for file in &self.files {
            out.push_str(&file.to_string_lossy());
            out.push('\n');
        }
        out
    }
}

/// Number of files that end up in some manifest.
pub fn assigned_count(n_files: usize, sets_number: usize, set_size: usize) -> usize {
    sets_number.saturating_mul(set_size).min(n_files)
}

/// Number of manifests for the given sizes.
pub fn manifest_count(n_files: usize, sets_number: usize, set_size: usize) -> usize {
    if set_size == 0 {
        return 0;
    }
    assigned_count(n_files, sets_number, set_size).div_ceil(set_size)
}

/// Slice the first `min(sets_number * set_size, files.len())` files into
/// consecutive manifests of `set_size`, the last possibly shorter.
///
/// Order is preserved, nothing is shuffled or rebalanced. Zero sizes yield no
/// manifests; callers validate them beforehand.
pub fn plan_partitions(files: &[PathBuf], sets_number: usize, set_size: usize) -> Vec<Manifest> {
    if set_size == 0 {
        return Vec::new();
    }
    let total = assigned_count(files.len(), sets_number, set_size);

    files[..total]
        .chunks(set_size)
        .enumerate()
        .map(|(i, chunk)| Manifest {
            index: i + 1,
            files: chunk.to_vec(),
        })
        .collect()
}
