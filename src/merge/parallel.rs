//! Parallel merge
//!
//! Because combination is associative and commutative, the fold over the
//! non-schema artifacts can be split into contiguous chunks. Each chunk folds
//! into an empty copy of the template on a blocking task; the partial results
//! are then joined into the schema template one at a time, in chunk order.

use super::accumulator::{fold_artifacts, MergeState};
use super::schema::Template;
use crate::config::MergeConfig;
use crate::error::{Result, StatMergeError};
use futures::future::join_all;
use indicatif::ProgressBar;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Split `len` items into at most `jobs` contiguous, near-equal ranges.
pub fn chunk_bounds(len: usize, jobs: usize) -> Vec<(usize, usize)> {
    if len == 0 || jobs == 0 {
        return Vec::new();
    }
    let chunk = len.div_ceil(jobs.min(len));
    (0..len)
        .step_by(chunk)
        .map(|start| (start, (start + chunk).min(len)))
        .collect()
}

/// Merge `rest` into `schema` using up to `jobs` workers.
///
/// `rest` excludes the schema source, which counts as file 1 of `total` for
/// progress purposes.
pub async fn merge_parallel(
    schema: Template,
    rest: Vec<PathBuf>,
    settings: &MergeConfig,
    jobs: usize,
    progress: &ProgressBar,
) -> Result<MergeState> {
    let total = rest.len() + 1;
    let bounds = chunk_bounds(rest.len(), jobs);
    debug!("Merging {} artifact(s) in {} chunk(s)", rest.len(), bounds.len());

    let handles = bounds.iter().map(|&(start, end)| {
        let partial = MergeState::new(schema.empty_like());
        let chunk = rest[start..end].to_vec();
        let settings = settings.clone();
        let progress = progress.clone();
        tokio::task::spawn_blocking(move || {
            fold_artifacts(partial, &chunk, &settings, start + 2, total, &progress)
        })
    });
    let partials = join_all(handles).await;

    let mut state = MergeState::new(schema);
    for (&(start, end), partial) in bounds.iter().zip(partials) {
        let partial = partial
            .map_err(|e| StatMergeError::other(format!("Merge worker failed: {}", e)))?;
        if let Err(e) = state.join(partial) {
            warn!("{}; merging files {}..{} again in order", e, start + 2, end + 1);
            state = fold_artifacts(
                state,
                &rest[start..end],
                settings,
                start + 2,
                total,
                &ProgressBar::hidden(),
            );
        }
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_bounds_cover_everything_once() {
        for len in 0..20 {
            for jobs in 1..8 {
                let bounds = chunk_bounds(len, jobs);
                assert!(bounds.len() <= jobs);
                let mut next = 0;
                for (start, end) in &bounds {
                    assert_eq!(*start, next);
                    assert!(end > start);
                    next = *end;
                }
                assert_eq!(next, len);
            }
        }
    }

    #[test]
    fn test_more_jobs_than_files() {
        assert_eq!(chunk_bounds(3, 10), vec![(0, 1), (1, 2), (2, 3)]);
        assert!(chunk_bounds(0, 4).is_empty());
    }
}
