//! Merge accumulator
//!
//! The merge is an explicit left fold. Each artifact is staged on its own:
//! read, looked up and checked against the template, then released. A staged
//! artifact is applied to the template in one step; an artifact that fails at
//! any point is counted and skipped, and never touches the template.

use super::schema::Template;
use crate::artifact::{decode_object, Artifact};
use crate::config::MergeConfig;
use crate::error::{ErrorCode, StatMergeError};
use crate::objects::StatObject;
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// An artifact whose objects have all been read and checked against the
/// template.
#[derive(Debug)]
pub struct StagedArtifact {
    pub path: PathBuf,
    objects: Vec<(String, StatObject)>,
}

/// Result of staging one artifact: ready to apply, or skipped.
pub type ArtifactOutcome = Result<StagedArtifact, StatMergeError>;

/// An artifact left out of the merge, with the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedArtifact {
    pub path: PathBuf,
    pub reason: String,
}

/// Accumulator state threaded through the fold.
#[derive(Debug, Clone)]
pub struct MergeState {
    pub template: Template,
    pub error_count: usize,
    pub merged: usize,
    pub skipped: Vec<SkippedArtifact>,
}

impl MergeState {
    pub fn new(template: Template) -> Self {
        Self {
            template,
            error_count: 0,
            merged: 0,
            skipped: Vec::new(),
        }
    }

    /// Apply one staging outcome and return the updated state.
    pub fn step(mut self, outcome: ArtifactOutcome) -> Self {
        match outcome.and_then(|staged| self.apply(staged)) {
            Ok(()) => self.merged += 1,
            Err(err) => {
                self.error_count += 1;
                warn!("{}", err.user_message());
                warn!("Error counter : {}", self.error_count);
                let path = match &err {
                    StatMergeError::ArtifactMerge { path, .. } => path.clone(),
                    _ => PathBuf::new(),
                };
                self.skipped.push(SkippedArtifact {
                    path,
                    reason: err.to_string(),
                });
            }
        }
        self
    }

    /// Combine a staged artifact into the template, all or nothing.
    fn apply(&mut self, staged: StagedArtifact) -> Result<(), StatMergeError> {
        let fail = |name: &str, message: String| {
            StatMergeError::artifact_merge(
                ErrorCode::ARTIFACT_INCOMPATIBLE,
                &staged.path,
                format!("object '{}': {}", name, message),
            )
        };

        for (name, object) in &staged.objects {
            let target = self
                .template
                .get(name)
                .ok_or_else(|| fail(name, "not in template".to_string()))?;
            target
                .check_compatible(object)
                .map_err(|e| fail(name, e.to_string()))?;
        }
        for (name, object) in &staged.objects {
            if let Some(target) = self.template.get_mut(name) {
                target
                    .combine(object)
                    .map_err(|e| fail(name, e.to_string()))?;
            }
        }
        Ok(())
    }

    /// Add the outcome of another, disjoint fold over the same template.
    ///
    /// On error `self` is unchanged.
    pub fn join(&mut self, other: MergeState) -> Result<(), StatMergeError> {
        self.template
            .absorb(&other.template)
            .map_err(|e| StatMergeError::other(format!("Cannot combine partial results: {}", e)))?;
        self.error_count += other.error_count;
        self.merged += other.merged;
        self.skipped.extend(other.skipped);
        Ok(())
    }
}

/// Read one artifact and check every template object against it.
///
/// The artifact file is closed and its parsed form dropped before returning.
pub fn stage_artifact(template: &Template, path: &Path, settings: &MergeConfig) -> ArtifactOutcome {
    let fail = |code, message: String| StatMergeError::artifact_merge(code, path, message);

    let artifact =
        Artifact::read(path).map_err(|e| fail(ErrorCode::ARTIFACT_UNREADABLE, e.to_string()))?;
    let mut directory = artifact
        .into_directory(template.directory())
        .map_err(|e| fail(ErrorCode::ARTIFACT_MISSING_DIRECTORY, e.to_string()))?;

    let mut objects = Vec::with_capacity(template.len());
    for (name, target) in template.objects() {
        let raw = directory.remove(name).ok_or_else(|| {
            fail(
                ErrorCode::ARTIFACT_MISSING_OBJECT,
                format!("object '{}' not found", name),
            )
        })?;
        let object = decode_object(name, raw, &settings.efficiency_prefix)
            .and_then(|object| target.check_compatible(&object).map(|_| object))
            .map_err(|e| {
                fail(
                    ErrorCode::ARTIFACT_INCOMPATIBLE,
                    format!("object '{}': {}", name, e),
                )
            })?;
        objects.push((name.clone(), object));
    }

    Ok(StagedArtifact {
        path: path.to_path_buf(),
        objects,
    })
}

/// Fold `paths` into `state` in order.
///
/// `first_index` is the 1-based position of `paths[0]` among all `total`
/// files, used for progress reporting only.
pub fn fold_artifacts(
    state: MergeState,
    paths: &[PathBuf],
    settings: &MergeConfig,
    first_index: usize,
    total: usize,
    progress: &ProgressBar,
) -> MergeState {
    paths
        .iter()
        .enumerate()
        .fold(state, |state, (offset, path)| {
            debug!("{}/{} {}", first_index + offset, total, path.display());
            let outcome = stage_artifact(&state.template, path, settings);
            progress.inc(1);
            state.step(outcome)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::RawObject;
    use crate::objects::Axis;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn settings() -> MergeConfig {
        MergeConfig {
            stats_directory: "stats".to_string(),
            ..MergeConfig::default()
        }
    }

    fn axis() -> Axis {
        Axis::new(3, 0.0, 3.0)
    }

    fn write(dir: &Path, name: &str, contents: Vec<f64>, passed: u64, total: u64) -> PathBuf {
        let mut artifact = Artifact::new();
        artifact.insert(
            "stats",
            "TOT",
            RawObject {
                axes: vec![axis()],
                contents,
                ..RawObject::default()
            },
        );
        artifact.insert(
            "stats",
            "effAll",
            RawObject {
                axes: vec![Axis::new(1, 0.0, 1.0)],
                passed: vec![passed],
                total: vec![total],
                ..RawObject::default()
            },
        );
        let path = dir.join(name);
        artifact.write(&path).unwrap();
        path
    }

    fn template() -> Template {
        let mut objects = BTreeMap::new();
        let tot = crate::objects::Histogram::new_1d("", axis());
        objects.insert("TOT".to_string(), StatObject::Histogram1D(tot));
        let eff = crate::objects::Efficiency::new("", Axis::new(1, 0.0, 1.0));
        objects.insert("effAll".to_string(), StatObject::EfficiencyCurve(eff));
        Template::new("stats", objects)
    }

    fn contents(state: &MergeState) -> Vec<f64> {
        state
            .template
            .get("TOT")
            .unwrap()
            .as_histogram()
            .unwrap()
            .contents
            .clone()
    }

    #[test]
    fn test_fold_sums_histograms_and_efficiencies() {
        let dir = TempDir::new().unwrap();
        let paths = vec![
            write(dir.path(), "a.json", vec![1.0, 0.0, 2.0], 2, 10),
            write(dir.path(), "b.json", vec![0.0, 3.0, 1.0], 3, 10),
            write(dir.path(), "c.json", vec![1.0, 1.0, 1.0], 5, 20),
        ];

        let state = fold_artifacts(
            MergeState::new(template()),
            &paths,
            &settings(),
            1,
            3,
            &ProgressBar::hidden(),
        );

        assert_eq!(state.error_count, 0);
        assert_eq!(state.merged, 3);
        assert_eq!(contents(&state), vec![2.0, 4.0, 4.0]);
        let eff = state.template.get("effAll").unwrap().as_efficiency().unwrap();
        assert_eq!((eff.passed[0], eff.total[0]), (10, 40));
        assert!((eff.ratio(0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_corrupt_artifact_is_counted_and_skipped() {
        let dir = TempDir::new().unwrap();
        let corrupt = dir.path().join("b.json");
        std::fs::write(&corrupt, "{\"directories\": {\"stats\": {\"TOT\": {\"axes\": [").unwrap();
        let paths = vec![
            write(dir.path(), "a.json", vec![1.0, 0.0, 0.0], 1, 1),
            corrupt.clone(),
            write(dir.path(), "c.json", vec![0.0, 0.0, 1.0], 0, 1),
        ];

        let state = fold_artifacts(
            MergeState::new(template()),
            &paths,
            &settings(),
            2,
            4,
            &ProgressBar::hidden(),
        );

        assert_eq!(state.error_count, 1);
        assert_eq!(state.merged, 2);
        assert_eq!(state.skipped[0].path, corrupt);
        assert_eq!(contents(&state), vec![1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_missing_object_never_partially_applies() {
        let dir = TempDir::new().unwrap();
        let mut artifact = Artifact::new();
        // TOT is present and valid, effAll is absent.
        artifact.insert(
            "stats",
            "TOT",
            RawObject {
                axes: vec![axis()],
                contents: vec![5.0, 5.0, 5.0],
                ..RawObject::default()
            },
        );
        let path = dir.path().join("partial.json");
        artifact.write(&path).unwrap();

        let outcome = stage_artifact(&template(), &path, &settings());
        let err = outcome.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ARTIFACT_MISSING_OBJECT);

        let state = MergeState::new(template()).step(Err(err));
        assert_eq!(contents(&state), vec![0.0, 0.0, 0.0]);
        assert_eq!(state.error_count, 1);
    }

    #[test]
    fn test_incompatible_binning_is_skipped() {
        let dir = TempDir::new().unwrap();
        let mut artifact = Artifact::new();
        artifact.insert(
            "stats",
            "TOT",
            RawObject {
                axes: vec![Axis::new(4, 0.0, 3.0)],
                contents: vec![1.0; 4],
                ..RawObject::default()
            },
        );
        artifact.insert(
            "stats",
            "effAll",
            RawObject {
                axes: vec![Axis::new(1, 0.0, 1.0)],
                passed: vec![0],
                total: vec![0],
                ..RawObject::default()
            },
        );
        let path = dir.path().join("rebinned.json");
        artifact.write(&path).unwrap();

        let err = stage_artifact(&template(), &path, &settings()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ARTIFACT_INCOMPATIBLE);
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_missing_directory_and_missing_file() {
        let dir = TempDir::new().unwrap();
        let empty = dir.path().join("empty.json");
        Artifact::new().write(&empty).unwrap();

        let err = stage_artifact(&template(), &empty, &settings()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ARTIFACT_MISSING_DIRECTORY);

        let err = stage_artifact(&template(), &dir.path().join("gone.json"), &settings())
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ARTIFACT_UNREADABLE);
    }

    #[test]
    fn test_extra_objects_are_ignored() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "a.json", vec![1.0, 1.0, 1.0], 1, 2);
        let mut artifact = Artifact::read(&path).unwrap();
        artifact.insert(
            "stats",
            "NotInTemplate",
            RawObject {
                axes: vec![axis()],
                contents: vec![9.0; 3],
                ..RawObject::default()
            },
        );
        artifact.write(&path).unwrap();

        let staged = stage_artifact(&template(), &path, &settings()).unwrap();
        let state = MergeState::new(template()).step(Ok(staged));
        assert_eq!(state.template.len(), 2);
        assert!(state.template.get("NotInTemplate").is_none());
    }

    #[test]
    fn test_counter_overflow_is_counted_and_skipped() {
        let dir = TempDir::new().unwrap();
        let first = write(dir.path(), "a.json", vec![1.0, 0.0, 0.0], 0, u64::MAX);
        let second = write(dir.path(), "b.json", vec![0.0, 1.0, 0.0], 1, 1);

        let state = MergeState::new(template());
        let state = fold_artifacts(
            state,
            &[first, second.clone()],
            &settings(),
            2,
            3,
            &ProgressBar::hidden(),
        );

        assert_eq!(state.merged, 1);
        assert_eq!(state.error_count, 1);
        assert_eq!(state.skipped[0].path, second);
        assert_eq!(contents(&state), vec![1.0, 0.0, 0.0]);
        let eff = state.template.get("effAll").unwrap().as_efficiency().unwrap();
        assert_eq!(eff.total, vec![u64::MAX]);
    }

    #[test]
    fn test_staged_against_another_template_is_not_applied() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "a.json", vec![1.0, 1.0, 1.0], 0, u64::MAX);
        let staged = stage_artifact(&template(), &path, &settings());

        // The target already holds counts the staged artifact cannot be added to.
        let mut full = MergeState::new(template());
        full = full.step(stage_artifact(&template(), &path, &settings()));
        let state = full.step(staged);

        assert_eq!(state.merged, 1);
        assert_eq!(state.error_count, 1);
        assert_eq!(contents(&state), vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_join_adds_counters() {
        let dir = TempDir::new().unwrap();
        let good = write(dir.path(), "a.json", vec![1.0, 2.0, 3.0], 1, 1);

        let left = MergeState::new(template()).step(stage_artifact(&template(), &good, &settings()));
        let right = MergeState::new(template())
            .step(stage_artifact(&template(), &dir.path().join("x.json"), &settings()));

        let mut joined = left;
        joined.join(right).unwrap();
        assert_eq!(joined.error_count, 1);
        assert_eq!(joined.merged, 1);
        assert_eq!(contents(&joined), vec![1.0, 2.0, 3.0]);
    }
}
