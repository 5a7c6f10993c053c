//! Schema discovery
//!
//! The first artifact of the file set defines which objects are merged. Its
//! objects are decoded into owned values and become the accumulator template;
//! the names never change afterwards.

use crate::artifact::{decode_object, Artifact};
use crate::config::MergeConfig;
use crate::error::{ErrorCode, Result, StatMergeError};
use crate::objects::{CombineError, StatKind, StatObject};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Owned, mutable collection of objects being merged, keyed by name.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    directory: String,
    objects: BTreeMap<String, StatObject>,
}

impl Template {
    pub fn new(directory: impl Into<String>, objects: BTreeMap<String, StatObject>) -> Self {
        Self {
            directory: directory.into(),
            objects,
        }
    }

    /// Directory the objects are read from and written to.
    pub fn directory(&self) -> &str {
        &self.directory
    }

    pub fn objects(&self) -> &BTreeMap<String, StatObject> {
        &self.objects
    }

    pub fn get(&self, name: &str) -> Option<&StatObject> {
        self.objects.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.objects.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn count_kind(&self, kind: StatKind) -> usize {
        self.objects.values().filter(|o| o.kind() == kind).count()
    }

    /// Same names and binning, zero payloads.
    pub fn empty_like(&self) -> Self {
        Self {
            directory: self.directory.clone(),
            objects: self
                .objects
                .iter()
                .map(|(name, object)| (name.clone(), object.empty_like()))
                .collect(),
        }
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut StatObject> {
        self.objects.get_mut(name)
    }

    /// Fold another template with the same names into this one.
    ///
    /// Every pair is checked before anything is combined, so on error `self`
    /// is unchanged.
    pub fn absorb(&mut self, other: &Template) -> std::result::Result<(), CombineError> {
        for (name, object) in &self.objects {
            let theirs = other
                .objects
                .get(name)
                .ok_or_else(|| CombineError::Malformed(format!("object '{}' missing", name)))?;
            object.check_compatible(theirs)?;
        }
        for (name, object) in self.objects.iter_mut() {
            if let Some(theirs) = other.objects.get(name) {
                object.combine(theirs)?;
            }
        }
        Ok(())
    }
}

/// Load the schema source and build the template from its objects.
///
/// Any failure here is fatal for the whole merge.
pub fn discover_schema(path: &Path, settings: &MergeConfig) -> Result<Template> {
    debug!("Reading schema source {}", path.display());

    let artifact = Artifact::read(path).map_err(|e| {
        StatMergeError::schema_load(ErrorCode::SCHEMA_UNREADABLE, path, e.to_string()).with_source(e)
    })?;
    let directory = artifact
        .into_directory(&settings.stats_directory)
        .map_err(|e| {
            StatMergeError::schema_load(ErrorCode::SCHEMA_MISSING_DIRECTORY, path, e.to_string())
        })?;

    let mut objects = BTreeMap::new();
    for (name, raw) in directory {
        let object = decode_object(&name, raw, &settings.efficiency_prefix).map_err(|e| {
            StatMergeError::schema_load(
                ErrorCode::SCHEMA_MALFORMED_OBJECT,
                path,
                format!("object '{}': {}", name, e),
            )
        })?;
        objects.insert(name, object);
    }

    let template = Template::new(settings.stats_directory.clone(), objects);
    info!(
        "Schema from {}: {} object(s) ({} 1D, {} 2D, {} efficiency)",
        path.display(),
        template.len(),
        template.count_kind(StatKind::Histogram1D),
        template.count_kind(StatKind::Histogram2D),
        template.count_kind(StatKind::EfficiencyCurve)
    );
    Ok(template)
}
