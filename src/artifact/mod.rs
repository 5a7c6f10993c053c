//! Artifact files
//!
//! An artifact is a UTF-8 JSON document holding named directories, each a
//! map from object name to a stored object. Per-partition processing writes
//! one artifact per partition; the merge writes one more.
//!
//! Reading an artifact yields fully owned values. Nothing decoded from a file
//! refers back to it once [`Artifact::read`] returns.

pub mod codec;

pub use codec::{decode_object, encode_object, RawObject};

use crate::objects::CombineError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Objects stored in one directory, by name.
pub type Directory = BTreeMap<String, RawObject>;

/// Errors raised while reading or writing artifacts
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("directory '{0}' not found")]
    MissingDirectory(String),

    #[error("object '{0}' not found")]
    MissingObject(String),

    #[error("object '{name}': {source}")]
    Object {
        name: String,
        #[source]
        source: CombineError,
    },
}

/// A parsed artifact file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    #[serde(default)]
    pub directories: BTreeMap<String, Directory>,
}

impl Artifact {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and parse an artifact file.
    pub fn read(path: &Path) -> Result<Self, ArtifactError> {
        let file = File::open(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| ArtifactError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Create or truncate `path` and write the artifact to it.
    pub fn write(&self, path: &Path) -> Result<(), ArtifactError> {
        let io_err = |source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self).map_err(|source| ArtifactError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        writer.flush().map_err(io_err)
    }

    pub fn directory(&self, name: &str) -> Result<&Directory, ArtifactError> {
        self.directories
            .get(name)
            .ok_or_else(|| ArtifactError::MissingDirectory(name.to_string()))
    }

    /// Take ownership of one directory, dropping the rest.
    pub fn into_directory(mut self, name: &str) -> Result<Directory, ArtifactError> {
        self.directories
            .remove(name)
            .ok_or_else(|| ArtifactError::MissingDirectory(name.to_string()))
    }

    pub fn insert(&mut self, directory: &str, name: impl Into<String>, object: RawObject) {
        self.directories
            .entry(directory.to_string())
            .or_default()
            .insert(name.into(), object);
    }
}
