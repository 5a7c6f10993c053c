//! Result writer

use super::schema::Template;
use crate::artifact::{encode_object, Artifact};
use crate::error::{ErrorCode, Result, StatMergeError};
use std::path::{Path, PathBuf};
use tracing::info;

/// Write every template object under its own name into
/// `output_dir/output_name`, replacing any existing file.
///
/// The output is a regular artifact with the template's directory, so it can
/// be merged again or handed to the stats extractor. Writing is best effort:
/// a failure part-way may leave a truncated file behind.
pub fn write_result(template: &Template, output_dir: &Path, output_name: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir).map_err(|e| {
        StatMergeError::output_write(ErrorCode::OUTPUT_CREATE_DIR_FAILED, output_dir, e.to_string())
            .with_source(e)
    })?;

    let path = output_dir.join(output_name);
    info!("Saving results to {}", path.display());

    let mut artifact = Artifact::new();
    for (name, object) in template.objects() {
        artifact.insert(template.directory(), name.clone(), encode_object(object));
    }
    artifact.write(&path).map_err(|e| {
        StatMergeError::output_write(ErrorCode::OUTPUT_WRITE_FAILED, &path, e.to_string())
            .with_source(e)
    })?;
    Ok(path)
}
