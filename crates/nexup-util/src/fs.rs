use std::path::{Path, PathBuf};

use crate::errors::NexusError;

/// Read a whole artifact file into memory.
///
/// The path is kept in the error so a failed read can be told apart from a
/// failed upload.
pub fn read_file(path: &Path) -> Result<Vec<u8>, NexusError> {
    std::fs::read(path).map_err(|source| NexusError::ReadArtifact {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve `path` against `base` unless it is already absolute.
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
