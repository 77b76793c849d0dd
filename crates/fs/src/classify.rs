use std::{fs, path::Path};

use crate::{error::ListError, metadata::EntryKind};

/// Decide how a command-line target is listed. Symlinks are followed.
pub fn classify(path: &Path) -> Result<EntryKind, ListError> {
    stat_target(path).map(|m| EntryKind::from(m.file_type()))
}

/// The one metadata query made for a command-line target. Its result both
/// classifies the target and, for files, becomes the rendered record.
pub fn stat_target(path: &Path) -> Result<fs::Metadata, ListError> {
    fs::metadata(path).map_err(|source| ListError::Access {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
