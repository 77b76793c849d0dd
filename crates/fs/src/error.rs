use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ListError {
    /// The target could not be stat'ed at all.
    #[error("cannot access '{}': No such file or directory", .path.display())]
    Access {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot open directory '{}': {source}", .path.display())]
    DirAccess {
        path: PathBuf,
        #[source]
        source: nix::Error,
    },

    /// `readdir` failed part way through a directory.
    #[error("error reading directory '{}': {source}", .path.display())]
    DirRead {
        path: PathBuf,
        #[source]
        source: nix::Error,
    },

    /// A single directory entry vanished or became unreadable mid-listing.
    #[error("cannot stat '{}': {source}", .path.display())]
    EntryStat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Devices, sockets, fifos and the like are not listed.
    #[error("cannot list '{}': not a regular file or directory", .path.display())]
    UnsupportedKind { path: PathBuf },

    #[error("cannot determine current directory: {0}")]
    WorkingDirectoryUnavailable(#[source] io::Error),

    #[error("failed to write listing: {0}")]
    Output(#[from] io::Error),
}

impl ListError {
    /// Whether the run may report this error and carry on with the next
    /// target (or entry).
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            ListError::WorkingDirectoryUnavailable(_) | ListError::Output(_)
        )
    }
}
