use std::{
    ffi::{OsStr, OsString},
    iter::FusedIterator,
    os::unix::ffi::OsStrExt,
    path::{Path, PathBuf},
};

use log::debug;
use nix::{
    dir::{Dir, OwningIter},
    fcntl::OFlag,
    sys::stat::Mode,
};

use crate::error::ListError;

/// Lazy, single-pass stream of the names in one directory, in raw `readdir`
/// order. Owns the directory handle; it is closed when this is dropped.
pub struct Entries {
    dir_path: PathBuf,
    iter: OwningIter,
    show_hidden: bool,
    done: bool,
}

/// Open `dir_path` for listing.
///
/// With `show_hidden == false` every name starting with `.` is skipped,
/// which includes the `.` and `..` entries themselves.
pub fn enumerate(dir_path: &Path, show_hidden: bool) -> Result<Entries, ListError> {
    let dir = Dir::open(
        dir_path,
        OFlag::O_RDONLY | OFlag::O_DIRECTORY | OFlag::O_CLOEXEC,
        Mode::empty(),
    )
    .map_err(|source| ListError::DirAccess {
        path: dir_path.to_path_buf(),
        source,
    })?;

    debug!("[enumerate] opened {:?} (show_hidden={show_hidden})", dir_path);

    Ok(Entries {
        dir_path: dir_path.to_path_buf(),
        iter: dir.into_iter(),
        show_hidden,
        done: false,
    })
}

/// Hidden entries are those whose name starts with a dot.
pub fn is_hidden(name: &OsStr) -> bool {
    name.as_bytes().first() == Some(&b'.')
}

impl Entries {
    pub fn dir_path(&self) -> &Path {
        &self.dir_path
    }
}

impl Iterator for Entries {
    type Item = Result<OsString, ListError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let Some(res) = self.iter.next() else {
                self.done = true;
                return None;
            };

            match res {
                Ok(entry) => {
                    let name = OsStr::from_bytes(entry.file_name().to_bytes());
                    if !self.show_hidden && is_hidden(name) {
                        continue;
                    }
                    return Some(Ok(name.to_os_string()));
                }
                Err(source) => {
                    // readdir gives no guarantee about the stream after a failure
                    self.done = true;
                    return Some(Err(ListError::DirRead {
                        path: self.dir_path.clone(),
                        source,
                    }));
                }
            }
        }
    }
}

impl FusedIterator for Entries {}

#[cfg(test)]
#[path = "enumerate_tests.rs"]
mod tests;
