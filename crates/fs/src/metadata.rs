use std::{
    ffi::OsString,
    fs::{self, FileType},
    io,
    os::unix::fs::MetadataExt,
    path::Path,
};

use bitflags::bitflags;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Directory,
    /// Devices, fifos, sockets. Symlinks are followed and reported as the
    /// kind of their target.
    Other,
}

impl From<FileType> for EntryKind {
    fn from(ft: FileType) -> Self {
        if ft.is_dir() {
            EntryKind::Directory
        } else if ft.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }
}

bitflags! {
    /// Permission bits as laid out in the low nine bits of `st_mode`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Permissions: u32 {
        const OWNER_READ  = 0o400;
        const OWNER_WRITE = 0o200;
        const OWNER_EXEC  = 0o100;
        const GROUP_READ  = 0o040;
        const GROUP_WRITE = 0o020;
        const GROUP_EXEC  = 0o010;
        const OTHER_READ  = 0o004;
        const OTHER_WRITE = 0o002;
        const OTHER_EXEC  = 0o001;
    }
}

impl Permissions {
    /// Keep only the rwx bits; file type, setuid/setgid and sticky bits are dropped.
    pub fn from_mode(mode: u32) -> Self {
        Self::from_bits_truncate(mode)
    }
}

/// Snapshot of one entry, taken from a single `stat` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMetadata {
    pub kind: EntryKind,
    pub permissions: Permissions,
    /// Hard link count
    pub nlink: u64,
    pub uid: u32,
    pub gid: u32,
    /// File size in bytes
    pub size: i64,
    /// Last access time, Unix seconds
    pub atime_secs: i64,
    /// Last modification time, Unix seconds
    pub mtime_secs: i64,
    /// Name as it should be printed, raw bytes and all
    pub name: OsString,
}

impl EntryMetadata {
    /// Stat `path`, following symlinks, and label the snapshot with `name`.
    ///
    /// For directory entries `path` must be the display path (directory
    /// joined with the entry name), not the bare name.
    pub fn resolve(path: &Path, name: impl Into<OsString>) -> io::Result<Self> {
        let metadata = fs::metadata(path)?;
        Ok(Self::from_metadata(&metadata, name))
    }

    pub fn from_metadata(metadata: &fs::Metadata, name: impl Into<OsString>) -> Self {
        EntryMetadata {
            kind: metadata.file_type().into(),
            permissions: Permissions::from_mode(metadata.mode()),
            nlink: metadata.nlink(),
            uid: metadata.uid(),
            gid: metadata.gid(),
            size: i64::try_from(metadata.size()).unwrap_or(i64::MAX),
            atime_secs: metadata.atime(),
            mtime_secs: metadata.mtime(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
#[path = "metadata_tests.rs"]
mod tests;
