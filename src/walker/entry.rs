//! Directory-entry metadata shared by the walker, events, and plugins.

use std::ffi::OsString;
use std::path::PathBuf;

/// Whether a traversal entry is a directory or a regular file. Other
/// entry kinds (symlinks, sockets, devices) are never surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

impl EntryKind {
    pub fn is_dir(self) -> bool {
        matches!(self, Self::Directory)
    }
}

/// One entry of a directory listing, as handed to plugins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    /// The entry's file name, without any path component.
    pub name: OsString,
    pub kind: EntryKind,
}

impl DirEntryInfo {
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    pub fn is_file(&self) -> bool {
        !self.kind.is_dir()
    }
}

/// An accepted entry in the traversal output, never mutated after
/// creation. Output order is pre-order: directories before their
/// contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalEntry {
    /// Full path of the entry.
    pub path: PathBuf,
    /// The directory that contained the entry.
    pub parent: PathBuf,
    pub kind: EntryKind,
}
