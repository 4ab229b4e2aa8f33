//! The traversal lifecycle-event vocabulary.
//!
//! Events form a closed set: the engine publishes a `Before`/`After`
//! bracket per directory, one of `Skip`, `BeforeDir`/`AfterDir`, or
//! `BeforeFile`/`AfterFile` per entry, and the host can raise `Log` on
//! demand. Plugins receive them through the typed methods of
//! [`crate::host::Plugin`], so there is no stringly-typed dispatch.

use std::path::Path;

use crate::walker::DirEntryInfo;

/// Identifies one kind of lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A directory's listing has been read; its entries are about to be
    /// evaluated.
    Before,
    /// A directory's subtree has been fully traversed.
    After,
    /// An entry matched the active ignore set and is pruned.
    Skip,
    /// A directory entry was accepted; descent follows.
    BeforeDir,
    /// A directory entry's subtree finished.
    AfterDir,
    /// A file entry was accepted.
    BeforeFile,
    /// A file entry has been recorded.
    AfterFile,
    /// Host-initiated, not tied to any path; lets plugins print summaries.
    Log,
}

impl EventKind {
    /// Get the event name used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
            Self::Skip => "skip",
            Self::BeforeDir => "before_dir",
            Self::AfterDir => "after_dir",
            Self::BeforeFile => "before_file",
            Self::AfterFile => "after_file",
            Self::Log => "log",
        }
    }
}

/// Payload for the directory-level `Before` and `After` events.
#[derive(Debug, Clone, Copy)]
pub struct DirEvent<'a> {
    /// The directory being entered or left.
    pub path: &'a Path,
    /// The directory's immediate entries, in traversal order.
    pub listing: &'a [DirEntryInfo],
    /// The traversal root.
    pub root: &'a Path,
}

/// Payload for the per-entry events (`Skip`, `BeforeDir`, `AfterDir`,
/// `BeforeFile`, `AfterFile`).
#[derive(Debug, Clone, Copy)]
pub struct EntryEvent<'a> {
    /// The directory containing the entry.
    pub dir: &'a Path,
    /// The entry's full path.
    pub path: &'a Path,
    /// The entry under evaluation.
    pub entry: &'a DirEntryInfo,
    /// The containing directory's full listing.
    pub listing: &'a [DirEntryInfo],
    /// The traversal root.
    pub root: &'a Path,
}

/// A lifecycle event with its payload, as dispatched to plugins.
#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    Before(DirEvent<'a>),
    After(DirEvent<'a>),
    Skip(EntryEvent<'a>),
    BeforeDir(EntryEvent<'a>),
    AfterDir(EntryEvent<'a>),
    BeforeFile(EntryEvent<'a>),
    AfterFile(EntryEvent<'a>),
    Log,
}

impl Event<'_> {
    /// The kind tag of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Before(_) => EventKind::Before,
            Self::After(_) => EventKind::After,
            Self::Skip(_) => EventKind::Skip,
            Self::BeforeDir(_) => EventKind::BeforeDir,
            Self::AfterDir(_) => EventKind::AfterDir,
            Self::BeforeFile(_) => EventKind::BeforeFile,
            Self::AfterFile(_) => EventKind::AfterFile,
            Self::Log => EventKind::Log,
        }
    }
}
