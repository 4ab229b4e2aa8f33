//! The traversal engine.
//!
//! Descent is iterative over an explicit stack of directory frames
//! rather than native recursion, so arbitrarily deep trees cannot
//! exhaust the call stack. The `Before`/`After` bracket of a directory
//! strictly contains the brackets of everything beneath it; that nesting
//! is what lets [`crate::plugins::ScopePlugin`] treat `Before`/`After`
//! as push/pop.

mod entry;

pub use entry::{DirEntryInfo, EntryKind, TraversalEntry};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::{Result, ScoutError};
use crate::event::{DirEvent, EntryEvent, Event};
use crate::host::PluginHost;
use crate::paths;

/// How the walker reacts when a subdirectory cannot be read.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorPolicy {
    /// Warn and continue with the unreadable subtree pruned (default).
    #[default]
    SkipSubtree,
    /// Unwind the event brackets and fail the run.
    Abort,
}

/// One in-flight directory during traversal.
struct Frame {
    path: PathBuf,
    listing: Vec<DirEntryInfo>,
    cursor: usize,
    /// Index of this directory's entry in its parent's listing; `None`
    /// for the walk root.
    parent_index: Option<usize>,
}

/// The recursive-descent engine.
///
/// For each directory: read and sort the listing, publish `Before`, then
/// per entry either `Skip` (pruned), `BeforeDir`/descend/`AfterDir`, or
/// `BeforeFile`/`AfterFile`, and finally publish `After`. The active
/// ignore set is re-read from the shared context after `Before` and
/// before every entry, which is how scope derivation takes effect.
pub struct Walker {
    policy: ErrorPolicy,
}

impl Walker {
    pub fn new() -> Self {
        Self {
            policy: ErrorPolicy::default(),
        }
    }

    /// Set the behavior for unreadable subdirectories.
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Traverse `dir`, appending accepted entries to `output` in visit
    /// order and publishing lifecycle events through `host`.
    ///
    /// An unreadable root always fails; unreadable subdirectories follow
    /// the configured [`ErrorPolicy`]. Entries appended before a failure
    /// are retained either way.
    pub fn walk(
        &self,
        dir: &Path,
        output: &mut Vec<TraversalEntry>,
        host: &mut PluginHost,
    ) -> Result<()> {
        let root = host.context().root_dir.clone();

        let listing = read_listing(dir).map_err(|source| ScoutError::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        })?;
        host.emit(Event::Before(DirEvent {
            path: dir,
            listing: &listing,
            root: &root,
        }))?;
        let mut stack = vec![Frame {
            path: dir.to_path_buf(),
            listing,
            cursor: 0,
            parent_index: None,
        }];

        while !stack.is_empty() {
            let top = stack.len() - 1;
            if stack[top].cursor >= stack[top].listing.len() {
                close_frame(&mut stack, host, &root)?;
                continue;
            }
            let index = stack[top].cursor;
            stack[top].cursor += 1;

            let frame = &stack[top];
            let entry = &frame.listing[index];
            let full_path = frame.path.join(&entry.name);
            let is_dir = entry.is_dir();

            let rel = paths::root_relative(&root, &full_path);
            let hint = if is_dir { format!("{rel}/") } else { rel };

            let event = EntryEvent {
                dir: &frame.path,
                path: &full_path,
                entry,
                listing: &frame.listing,
                root: &root,
            };

            if host.context().ignore.matches(&hint) {
                host.emit(Event::Skip(event))?;
                continue;
            }

            if !is_dir {
                host.emit(Event::BeforeFile(event))?;
                output.push(TraversalEntry {
                    path: full_path.clone(),
                    parent: frame.path.clone(),
                    kind: EntryKind::File,
                });
                host.emit(Event::AfterFile(event))?;
                continue;
            }

            host.emit(Event::BeforeDir(event))?;
            output.push(TraversalEntry {
                path: full_path.clone(),
                parent: frame.path.clone(),
                kind: EntryKind::Directory,
            });
            match read_listing(&full_path) {
                Ok(child_listing) => {
                    host.emit(Event::Before(DirEvent {
                        path: &full_path,
                        listing: &child_listing,
                        root: &root,
                    }))?;
                    stack.push(Frame {
                        path: full_path,
                        listing: child_listing,
                        cursor: 0,
                        parent_index: Some(index),
                    });
                }
                Err(source) => {
                    // The directory never got a `Before`, so no `After`
                    // is owed; its entry bracket still closes.
                    host.emit(Event::AfterDir(event))?;
                    match self.policy {
                        ErrorPolicy::SkipSubtree => {
                            warn!(
                                path = %full_path.display(),
                                error = %source,
                                "unreadable directory, skipping subtree"
                            );
                        }
                        ErrorPolicy::Abort => {
                            unwind(&mut stack, host, &root);
                            return Err(ScoutError::DirectoryRead {
                                path: full_path,
                                source,
                            });
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for Walker {
    fn default() -> Self {
        Self::new()
    }
}

/// Pop the top frame, publishing its `After` and, unless it is the walk
/// root, the `AfterDir` of its entry in the parent.
fn close_frame(stack: &mut Vec<Frame>, host: &mut PluginHost, root: &Path) -> Result<()> {
    let Some(frame) = stack.pop() else {
        return Ok(());
    };
    host.emit(Event::After(DirEvent {
        path: &frame.path,
        listing: &frame.listing,
        root,
    }))?;
    if let Some(index) = frame.parent_index
        && let Some(parent) = stack.last()
    {
        host.emit(Event::AfterDir(EntryEvent {
            dir: &parent.path,
            path: &frame.path,
            entry: &parent.listing[index],
            listing: &parent.listing,
            root,
        }))?;
    }
    Ok(())
}

/// Close every remaining frame so plugin scope stacks unwind balanced
/// before an abort. Secondary handler failures are logged, not raised.
fn unwind(stack: &mut Vec<Frame>, host: &mut PluginHost, root: &Path) {
    while !stack.is_empty() {
        if let Err(error) = close_frame(stack, host, root) {
            warn!(%error, "handler failed while unwinding after a traversal error");
        }
    }
}

/// Read a directory's immediate entries, keeping only directories and
/// regular files, sorted by name for deterministic traversal order.
fn read_listing(dir: &Path) -> io::Result<Vec<DirEntryInfo>> {
    let mut listing = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let kind = if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            continue;
        };
        listing.push(DirEntryInfo {
            name: entry.file_name(),
            kind,
        });
    }
    listing.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(listing)
}
