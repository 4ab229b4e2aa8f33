//! The mergeable exclusion-pattern collection.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;

use crate::error::Result;

/// An ordered collection of gitignore-style exclusion patterns.
///
/// Patterns can only be added, never removed: a set cloned from a parent
/// scope and extended is at least as restrictive as the parent. The raw
/// pattern list is kept alongside the compiled matcher so clones can be
/// extended and recompiled.
#[derive(Debug, Clone)]
pub struct IgnoreSet {
    patterns: Vec<String>,
    compiled: Gitignore,
}

impl IgnoreSet {
    /// Create an empty set that matches nothing.
    pub fn new() -> Self {
        Self {
            patterns: Vec::new(),
            compiled: Gitignore::empty(),
        }
    }

    /// Append patterns to the set. Blank lines and `#` comments are
    /// skipped; invalid globs surface as [`crate::ScoutError::InvalidPattern`].
    pub fn add<I, S>(&mut self, patterns: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut added = false;
        for pattern in patterns {
            let pattern = pattern.as_ref().trim();
            if pattern.is_empty() || pattern.starts_with('#') {
                continue;
            }
            self.patterns.push(pattern.to_string());
            added = true;
        }
        if added {
            self.rebuild()?;
        }
        Ok(())
    }

    fn rebuild(&mut self) -> Result<()> {
        let mut builder = GitignoreBuilder::new("");
        for pattern in &self.patterns {
            builder.add_line(None, pattern)?;
        }
        self.compiled = builder.build()?;
        Ok(())
    }

    /// Test a root-relative hint against the set.
    ///
    /// The hint uses forward slashes; a trailing `/` marks a directory.
    /// Matching is gitignore-compatible, including matches through an
    /// ignored parent (`node_modules` matches `a/node_modules/x`).
    pub fn matches(&self, hint: &str) -> bool {
        let is_dir = hint.ends_with('/');
        let path = hint.trim_end_matches('/');
        if path.is_empty() {
            return false;
        }
        self.compiled
            .matched_path_or_any_parents(Path::new(path), is_dir)
            .is_ignore()
    }

    /// Number of patterns in the set.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the set holds no patterns.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// The raw patterns, in insertion order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

impl Default for IgnoreSet {
    fn default() -> Self {
        Self::new()
    }
}
