//! File-name matching over the traversal output.
//!
//! A query is either empty (match everything), a `/pattern/flags` form
//! compiled as a regex, or a case-insensitive substring. Both tests run
//! against the entry's basename only; the matcher is applied after a
//! walk and never influences which directories are descended into.

use regex::{Regex, RegexBuilder};
use std::path::Path;

use crate::error::{Result, ScoutError};

#[derive(Debug, Clone)]
enum MatcherKind {
    All,
    Substring(String),
    Regex(Regex),
}

/// A compiled file-name predicate.
#[derive(Debug, Clone)]
pub struct NameMatcher {
    kind: MatcherKind,
}

impl NameMatcher {
    /// Compile a query. Invalid regexes and unknown flags fail here,
    /// before any traversal starts.
    pub fn compile(query: &str) -> Result<Self> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Self {
                kind: MatcherKind::All,
            });
        }
        if let Some(rest) = query.strip_prefix('/')
            && let Some(split) = rest.rfind('/')
        {
            let pattern = &rest[..split];
            let flags = &rest[split + 1..];
            let regex = build_regex(query, pattern, flags)?;
            return Ok(Self {
                kind: MatcherKind::Regex(regex),
            });
        }
        Ok(Self {
            kind: MatcherKind::Substring(query.to_lowercase()),
        })
    }

    /// Test a path's basename against the query.
    pub fn matches(&self, path: &Path) -> bool {
        match &self.kind {
            MatcherKind::All => true,
            MatcherKind::Substring(query) => basename(path).to_lowercase().contains(query),
            MatcherKind::Regex(regex) => regex.is_match(&basename(path)),
        }
    }

    /// Whether this matcher accepts every path.
    pub fn is_match_all(&self) -> bool {
        matches!(self.kind, MatcherKind::All)
    }
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn build_regex(query: &str, pattern: &str, flags: &str) -> Result<Regex> {
    let mut builder = RegexBuilder::new(pattern);
    for flag in flags.chars() {
        match flag {
            'i' => builder.case_insensitive(true),
            'm' => builder.multi_line(true),
            's' => builder.dot_matches_new_line(true),
            'x' => builder.ignore_whitespace(true),
            'U' => builder.swap_greed(true),
            // Implied by the regex crate; accepted for familiarity.
            'g' | 'u' => &mut builder,
            other => {
                return Err(ScoutError::Query {
                    query: query.to_string(),
                    message: format!("unknown regex flag `{other}`"),
                });
            }
        };
    }
    Ok(builder.build()?)
}
