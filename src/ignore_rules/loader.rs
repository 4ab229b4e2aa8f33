//! Discovery and layering of `.file_ignore` rule files.
//!
//! One candidate file per ancestor directory of the start dir, plus a
//! user-global file under `~/.fscout/`. Layering order is global first,
//! then outermost ancestor down to the start directory, so the most
//! specific rules are appended last.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::IgnoreSet;
use crate::error::{Result, ScoutError};

/// File name of an exclusion-rule file, at any level.
pub const IGNORE_FILE_NAME: &str = ".file_ignore";

/// Directory under the user's home holding fscout's own files.
pub const APP_CONFIG_DIR: &str = ".fscout";

/// Collect `.file_ignore` candidates from `start_dir` up to the
/// filesystem root, closest-first.
fn collect_ancestor_files(start_dir: &Path) -> Vec<PathBuf> {
    start_dir
        .ancestors()
        .map(|dir| dir.join(IGNORE_FILE_NAME))
        .filter(|file| file.is_file())
        .collect()
}

/// Find every rule file that applies to a walk starting at `start_dir`,
/// in load order: user-global first, then outermost ancestor down to the
/// start directory.
pub fn find_ignore_files(start_dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Some(home) = dirs::home_dir() {
        let global = home.join(APP_CONFIG_DIR).join(IGNORE_FILE_NAME);
        if global.is_file() {
            files.push(global);
        }
    }
    let mut ancestors = collect_ancestor_files(start_dir);
    ancestors.reverse();
    files.extend(ancestors);
    files
}

/// Merge the given rule files, in order, into one [`IgnoreSet`].
pub fn load_ignore_files(files: &[PathBuf]) -> Result<IgnoreSet> {
    let mut set = IgnoreSet::new();
    for file in files {
        let content =
            fs::read_to_string(file).map_err(|source| ScoutError::read_error(file, source))?;
        set.add(content.lines())?;
        debug!(file = %file.display(), patterns = set.len(), "loaded ignore rules");
    }
    Ok(set)
}

/// Build the base ignore set for a walk starting at `start_dir`.
///
/// Invoked once before a walk begins; the walk itself only narrows this
/// set through scope derivation.
pub fn load_ignore(start_dir: &Path) -> Result<IgnoreSet> {
    let start = start_dir
        .canonicalize()
        .unwrap_or_else(|_| start_dir.to_path_buf());
    load_ignore_files(&find_ignore_files(&start))
}
