//! Path helpers shared by the walker and the scope policy.

use std::path::Path;

/// Compute `path` relative to `root` in forward-slash form.
///
/// Returns an empty string when the two are equal. Falls back to the full
/// path when `path` is not under `root`; ignore matching then sees an
/// unmatched hint rather than a panic.
pub fn root_relative(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
