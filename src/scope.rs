//! Project-boundary markers and the per-directory scope snapshot.
//!
//! A marker says "this directory is the root of X" — a version-control
//! checkout, a build tool, a language ecosystem, or a Python virtual
//! environment. Markers are monotonic down a path: once a directory is
//! inside a git checkout, so is every descendant, whether or not it
//! carries its own `.git`.

use std::fmt;

use crate::ignore_rules::IgnoreSet;
use crate::walker::DirEntryInfo;

/// A recognized project-root flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectMarker {
    Git,
    Svn,
    Maven,
    Cmake,
    /// Embedded-target (ESP-IDF) root; mutually exclusive with the
    /// generic [`Cmake`](Self::Cmake) exclusions at one level.
    Esp,
    Node,
    Go,
    Python,
    PythonVenv,
}

impl ProjectMarker {
    /// Every marker, in detection order.
    pub const ALL: [ProjectMarker; 9] = [
        Self::Git,
        Self::Svn,
        Self::Maven,
        Self::Cmake,
        Self::Esp,
        Self::Node,
        Self::Go,
        Self::Python,
        Self::PythonVenv,
    ];

    /// Short display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Git => "git",
            Self::Svn => "svn",
            Self::Maven => "maven",
            Self::Cmake => "cmake",
            Self::Esp => "esp",
            Self::Node => "node",
            Self::Go => "go",
            Self::Python => "python",
            Self::PythonVenv => "python-venv",
        }
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for ProjectMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of [`ProjectMarker`]s, cheap to copy and union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MarkerSet(u16);

impl MarkerSet {
    pub const EMPTY: MarkerSet = MarkerSet(0);

    pub fn contains(self, marker: ProjectMarker) -> bool {
        self.0 & marker.bit() != 0
    }

    pub fn insert(&mut self, marker: ProjectMarker) {
        self.0 |= marker.bit();
    }

    /// The union of two sets. Union is how marker monotonicity is kept:
    /// a child's effective set is its own detections OR'd with every
    /// ancestor's.
    pub fn union(self, other: MarkerSet) -> MarkerSet {
        MarkerSet(self.0 | other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate the contained markers in detection order.
    pub fn iter(self) -> impl Iterator<Item = ProjectMarker> {
        ProjectMarker::ALL
            .into_iter()
            .filter(move |m| self.contains(*m))
    }
}

impl FromIterator<ProjectMarker> for MarkerSet {
    fn from_iter<I: IntoIterator<Item = ProjectMarker>>(iter: I) -> Self {
        let mut set = MarkerSet::EMPTY;
        for marker in iter {
            set.insert(marker);
        }
        set
    }
}

/// Detect which project roots a directory is, from its immediate
/// entries only.
pub fn detect_markers(listing: &[DirEntryInfo]) -> MarkerSet {
    let mut set = MarkerSet::EMPTY;
    for entry in listing {
        let marker = if entry.is_dir() {
            if entry.name == ".git" {
                Some(ProjectMarker::Git)
            } else if entry.name == ".svn" {
                Some(ProjectMarker::Svn)
            } else {
                None
            }
        } else if entry.name == "pom.xml" {
            Some(ProjectMarker::Maven)
        } else if entry.name == "CMakeLists.txt" {
            Some(ProjectMarker::Cmake)
        } else if entry.name == "sdkconfig" {
            Some(ProjectMarker::Esp)
        } else if entry.name == "package.json" {
            Some(ProjectMarker::Node)
        } else if entry.name == "go.mod" {
            Some(ProjectMarker::Go)
        } else if entry.name == "requirements.txt" {
            Some(ProjectMarker::Python)
        } else if entry.name == "pyvenv.cfg" || entry.name == "venvlauncher.exe" {
            Some(ProjectMarker::PythonVenv)
        } else {
            None
        };
        if let Some(marker) = marker {
            set.insert(marker);
        }
    }
    set
}

/// Snapshot of what is special about one directory level: the exclusion
/// set in force and the effective markers. Created when a directory's
/// children are about to be iterated, discarded when its subtree
/// finishes.
#[derive(Debug, Clone)]
pub struct ScopeContext {
    pub ignore: IgnoreSet,
    pub markers: MarkerSet,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walker::EntryKind;
    use std::ffi::OsString;

    fn dir(name: &str) -> DirEntryInfo {
        DirEntryInfo {
            name: OsString::from(name),
            kind: EntryKind::Directory,
        }
    }

    fn file(name: &str) -> DirEntryInfo {
        DirEntryInfo {
            name: OsString::from(name),
            kind: EntryKind::File,
        }
    }

    #[test]
    fn test_marker_set_insert_contains() {
        let mut set = MarkerSet::EMPTY;
        assert!(set.is_empty());
        set.insert(ProjectMarker::Go);
        assert!(set.contains(ProjectMarker::Go));
        assert!(!set.contains(ProjectMarker::Git));
    }

    #[test]
    fn test_marker_set_union_is_monotonic() {
        let parent: MarkerSet = [ProjectMarker::Git].into_iter().collect();
        let child_own: MarkerSet = [ProjectMarker::Node].into_iter().collect();
        let effective = parent.union(child_own);

        // Everything true for the parent stays true for the child.
        assert!(effective.contains(ProjectMarker::Git));
        assert!(effective.contains(ProjectMarker::Node));
        // Union with an empty set changes nothing deeper down.
        assert_eq!(effective.union(MarkerSet::EMPTY), effective);
    }

    #[test]
    fn test_marker_set_iter_order() {
        let set: MarkerSet = [ProjectMarker::Node, ProjectMarker::Git].into_iter().collect();
        let markers: Vec<_> = set.iter().collect();
        assert_eq!(markers, vec![ProjectMarker::Git, ProjectMarker::Node]);
    }

    #[test]
    fn test_detect_version_control_needs_directory() {
        let detected = detect_markers(&[dir(".git")]);
        assert!(detected.contains(ProjectMarker::Git));

        // A plain file named .git is not a checkout root.
        let not_detected = detect_markers(&[file(".git")]);
        assert!(!not_detected.contains(ProjectMarker::Git));
    }

    #[test]
    fn test_detect_build_and_ecosystem_files() {
        let detected = detect_markers(&[
            file("pom.xml"),
            file("go.mod"),
            file("package.json"),
            file("CMakeLists.txt"),
            file("sdkconfig"),
            file("requirements.txt"),
        ]);
        assert!(detected.contains(ProjectMarker::Maven));
        assert!(detected.contains(ProjectMarker::Go));
        assert!(detected.contains(ProjectMarker::Node));
        assert!(detected.contains(ProjectMarker::Cmake));
        assert!(detected.contains(ProjectMarker::Esp));
        assert!(detected.contains(ProjectMarker::Python));
    }

    #[test]
    fn test_detect_venv_launchers() {
        assert!(detect_markers(&[file("pyvenv.cfg")]).contains(ProjectMarker::PythonVenv));
        assert!(detect_markers(&[file("venvlauncher.exe")]).contains(ProjectMarker::PythonVenv));
    }

    #[test]
    fn test_detect_markers_as_directories_do_not_count() {
        // Marker files must be files; a directory named go.mod is noise.
        assert!(detect_markers(&[dir("go.mod")]).is_empty());
    }

    #[test]
    fn test_detect_nothing() {
        assert!(detect_markers(&[file("main.rs"), dir("src")]).is_empty());
    }

    #[test]
    fn test_marker_names() {
        assert_eq!(ProjectMarker::Git.name(), "git");
        assert_eq!(ProjectMarker::PythonVenv.name(), "python-venv");
        assert_eq!(ProjectMarker::Esp.to_string(), "esp");
    }
}
