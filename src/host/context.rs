//! The shared traversal context.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use crate::ignore_rules::IgnoreSet;

/// Mutable state shared between the engine and every installed plugin
/// for the duration of one traversal run.
///
/// The engine owns two fields: `ignore`, the exclusion set consulted for
/// each entry (re-read after every `Before` event so scope derivation
/// takes effect), and `root_dir`, used for relative-path computation.
/// Everything else lives in per-plugin namespaces keyed by plugin name:
/// a plugin mutates its own record through [`state_mut`](Self::state_mut)
/// and reads other plugins' records through the immutable
/// [`state`](Self::state) view.
pub struct SharedContext {
    /// The exclusion set currently in scope.
    pub ignore: IgnoreSet,
    /// The traversal root. Read-only by convention.
    pub root_dir: PathBuf,
    states: HashMap<&'static str, Box<dyn Any>>,
}

impl SharedContext {
    /// Create a context for one traversal run.
    pub fn new(ignore: IgnoreSet, root_dir: impl Into<PathBuf>) -> Self {
        Self {
            ignore,
            root_dir: root_dir.into(),
            states: HashMap::new(),
        }
    }

    /// Install or replace the state record owned by `plugin`.
    pub fn insert_state<T: Any>(&mut self, plugin: &'static str, state: T) {
        self.states.insert(plugin, Box::new(state));
    }

    /// Read-only view of a plugin's state record. This is the supported
    /// way for one plugin to observe another's data.
    pub fn state<T: Any>(&self, plugin: &str) -> Option<&T> {
        self.states.get(plugin).and_then(|s| s.downcast_ref())
    }

    /// Mutable access to a plugin's own state record.
    pub fn state_mut<T: Any>(&mut self, plugin: &str) -> Option<&mut T> {
        self.states.get_mut(plugin).and_then(|s| s.downcast_mut())
    }

    /// Names of the plugins that registered state, for diagnostics.
    pub fn state_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.states.keys().copied()
    }
}

impl fmt::Debug for SharedContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.states.keys().collect();
        keys.sort();
        f.debug_struct("SharedContext")
            .field("root_dir", &self.root_dir)
            .field("ignore_patterns", &self.ignore.len())
            .field("states", &keys)
            .finish()
    }
}
