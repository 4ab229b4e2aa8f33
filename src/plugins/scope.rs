//! Hierarchical ignore-scope derivation.
//!
//! On `before` the plugin snapshots the current scope on a private
//! stack, detects project markers in the directory's listing, and
//! publishes a derived ignore set (parent's clone plus the conventional
//! exclusions of every newly-true marker) into the shared context. On
//! `after` it restores the parent's exact snapshot, so siblings are
//! never affected by rules discovered inside a subtree.
//!
//! A flat global list cannot express "exclude `node_modules` only once
//! inside a Node project"; the stack makes exclusion context-sensitive
//! and strictly reversible at the cost of one push/pop per directory.

use tracing::debug;

use crate::error::Result;
use crate::event::DirEvent;
use crate::host::{Plugin, PluginConfig, SharedContext};
use crate::paths;
use crate::scope::{MarkerSet, ProjectMarker, ScopeContext, detect_markers};

/// Scope data published for other plugins: the marker set in force for
/// the directory currently being iterated.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopeState {
    pub markers: MarkerSet,
}

/// The scope-stacking plugin.
pub struct ScopePlugin {
    debug: bool,
    stack: Vec<ScopeContext>,
}

impl ScopePlugin {
    pub const NAME: &'static str = "scope";

    pub fn new() -> Self {
        Self {
            debug: false,
            stack: Vec::new(),
        }
    }
}

impl Default for ScopePlugin {
    fn default() -> Self {
        Self::new()
    }
}

/// The exclusions a marker brings in when its root is entered. Patterns
/// that would over-prune unrelated subtrees are anchored to the root
/// directory's relative path.
fn conventional_patterns(marker: ProjectMarker, rel: &str) -> Vec<String> {
    let anchored = |name: &str| {
        if rel.is_empty() {
            format!("/{name}")
        } else {
            format!("{rel}/{name}")
        }
    };
    match marker {
        ProjectMarker::Git => vec![".git".to_string()],
        ProjectMarker::Svn => vec![".svn".to_string()],
        ProjectMarker::Maven => vec!["target".to_string(), ".mvn".to_string()],
        ProjectMarker::Esp => vec![
            "build".to_string(),
            "components".to_string(),
            "managed_components".to_string(),
        ],
        ProjectMarker::Cmake => vec![anchored("build"), "_deps".to_string()],
        ProjectMarker::Node => vec!["dist".to_string(), "node_modules".to_string()],
        ProjectMarker::Go => vec![anchored("dist"), anchored("tmp")],
        ProjectMarker::Python => vec![
            anchored("**/models"),
            "__pycache__".to_string(),
            "site-packages".to_string(),
        ],
        // A venv subtree is opaque: everything beneath it goes.
        ProjectMarker::PythonVenv => vec![if rel.is_empty() {
            "**".to_string()
        } else {
            format!("{rel}/**")
        }],
    }
}

impl Plugin for ScopePlugin {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn install(&mut self, ctx: &mut SharedContext, config: &PluginConfig) {
        self.debug = config.debug;
        ctx.insert_state(Self::NAME, ScopeState::default());
    }

    fn on_before(&mut self, ctx: &mut SharedContext, event: DirEvent<'_>) -> Result<()> {
        let parent_markers = ctx
            .state::<ScopeState>(Self::NAME)
            .map(|s| s.markers)
            .unwrap_or_default();
        self.stack.push(ScopeContext {
            ignore: ctx.ignore.clone(),
            markers: parent_markers,
        });

        let detected = detect_markers(event.listing);
        let rel = paths::root_relative(event.root, event.path);
        let esp_root = detected.contains(ProjectMarker::Esp);

        let mut derived = ctx.ignore.clone();
        for marker in ProjectMarker::ALL {
            let newly_true = detected.contains(marker) && !parent_markers.contains(marker);
            if !newly_true {
                continue;
            }
            // An embedded-target root supersedes the generic native-build
            // exclusions at this level.
            if marker == ProjectMarker::Cmake && esp_root {
                continue;
            }
            derived.add(conventional_patterns(marker, &rel))?;
            if self.debug {
                debug!(
                    marker = marker.name(),
                    path = %event.path.display(),
                    "project root detected"
                );
            }
        }

        ctx.ignore = derived;
        if let Some(state) = ctx.state_mut::<ScopeState>(Self::NAME) {
            state.markers = parent_markers.union(detected);
        }
        Ok(())
    }

    fn on_after(&mut self, ctx: &mut SharedContext, _event: DirEvent<'_>) -> Result<()> {
        if let Some(previous) = self.stack.pop() {
            let ScopeContext { ignore, markers } = previous;
            if let Some(state) = ctx.state_mut::<ScopeState>(Self::NAME) {
                state.markers = markers;
            }
            ctx.ignore = ignore;
        }
        Ok(())
    }
}
