//! Traversal diagnostics, active only with the debug flag.

use tracing::debug;

use crate::error::Result;
use crate::event::EntryEvent;
use crate::host::{Plugin, PluginConfig, SharedContext};

/// Logs pruned paths and flags hidden or underscore-prefixed
/// directories. A no-op unless installed with `debug` set.
pub struct DebugPlugin {
    enabled: bool,
}

impl DebugPlugin {
    pub const NAME: &'static str = "debug";

    pub fn new() -> Self {
        Self { enabled: false }
    }
}

impl Default for DebugPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for DebugPlugin {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn install(&mut self, _ctx: &mut SharedContext, config: &PluginConfig) {
        self.enabled = config.debug;
    }

    fn on_skip(&mut self, _ctx: &mut SharedContext, event: EntryEvent<'_>) -> Result<()> {
        if self.enabled {
            debug!(path = %event.path.display(), "skipped by ignore rules");
        }
        Ok(())
    }

    fn on_before_dir(&mut self, _ctx: &mut SharedContext, event: EntryEvent<'_>) -> Result<()> {
        if self.enabled {
            let name = event.entry.name.to_string_lossy();
            if name.starts_with('.') || name.starts_with('_') {
                debug!(
                    name = %name,
                    dir = %event.dir.display(),
                    "descending into hidden directory"
                );
            }
        }
        Ok(())
    }
}
