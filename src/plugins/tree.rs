//! Per-directory item counting.

use tracing::debug;

use crate::error::Result;
use crate::event::{DirEvent, EntryEvent};
use crate::host::{Plugin, PluginConfig, SharedContext};

/// Item count for the directory scope currently being iterated. After
/// the walk finishes it holds the total number of accepted entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeState {
    pub items: u64,
}

/// Counts accepted entries per directory with a private stack; each
/// subtree's total folds into its parent on `after`.
pub struct TreePlugin {
    debug: bool,
    stack: Vec<u64>,
}

impl TreePlugin {
    pub const NAME: &'static str = "tree";

    pub fn new() -> Self {
        Self {
            debug: false,
            stack: Vec::new(),
        }
    }
}

impl Default for TreePlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for TreePlugin {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn install(&mut self, ctx: &mut SharedContext, config: &PluginConfig) {
        self.debug = config.debug;
        ctx.insert_state(Self::NAME, TreeState::default());
    }

    fn on_before(&mut self, ctx: &mut SharedContext, _event: DirEvent<'_>) -> Result<()> {
        if let Some(state) = ctx.state_mut::<TreeState>(Self::NAME) {
            self.stack.push(state.items);
            state.items = 0;
        }
        Ok(())
    }

    fn on_before_dir(&mut self, ctx: &mut SharedContext, _event: EntryEvent<'_>) -> Result<()> {
        if let Some(state) = ctx.state_mut::<TreeState>(Self::NAME) {
            state.items += 1;
        }
        Ok(())
    }

    fn on_before_file(&mut self, ctx: &mut SharedContext, _event: EntryEvent<'_>) -> Result<()> {
        if let Some(state) = ctx.state_mut::<TreeState>(Self::NAME) {
            state.items += 1;
        }
        Ok(())
    }

    fn on_after(&mut self, ctx: &mut SharedContext, event: DirEvent<'_>) -> Result<()> {
        if let Some(state) = ctx.state_mut::<TreeState>(Self::NAME) {
            if self.debug {
                debug!(
                    path = %event.path.display(),
                    items = state.items,
                    "directory items counted"
                );
            }
            if let Some(parent_items) = self.stack.pop() {
                state.items += parent_items;
            }
        }
        Ok(())
    }
}
