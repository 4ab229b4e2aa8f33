//! Live progress rendering during a walk.
//!
//! A spinner on stderr, updated as entries stream past. Message redraws
//! are throttled so deep trees don't spend their time repainting the
//! terminal. Construct it disabled for non-TTY or CI output.

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

use crate::error::Result;
use crate::event::EntryEvent;
use crate::host::{Plugin, PluginConfig, SharedContext};

/// Redraw the directory message every this many entries.
const REDRAW_EVERY: u64 = 64;

/// Spinner plugin. Cleared on the `log` event, so install it before the
/// plugins that print summaries there.
pub struct ProgressPlugin {
    bar: Option<ProgressBar>,
    seen: u64,
}

impl ProgressPlugin {
    pub const NAME: &'static str = "progress";

    /// Create the plugin; `enabled` should be false for non-TTY runs.
    pub fn new(enabled: bool) -> Self {
        let bar = enabled.then(|| {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::with_template("{spinner:.green} {pos} entries {wide_msg}")
                    .expect("invalid progress template"),
            );
            bar
        });
        Self { bar, seen: 0 }
    }

    fn tick(&mut self, dir: &Path) {
        self.seen += 1;
        let Some(bar) = &self.bar else {
            return;
        };
        bar.inc(1);
        if self.seen % REDRAW_EVERY == 0 {
            bar.set_message(dir.display().to_string());
        }
    }
}

impl Plugin for ProgressPlugin {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn on_before_dir(&mut self, _ctx: &mut SharedContext, event: EntryEvent<'_>) -> Result<()> {
        self.tick(event.dir);
        Ok(())
    }

    fn on_before_file(&mut self, _ctx: &mut SharedContext, event: EntryEvent<'_>) -> Result<()> {
        self.tick(event.dir);
        Ok(())
    }

    fn on_log(&mut self, _ctx: &mut SharedContext) -> Result<()> {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
        Ok(())
    }
}
