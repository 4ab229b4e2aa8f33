//! Traversal statistics.

use colored::Colorize;

use crate::error::Result;
use crate::event::EntryEvent;
use crate::host::{Plugin, PluginConfig, SharedContext};

/// Counters kept in the shared context under the `counter` namespace.
/// Other plugins and the CLI read them through the read-only state view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    /// Entries pruned by the active ignore set.
    pub skipped: u64,
    /// Directories accepted into the output.
    pub dirs: u64,
    /// Files accepted into the output.
    pub files: u64,
    /// Current recursion depth.
    pub depth: u64,
    /// Deepest level reached.
    pub max_depth: u64,
}

/// Counts skips, directories, files, and depth. Install this before any
/// plugin that displays its numbers.
pub struct CounterPlugin;

impl CounterPlugin {
    pub const NAME: &'static str = "counter";

    pub fn new() -> Self {
        Self
    }
}

impl Default for CounterPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for CounterPlugin {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn install(&mut self, ctx: &mut SharedContext, _config: &PluginConfig) {
        ctx.insert_state(Self::NAME, Counters::default());
    }

    fn on_skip(&mut self, ctx: &mut SharedContext, _event: EntryEvent<'_>) -> Result<()> {
        if let Some(counters) = ctx.state_mut::<Counters>(Self::NAME) {
            counters.skipped += 1;
        }
        Ok(())
    }

    fn on_before_dir(&mut self, ctx: &mut SharedContext, _event: EntryEvent<'_>) -> Result<()> {
        if let Some(counters) = ctx.state_mut::<Counters>(Self::NAME) {
            counters.dirs += 1;
            counters.depth += 1;
            counters.max_depth = counters.max_depth.max(counters.depth);
        }
        Ok(())
    }

    fn on_after_dir(&mut self, ctx: &mut SharedContext, _event: EntryEvent<'_>) -> Result<()> {
        if let Some(counters) = ctx.state_mut::<Counters>(Self::NAME) {
            counters.depth = counters.depth.saturating_sub(1);
        }
        Ok(())
    }

    fn on_before_file(&mut self, ctx: &mut SharedContext, _event: EntryEvent<'_>) -> Result<()> {
        if let Some(counters) = ctx.state_mut::<Counters>(Self::NAME) {
            counters.files += 1;
        }
        Ok(())
    }

    fn on_log(&mut self, ctx: &mut SharedContext) -> Result<()> {
        let Some(counters) = ctx.state::<Counters>(Self::NAME) else {
            return Ok(());
        };
        println!(
            "{}",
            format!(
                "Searched {} directories, {} files ({} skipped, max depth {})",
                counters.dirs, counters.files, counters.skipped, counters.max_depth
            )
            .cyan()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ignore_rules::IgnoreSet;
    use crate::walker::{DirEntryInfo, EntryKind};
    use std::ffi::OsString;
    use std::path::Path;

    fn entry_event<'a>(entry: &'a DirEntryInfo, path: &'a Path) -> EntryEvent<'a> {
        EntryEvent {
            dir: Path::new("/root"),
            path,
            entry,
            listing: std::slice::from_ref(entry),
            root: Path::new("/root"),
        }
    }

    #[test]
    fn test_counts_and_depth() {
        let mut plugin = CounterPlugin::new();
        let mut ctx = SharedContext::new(IgnoreSet::new(), "/root");
        plugin.install(&mut ctx, &PluginConfig::default());

        let dir_entry = DirEntryInfo {
            name: OsString::from("sub"),
            kind: EntryKind::Directory,
        };
        let file_entry = DirEntryInfo {
            name: OsString::from("a.txt"),
            kind: EntryKind::File,
        };
        let dir_path = Path::new("/root/sub");
        let file_path = Path::new("/root/sub/a.txt");

        plugin.on_before_dir(&mut ctx, entry_event(&dir_entry, dir_path)).unwrap();
        plugin.on_before_file(&mut ctx, entry_event(&file_entry, file_path)).unwrap();
        plugin.on_skip(&mut ctx, entry_event(&file_entry, file_path)).unwrap();
        plugin.on_after_dir(&mut ctx, entry_event(&dir_entry, dir_path)).unwrap();

        let counters = ctx.state::<Counters>(CounterPlugin::NAME).unwrap();
        assert_eq!(counters.dirs, 1);
        assert_eq!(counters.files, 1);
        assert_eq!(counters.skipped, 1);
        assert_eq!(counters.depth, 0);
        assert_eq!(counters.max_depth, 1);
    }

    #[test]
    fn test_log_without_state_is_noop() {
        let mut plugin = CounterPlugin::new();
        let mut ctx = SharedContext::new(IgnoreSet::new(), "/root");
        // install never ran; on_log must stay silent and succeed
        plugin.on_log(&mut ctx).unwrap();
    }
}
