//! The plugin host: installation, ordering, and typed event dispatch.
//!
//! Plugins implement the [`Plugin`] trait, one method per lifecycle event
//! kind with no-op defaults, so every handler signature is checked at
//! compile time. The host invokes handlers synchronously in installation
//! order; the first installed plugin sees every event first, which lets a
//! statistics plugin run before display plugins that read its counters.

mod context;

pub use context::SharedContext;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::error::{Result, ScoutError};
use crate::event::{DirEvent, EntryEvent, Event};
use crate::ignore_rules::IgnoreSet;

/// Open configuration bag handed to every plugin at install time.
/// Recognized keys are plugin-specific; unknown plugins ignore it.
#[derive(Debug, Clone, Default)]
pub struct PluginConfig {
    /// Enables verbose per-directory diagnostics in plugins that have any.
    pub debug: bool,
}

/// What happened to a [`PluginHost::install`] call. Conflicts are
/// reported, never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed,
    /// A plugin with the same identity is already registered.
    AlreadyInstalled,
    /// The identity appears in the host's exclude list.
    Excluded,
}

/// How the host reacts when a handler returns an error.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum HandlerPolicy {
    /// Log a warning and keep dispatching (default).
    #[default]
    Isolate,
    /// Fail the run with [`ScoutError::PluginHandler`].
    Abort,
}

/// An installable unit that observes traversal lifecycle events and may
/// extend the shared context.
///
/// Every handler has a no-op default; a plugin overrides only the events
/// it cares about. An unoverridden handler is the "missing handler" case
/// and stays silent.
pub trait Plugin {
    /// The plugin's identity. Used for duplicate/exclude checks and as
    /// its namespace key in [`SharedContext`].
    fn name(&self) -> &'static str;

    /// Called once at registration, before any event fires. This is
    /// where a plugin seeds its namespace in the shared context.
    fn install(&mut self, _ctx: &mut SharedContext, _config: &PluginConfig) {}

    /// A directory's listing was read; entries are about to be evaluated.
    /// The only point where a more specific ignore set may be published
    /// into the shared context.
    fn on_before(&mut self, _ctx: &mut SharedContext, _event: DirEvent<'_>) -> Result<()> {
        Ok(())
    }

    /// A directory's subtree finished; scope state pushed on `before`
    /// must be restored here.
    fn on_after(&mut self, _ctx: &mut SharedContext, _event: DirEvent<'_>) -> Result<()> {
        Ok(())
    }

    /// An entry matched the active ignore set and is pruned.
    fn on_skip(&mut self, _ctx: &mut SharedContext, _event: EntryEvent<'_>) -> Result<()> {
        Ok(())
    }

    /// A directory entry was accepted; descent follows.
    fn on_before_dir(&mut self, _ctx: &mut SharedContext, _event: EntryEvent<'_>) -> Result<()> {
        Ok(())
    }

    /// A directory entry's subtree finished.
    fn on_after_dir(&mut self, _ctx: &mut SharedContext, _event: EntryEvent<'_>) -> Result<()> {
        Ok(())
    }

    /// A file entry was accepted.
    fn on_before_file(&mut self, _ctx: &mut SharedContext, _event: EntryEvent<'_>) -> Result<()> {
        Ok(())
    }

    /// A file entry was recorded.
    fn on_after_file(&mut self, _ctx: &mut SharedContext, _event: EntryEvent<'_>) -> Result<()> {
        Ok(())
    }

    /// Host-initiated, not tied to a path; the place to print summaries.
    fn on_log(&mut self, _ctx: &mut SharedContext) -> Result<()> {
        Ok(())
    }
}

/// Owns the shared context and the ordered plugin registry, and fans
/// lifecycle events out to every plugin.
pub struct PluginHost {
    context: SharedContext,
    plugins: Vec<Box<dyn Plugin>>,
    exclude: Vec<String>,
    policy: HandlerPolicy,
}

impl PluginHost {
    /// Create a host for one traversal run.
    pub fn new(ignore: IgnoreSet, root_dir: impl Into<PathBuf>) -> Self {
        Self {
            context: SharedContext::new(ignore, root_dir),
            plugins: Vec::new(),
            exclude: Vec::new(),
            policy: HandlerPolicy::default(),
        }
    }

    /// Set the handler-failure policy.
    pub fn with_handler_policy(mut self, policy: HandlerPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set plugin identities that must not be installed.
    pub fn with_excluded<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = names.into_iter().map(Into::into).collect();
        self
    }

    /// The shared context.
    pub fn context(&self) -> &SharedContext {
        &self.context
    }

    /// Mutable access to the shared context.
    pub fn context_mut(&mut self) -> &mut SharedContext {
        &mut self.context
    }

    /// Names of installed plugins, in dispatch order.
    pub fn plugin_names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// Register a plugin. Re-installing the same identity and installing
    /// an excluded identity are reported no-ops.
    pub fn install(&mut self, mut plugin: Box<dyn Plugin>, config: &PluginConfig) -> InstallOutcome {
        let name = plugin.name();
        if self.plugins.iter().any(|p| p.name() == name) {
            warn!(plugin = name, "already installed, skipping");
            return InstallOutcome::AlreadyInstalled;
        }
        if self.exclude.iter().any(|excluded| excluded == name) {
            warn!(plugin = name, "excluded from installation, skipping");
            return InstallOutcome::Excluded;
        }
        plugin.install(&mut self.context, config);
        debug!(plugin = name, "plugin installed");
        self.plugins.push(plugin);
        InstallOutcome::Installed
    }

    /// Dispatch one event to every plugin, in installation order. Each
    /// handler runs to completion before the next starts; there is no
    /// handler concurrency.
    pub fn emit(&mut self, event: Event<'_>) -> Result<()> {
        for plugin in &mut self.plugins {
            let outcome = match event {
                Event::Before(ev) => plugin.on_before(&mut self.context, ev),
                Event::After(ev) => plugin.on_after(&mut self.context, ev),
                Event::Skip(ev) => plugin.on_skip(&mut self.context, ev),
                Event::BeforeDir(ev) => plugin.on_before_dir(&mut self.context, ev),
                Event::AfterDir(ev) => plugin.on_after_dir(&mut self.context, ev),
                Event::BeforeFile(ev) => plugin.on_before_file(&mut self.context, ev),
                Event::AfterFile(ev) => plugin.on_after_file(&mut self.context, ev),
                Event::Log => plugin.on_log(&mut self.context),
            };
            if let Err(error) = outcome {
                match self.policy {
                    HandlerPolicy::Isolate => {
                        warn!(
                            plugin = plugin.name(),
                            event = event.kind().name(),
                            %error,
                            "plugin handler failed, continuing"
                        );
                    }
                    HandlerPolicy::Abort => {
                        return Err(ScoutError::handler(plugin.name(), event.kind(), error));
                    }
                }
            }
        }
        Ok(())
    }

    /// Raise the host-initiated `Log` event.
    pub fn log(&mut self) -> Result<()> {
        self.emit(Event::Log)
    }
}
