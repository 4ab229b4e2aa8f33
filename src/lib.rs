//! fscout: plugin-driven filesystem traversal with layered
//! gitignore-style exclusion scopes.
//!
//! The core is a triad: the [`walker`] engine publishing lifecycle
//! events, the [`host`] dispatching them to installed plugins over a
//! shared context, and the scope policy
//! ([`plugins::ScopePlugin`]) deriving a narrower exclusion set per
//! project subtree and restoring it on exit.

pub mod cli;
pub mod config;
pub mod error;
pub mod event;
pub mod handlers;
pub mod history;
pub mod host;
pub mod ignore_rules;
pub mod matcher;
pub mod paths;
pub mod plugins;
pub mod reporter;
pub mod scope;
pub mod walker;

pub use cli::Cli;
pub use config::Config;
pub use error::{Result, ScoutError};
pub use event::{DirEvent, EntryEvent, Event, EventKind};
pub use host::{
    HandlerPolicy, InstallOutcome, Plugin, PluginConfig, PluginHost, SharedContext,
};
pub use ignore_rules::{IgnoreSet, load_ignore};
pub use matcher::NameMatcher;
pub use scope::{MarkerSet, ProjectMarker, ScopeContext};
pub use walker::{DirEntryInfo, EntryKind, ErrorPolicy, TraversalEntry, Walker};
