//! Built-in plugins.
//!
//! Each plugin owns a namespaced record in the shared context under its
//! own name; cross-plugin reads go through the read-only view on
//! [`crate::host::SharedContext`]. Installation order matters: the
//! counter runs before anything that displays its numbers.

mod counter;
mod debug;
mod progress;
mod scope;
mod tree;

pub use counter::{CounterPlugin, Counters};
pub use debug::DebugPlugin;
pub use progress::ProgressPlugin;
pub use scope::{ScopePlugin, ScopeState};
pub use tree::{TreePlugin, TreeState};
