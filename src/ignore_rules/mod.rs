//! Layered gitignore-style exclusion rules.
//!
//! [`IgnoreSet`] is the mergeable pattern collection the walker consults
//! for every entry; [`load_ignore`] builds the base set from `.file_ignore`
//! files before a walk begins. Scope-specific narrowing on top of the base
//! set is done by [`crate::plugins::ScopePlugin`].

mod loader;
mod set;

pub use loader::{
    APP_CONFIG_DIR, IGNORE_FILE_NAME, find_ignore_files, load_ignore, load_ignore_files,
};
pub use set::IgnoreSet;
