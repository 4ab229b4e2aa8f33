//! Run configuration.
//!
//! An optional `.fscout.toml` or `.fscout.json` at the search root sets
//! defaults for a run; CLI flags win over file values. A missing file
//! means defaults, an unreadable or unparseable one is warned about and
//! ignored.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::error::{Result, ScoutError};
use crate::history::MAX_HISTORY_ITEMS;
use crate::host::HandlerPolicy;
use crate::walker::ErrorPolicy;

const CONFIG_FILE_NAMES: [&str; 2] = [".fscout.toml", ".fscout.json"];

/// File-sourced run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Verbose per-directory diagnostics.
    pub debug: bool,
    /// Plugin identities that must not be installed.
    pub exclude_plugins: Vec<String>,
    /// Subtree behavior on unreadable directories.
    pub on_error: Option<ErrorPolicy>,
    /// Run behavior when a plugin handler fails.
    pub on_handler_error: Option<HandlerPolicy>,
    /// Upper bound on stored history entries.
    pub history_limit: usize,
    /// Disable the live progress spinner.
    pub no_progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            exclude_plugins: Vec::new(),
            on_error: None,
            on_handler_error: None,
            history_limit: MAX_HISTORY_ITEMS,
            no_progress: false,
        }
    }
}

impl Config {
    /// Parse a config file, dispatching on its extension.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|source| ScoutError::read_error(path, source))?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => {
                toml::from_str(&content).map_err(|source| ScoutError::toml_error(path, source))
            }
            Some("json") => serde_json::from_str(&content)
                .map_err(|source| ScoutError::json_error(path, source)),
            other => Err(ScoutError::Config(format!(
                "unsupported config format `{}` for {}",
                other.unwrap_or(""),
                path.display()
            ))),
        }
    }

    /// Load the config for a search rooted at `root`, falling back to
    /// defaults when no file exists or a file fails to parse.
    pub fn load(root: &Path) -> Self {
        for name in CONFIG_FILE_NAMES {
            let candidate = root.join(name);
            if !candidate.is_file() {
                continue;
            }
            match Self::from_file(&candidate) {
                Ok(config) => return config,
                Err(error) => {
                    warn!(file = %candidate.display(), %error, "ignoring bad config file");
                    return Self::default();
                }
            }
        }
        Self::default()
    }
}
