//! Error types for fscout.
//!
//! A single unified error enum covers the traversal engine, the plugin
//! host, and the surrounding glue (ignore loading, history, config).

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::event::EventKind;

/// The I/O operation that failed, for error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOperation {
    Read,
    Write,
    Create,
}

impl fmt::Display for IoOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "write"),
            Self::Create => write!(f, "create"),
        }
    }
}

/// Unified error type for all fscout operations.
#[derive(Error, Debug)]
pub enum ScoutError {
    /// Listing a directory failed. Identifies the offending path; whether
    /// this aborts the run or only the subtree is up to the walker's
    /// error policy.
    #[error("Failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O outside the traversal loop (ignore files, history).
    #[error("Failed to {operation} {path}: {source}")]
    Io {
        path: PathBuf,
        operation: IoOperation,
        #[source]
        source: std::io::Error,
    },

    /// The search root is not a directory.
    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A plugin handler failed and the host's policy is to abort.
    #[error("Plugin `{plugin}` failed handling {event}: {source}")]
    PluginHandler {
        plugin: &'static str,
        event: &'static str,
        #[source]
        source: Box<ScoutError>,
    },

    /// An exclusion pattern did not compile.
    #[error("Invalid ignore pattern: {0}")]
    InvalidPattern(#[from] ignore::Error),

    /// Regex compilation error from a `/pattern/flags` query.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// A search query that is syntactically a regex form but unusable.
    #[error("Invalid search query `{query}`: {message}")]
    Query { query: String, message: String },

    /// JSON (de)serialization error with the file it came from.
    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// TOML parse error with the file it came from.
    #[error("Failed to parse {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Plugin-defined failures that don't fit a structured variant.
    #[error("{0}")]
    Plugin(String),
}

impl ScoutError {
    /// Create an I/O read error.
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            operation: IoOperation::Read,
            source,
        }
    }

    /// Create an I/O write error.
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            operation: IoOperation::Write,
            source,
        }
    }

    /// Create a JSON parse/serialize error tied to a file.
    pub fn json_error(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    /// Create a TOML parse error tied to a file.
    pub fn toml_error(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::Toml {
            path: path.into(),
            source,
        }
    }

    /// Wrap a handler failure with the plugin and event that produced it.
    pub fn handler(plugin: &'static str, event: EventKind, source: ScoutError) -> Self {
        Self::PluginHandler {
            plugin,
            event: event.name(),
            source: Box::new(source),
        }
    }

    /// Get the root cause of the error chain.
    pub fn root_cause(&self) -> &dyn std::error::Error {
        let mut current: &dyn std::error::Error = self;
        while let Some(source) = current.source() {
            current = source;
        }
        current
    }
}

/// Result type alias for fscout operations.
pub type Result<T> = std::result::Result<T, ScoutError>;
