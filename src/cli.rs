use clap::Parser;
use std::path::PathBuf;

use crate::host::HandlerPolicy;
use crate::walker::ErrorPolicy;

#[derive(Parser, Debug)]
#[command(
    name = "fscout",
    version,
    about = "Plugin-driven filesystem search with layered ignore rules",
    long_about = "fscout walks a directory tree, pruning entries through layered \
gitignore-style rules that narrow per project subtree, and filters the result \
by a name keyword or /pattern/flags regex."
)]
pub struct Cli {
    /// Root directory to search
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// File-name keyword or regex (/pattern/flags); empty lists everything
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Verbose per-directory diagnostics
    #[arg(short, long)]
    pub debug: bool,

    /// Plugin identity to skip installing (repeatable)
    #[arg(long = "exclude-plugin", value_name = "NAME")]
    pub exclude_plugins: Vec<String>,

    /// Subtree behavior on unreadable directories
    #[arg(long, value_enum, value_name = "POLICY")]
    pub on_error: Option<ErrorPolicy>,

    /// Run behavior when a plugin handler fails
    #[arg(long, value_enum, value_name = "POLICY")]
    pub on_handler_error: Option<HandlerPolicy>,

    /// Disable the live progress spinner
    #[arg(long)]
    pub no_progress: bool,

    /// List recent searches and exit
    #[arg(long)]
    pub history: bool,

    /// Clear recorded search history and exit
    #[arg(long)]
    pub clear_history: bool,

    /// Re-run the numbered entry from --history
    #[arg(long, value_name = "N", conflicts_with = "history")]
    pub from_history: Option<usize>,
}
