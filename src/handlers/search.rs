//! The search command: wire the core together and run one walk.

use chrono::Utc;
use colored::Colorize;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing::warn;

use crate::cli::Cli;
use crate::config::Config;
use crate::error::{Result, ScoutError};
use crate::history::{self, HistoryEntry};
use crate::host::{PluginConfig, PluginHost};
use crate::ignore_rules::load_ignore;
use crate::matcher::NameMatcher;
use crate::plugins::{CounterPlugin, DebugPlugin, ProgressPlugin, ScopePlugin, TreePlugin};
use crate::reporter;
use crate::walker::{TraversalEntry, Walker};

/// Run a search per the CLI flags, reporting errors on stderr.
pub fn run_search(cli: &Cli) -> ExitCode {
    match search(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{} {error}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn resolve_request(cli: &Cli) -> Result<(PathBuf, String)> {
    if let Some(number) = cli.from_history {
        let items = history::read_history();
        if number == 0 || number > items.len() {
            return Err(ScoutError::Config(format!(
                "no history entry #{number} (have {})",
                items.len()
            )));
        }
        let item = &items[number - 1];
        return Ok((item.path.clone(), item.keyword.clone()));
    }
    Ok((cli.root.clone(), cli.query.clone()))
}

fn search(cli: &Cli) -> Result<()> {
    let (root_arg, keyword) = resolve_request(cli)?;
    let root = root_arg
        .canonicalize()
        .map_err(|source| ScoutError::read_error(&root_arg, source))?;
    if !root.is_dir() {
        return Err(ScoutError::NotADirectory(root));
    }

    let config = Config::load(&root);
    let debug = cli.debug || config.debug;
    let error_policy = cli.on_error.or(config.on_error).unwrap_or_default();
    let handler_policy = cli
        .on_handler_error
        .or(config.on_handler_error)
        .unwrap_or_default();
    let no_progress = cli.no_progress || config.no_progress;
    let mut excluded = config.exclude_plugins.clone();
    excluded.extend(cli.exclude_plugins.iter().cloned());

    // Fail on a bad query before touching the filesystem.
    let matcher = NameMatcher::compile(&keyword)?;

    let started = Instant::now();
    let ignore = load_ignore(&root)?;
    let mut host = PluginHost::new(ignore, root.clone())
        .with_handler_policy(handler_policy)
        .with_excluded(excluded);

    let plugin_config = PluginConfig { debug };
    let progress_enabled = std::io::stderr().is_terminal() && !debug && !no_progress;
    // The spinner clears itself on `log`, before the counter prints; the
    // counter feeds anything installed after it.
    host.install(Box::new(ProgressPlugin::new(progress_enabled)), &plugin_config);
    host.install(Box::new(CounterPlugin::new()), &plugin_config);
    host.install(Box::new(TreePlugin::new()), &plugin_config);
    host.install(Box::new(DebugPlugin::new()), &plugin_config);
    host.install(Box::new(ScopePlugin::new()), &plugin_config);

    let mut output = Vec::new();
    let walker = Walker::new().with_error_policy(error_policy);
    walker.walk(&root, &mut output, &mut host)?;
    host.log()?;

    let matches: Vec<&TraversalEntry> = output
        .iter()
        .filter(|entry| matcher.matches(&entry.path))
        .collect();
    reporter::print_results(&matches, started.elapsed());

    let record = HistoryEntry {
        path: root,
        keyword,
        time: Utc::now(),
    };
    if let Err(error) = history::add_history(record, config.history_limit) {
        warn!(%error, "could not record search history");
    }
    Ok(())
}
