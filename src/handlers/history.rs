//! History listing and clearing.

use chrono::Local;
use colored::Colorize;
use std::process::ExitCode;

use crate::history;

/// Print recent searches, newest first, numbered for `--from-history`.
pub fn handle_history() -> ExitCode {
    let items = history::read_history();
    if items.is_empty() {
        println!("{}", "No search history yet.".yellow());
        return ExitCode::SUCCESS;
    }
    for (index, item) in items.iter().enumerate() {
        let keyword = if item.keyword.is_empty() {
            "(all)".to_string()
        } else {
            item.keyword.clone()
        };
        println!(
            "{} {}  {}  {}",
            format!("{}.", index + 1).cyan(),
            item.path.display(),
            keyword.green(),
            item.time
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .dimmed()
        );
    }
    ExitCode::SUCCESS
}

/// Drop all recorded searches.
pub fn handle_clear_history() -> ExitCode {
    match history::clear_history() {
        Ok(()) => {
            println!("{}", "Search history cleared.".yellow());
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{} {error}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
