use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use fscout::Cli;
use fscout::handlers::{handle_clear_history, handle_history, run_search};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("fscout=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fscout=info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if cli.clear_history {
        return handle_clear_history();
    }
    if cli.history {
        return handle_history();
    }
    run_search(&cli)
}
