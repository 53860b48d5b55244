//! wordhunt - recursively find files containing every one of a set of words
//!
//! wordhunt provides:
//! - Recursive traversal with filename include/exclude globs
//! - AND-of-substrings matching, optionally case-insensitive
//! - Reports grouped by file extension (text/json/jsonl)
//! - Clipboard export of matched file contents

use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

mod backends;
mod cli;
mod core;

/// Environment variable overriding the log filter
const LOG_ENV: &str = "WORDHUNT_LOG";

fn main() -> Result<()> {
    if backends::clipboard::run_daemon_if_requested()? {
        return Ok(());
    }

    let cli = cli::Cli::parse();

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    cli::run(cli)
}
