//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::backends::clipboard::{export_matches, SystemClipboard, TextSink};
use crate::backends::search::search_files;
use crate::core::group::GroupedResults;
use crate::core::model::{SearchOutcome, SearchRequest};
use crate::core::render::{OutputFormat, Palette, RenderConfig, Renderer};

/// wordhunt - find files that contain every one of a set of words.
#[derive(Parser, Debug)]
#[command(name = "wordhunt")]
#[command(
    author,
    version,
    about,
    long_about = r#"Recursively search DIRECTORY for files whose contents contain every WORD.

A file matches when each word occurs somewhere in it as a literal substring;
order and position do not matter. Matches are grouped by file extension.

Examples:
    wordhunt src TODO unsafe
    wordhunt docs release notes -i --include '*.md'
    wordhunt . config --exclude '*.lock' --copy
"#
)]
pub struct Cli {
    /// Directory to search in.
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    /// Words to search for (all must be present).
    #[arg(value_name = "WORD", required = true, num_args = 1..)]
    pub words: Vec<String>,

    /// Ignore case when searching.
    #[arg(short = 'i', long)]
    pub ignore_case: bool,

    /// File pattern to include (e.g., '*.txt').
    #[arg(
        long,
        value_name = "GLOB",
        long_help = "Only consider files whose bare filename matches GLOB.\n\n\
Supports '*', '?', '[seq]' and '[!seq]'. The directory part of a path is never\n\
matched."
    )]
    pub include: Option<String>,

    /// File pattern to exclude (e.g., '*.log').
    #[arg(
        long,
        value_name = "GLOB",
        long_help = "Skip files whose bare filename matches GLOB.\n\n\
Checked after --include, so a file matching both is skipped."
    )]
    pub exclude: Option<String>,

    /// Copy matched file contents to the clipboard.
    #[arg(
        short = 'c',
        long,
        long_help = "After reporting, copy every matched file to the system clipboard.\n\n\
Each file becomes a block with a '===== path =====' line followed by its content\n\
fenced in ``` lines, in the same order as the report. Nothing is copied when no\n\
file matched."
    )]
    pub copy: bool,

    /// Output format (text/json/jsonl).
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: String,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long)]
    pub pretty: bool,

    /// Disable colored output.
    #[arg(
        long,
        long_help = "Disable colored group labels. Color is also disabled when NO_COLOR is\n\
set or stdout is not a terminal."
    )]
    pub no_color: bool,

    /// Quiet mode (only errors are logged).
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug diagnostics on stderr).
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Build the immutable search request
    pub fn request(&self) -> SearchRequest {
        let mut request = SearchRequest::new(&self.directory, self.words.clone())
            .with_ignore_case(self.ignore_case)
            .with_copy(self.copy);
        if let Some(include) = &self.include {
            request = request.with_include(include);
        }
        if let Some(exclude) = &self.exclude {
            request = request.with_exclude(exclude);
        }
        request
    }

    /// Render options, with color decided from flags and the environment
    pub fn render_config(&self) -> Result<RenderConfig> {
        let format: OutputFormat = self.format.parse().map_err(anyhow::Error::msg)?;
        let color = !self.no_color
            && std::env::var_os("NO_COLOR").is_none()
            && std::io::stdout().is_terminal();
        let palette = if color {
            Palette::colored()
        } else {
            Palette::plain()
        };
        Ok(RenderConfig::new(format)
            .with_pretty(self.pretty)
            .with_palette(palette))
    }

    /// Default log level when WORDHUNT_LOG is not set
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let config = cli.render_config()?;
    let request = cli.request();

    debug!(
        root = %request.root.display(),
        words = %request.words_display(),
        ignore_case = request.ignore_case,
        "starting search"
    );
    let outcome = search_files(&request)?;
    report_errors(&outcome);
    if outcome.is_empty() {
        debug!("no files matched");
    }

    let grouped = GroupedResults::from_matches(&outcome.matches);
    let renderer = Renderer::with_config(config);
    let output = renderer.render(&request.words, &grouped);
    if !output.is_empty() {
        println!("{}", output);
    }

    if request.copy && !grouped.is_empty() {
        let mut clipboard = SystemClipboard::open()?;
        copy_to_sink(&grouped, &mut clipboard)?;
    }

    Ok(())
}

/// Export to a sink and confirm on stderr
pub fn copy_to_sink(grouped: &GroupedResults<'_>, sink: &mut dyn TextSink) -> Result<()> {
    let count = export_matches(grouped, sink)?;
    if count > 0 {
        eprintln!("Copied {} file(s) to the clipboard.", count);
    }
    Ok(())
}

fn report_errors(outcome: &SearchOutcome) {
    for err in &outcome.errors {
        warn!(path = err.path(), "{}", err);
    }
}
