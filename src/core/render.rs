//! Renderer module
//!
//! Renders grouped matches as human text, JSON or JSON Lines, and builds the
//! export blob handed to the clipboard.

use colored::Colorize;
use serde::Serialize;

use crate::core::group::GroupedResults;
use crate::core::model::MatchResult;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Jsonl,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "jsonl" => Ok(OutputFormat::Jsonl),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Terminal styling capability. Passed in by the caller; nothing here reads
/// process-wide color state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Palette {
    pub color: bool,
}

impl Palette {
    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn colored() -> Self {
        Self { color: true }
    }

    /// Label line for an extension group
    pub fn group_label(&self, key: &str) -> String {
        let label = if key.is_empty() {
            "[no extension]".to_string()
        } else {
            format!("[{}]", key)
        };
        if self.color {
            label.bold().cyan().to_string()
        } else {
            label
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
    pub palette: Palette,
}

impl RenderConfig {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    words: &'a [String],
    groups: Vec<JsonGroup<'a>>,
}

#[derive(Serialize)]
struct JsonGroup<'a> {
    extension: &'a str,
    files: Vec<&'a str>,
}

#[derive(Serialize)]
struct JsonLine<'a> {
    path: &'a str,
    extension: &'a str,
}

/// Renderer for search reports
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    #[allow(dead_code)]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render the report for a set of words and their grouped matches
    pub fn render(&self, words: &[String], grouped: &GroupedResults<'_>) -> String {
        match self.config.format {
            OutputFormat::Text => self.render_text(words, grouped),
            OutputFormat::Json => self.render_json(words, grouped),
            OutputFormat::Jsonl => self.render_jsonl(grouped),
        }
    }

    fn render_text(&self, words: &[String], grouped: &GroupedResults<'_>) -> String {
        let words = words.join(", ");
        if grouped.is_empty() {
            return format!("No files found containing the word(s) {}.", words);
        }

        let mut output = format!("Files containing the word(s) {}:", words);
        for (key, members) in grouped.iter() {
            output.push('\n');
            output.push_str(&self.config.palette.group_label(key));
            for m in members {
                output.push_str("\n  ");
                output.push_str(&m.path);
            }
        }
        output
    }

    fn render_json(&self, words: &[String], grouped: &GroupedResults<'_>) -> String {
        let report = JsonReport {
            words,
            groups: grouped
                .iter()
                .map(|(key, members)| JsonGroup {
                    extension: key,
                    files: members.iter().map(|m| m.path.as_str()).collect(),
                })
                .collect(),
        };
        let rendered = if self.config.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        };
        rendered.unwrap_or_else(|_| "{}".to_string())
    }

    /// One JSON object per matched file
    fn render_jsonl(&self, grouped: &GroupedResults<'_>) -> String {
        grouped
            .iter()
            .flat_map(|(key, members)| {
                members.iter().map(move |m| JsonLine {
                    path: &m.path,
                    extension: key,
                })
            })
            .filter_map(|line| {
                if self.config.pretty {
                    serde_json::to_string_pretty(&line).ok()
                } else {
                    serde_json::to_string(&line).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }
}

/// Build one export block: a delimiter line naming the file, then its
/// content fenced between marker lines.
pub fn export_block(m: &MatchResult) -> String {
    let mut block = format!("===== {} =====\n```\n", m.path);
    block.push_str(&m.content);
    if !m.content.ends_with('\n') {
        block.push('\n');
    }
    block.push_str("```");
    block
}

/// Concatenate export blocks in report order. `None` when nothing matched.
pub fn render_export(grouped: &GroupedResults<'_>) -> Option<String> {
    if grouped.is_empty() {
        return None;
    }
    Some(
        grouped
            .flatten()
            .map(export_block)
            .collect::<Vec<_>>()
            .join("\n"),
    )
}
