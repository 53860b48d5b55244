//! Search model
//!
//! The request built from CLI input, the per-file match, the traversal
//! outcome and the error types shared by the search and report stages.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// A single search invocation. Immutable once built.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Directory the walk starts from
    pub root: PathBuf,

    /// Words that must all be present; order is kept for display only
    pub words: Vec<String>,

    /// Only bare filenames matching this glob are considered
    pub include: Option<String>,

    /// Bare filenames matching this glob are skipped (checked after include)
    pub exclude: Option<String>,

    /// Lower-case content and words before matching
    pub ignore_case: bool,

    /// Copy matched contents to the text sink after reporting
    pub copy: bool,
}

impl SearchRequest {
    pub fn new(root: impl Into<PathBuf>, words: Vec<String>) -> Self {
        Self {
            root: root.into(),
            words,
            include: None,
            exclude: None,
            ignore_case: false,
            copy: false,
        }
    }

    pub fn with_include(mut self, pattern: impl Into<String>) -> Self {
        self.include = Some(pattern.into());
        self
    }

    pub fn with_exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude = Some(pattern.into());
        self
    }

    pub fn with_ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    pub fn with_copy(mut self, copy: bool) -> Self {
        self.copy = copy;
        self
    }

    /// Words joined the way they are shown in report headers
    pub fn words_display(&self) -> String {
        self.words.join(", ")
    }
}

/// A file that passed the filters and contains every search word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub path: String,

    /// Full file text as read (never case-folded)
    pub content: String,
}

impl MatchResult {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Grouping key: lower-cased extension with its leading dot, or "" when
    /// the filename has none.
    pub fn extension_key(&self) -> String {
        Path::new(&self.path)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
            .unwrap_or_default()
    }
}

/// What a traversal produced: the matches in walk order, plus every file or
/// directory that could not be read.
#[derive(Debug, Default)]
pub struct SearchOutcome {
    pub matches: Vec<MatchResult>,
    pub errors: Vec<FileAccessError>,
}

impl SearchOutcome {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Errors that stop a search before any traversal happens
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("{} is not a valid directory", path.display())]
    InvalidRoot { path: PathBuf },

    #[error("invalid glob pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// A file or directory that was skipped because it could not be read
#[derive(Debug, Error)]
pub enum FileAccessError {
    #[error("Error reading file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Error reading file {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("Error walking {path}: {message}")]
    Walk { path: String, message: String },
}

impl FileAccessError {
    /// Path of the entry that failed
    pub fn path(&self) -> &str {
        match self {
            FileAccessError::Read { path, .. }
            | FileAccessError::Decode { path, .. }
            | FileAccessError::Walk { path, .. } => path,
        }
    }
}
