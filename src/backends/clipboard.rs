//! Clipboard export
//!
//! The export blob is written to a [`TextSink`]. The production sink is the
//! system clipboard; tests use an in-memory sink.
//!
//! On Linux the X11/Wayland selection is owned by a process and disappears
//! when that process exits, so the write is handed to a detached copy of this
//! binary that keeps serving it until another program replaces it.

use thiserror::Error;
use tracing::debug;

use crate::core::group::GroupedResults;
use crate::core::render::render_export;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(#[from] arboard::Error),

    #[error("clipboard handoff failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("clipboard daemon did not take over the selection")]
    DaemonNotReady,
}

/// Destination for one text blob per invocation
pub trait TextSink {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The platform clipboard
pub struct SystemClipboard {
    #[cfg(not(target_os = "linux"))]
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    #[cfg(target_os = "linux")]
    pub fn open() -> Result<Self, ClipboardError> {
        // fails here when there is no display at all
        arboard::Clipboard::new()?;
        Ok(Self {})
    }

    #[cfg(not(target_os = "linux"))]
    pub fn open() -> Result<Self, ClipboardError> {
        Ok(Self {
            inner: arboard::Clipboard::new()?,
        })
    }
}

impl TextSink for SystemClipboard {
    #[cfg(target_os = "linux")]
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        daemon::hand_off(text)
    }

    #[cfg(not(target_os = "linux"))]
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.inner.set_text(text)?;
        Ok(())
    }
}

/// Serve the clipboard when this process was spawned as the daemon.
/// Returns `true` when it did, in which case the caller should exit.
pub fn run_daemon_if_requested() -> Result<bool, ClipboardError> {
    #[cfg(target_os = "linux")]
    {
        if std::env::var_os(daemon::ENV).is_some() {
            daemon::serve()?;
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(target_os = "linux")]
mod daemon {
    use arboard::SetExtLinux;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::os::unix::process::CommandExt;
    use std::process::{Command, Stdio};
    use tracing::debug;

    use super::ClipboardError;

    pub const ENV: &str = "WORDHUNT_CLIPBOARD_DAEMON";
    const READY: &str = "ready";

    /// Spawn the daemon, feed it the text and wait until it owns the selection
    pub fn hand_off(text: &str) -> Result<(), ClipboardError> {
        let mut child = Command::new(std::env::current_exe()?)
            .env(ENV, "1")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .process_group(0)
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes())?;
        }

        let stdout = child.stdout.take().ok_or(ClipboardError::DaemonNotReady)?;
        let mut line = String::new();
        BufReader::new(stdout).read_line(&mut line)?;
        if line.trim() != READY {
            return Err(ClipboardError::DaemonNotReady);
        }

        debug!(pid = child.id(), "clipboard daemon owns the selection");
        Ok(())
    }

    /// Daemon body: read the text from stdin, set it, report readiness, then
    /// block until the selection is taken by someone else.
    pub fn serve() -> Result<(), ClipboardError> {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;

        let mut clipboard = arboard::Clipboard::new()?;
        clipboard.set_text(text.as_str())?;

        let mut stdout = std::io::stdout();
        writeln!(stdout, "{}", READY)?;
        stdout.flush()?;

        clipboard.set().wait().text(text)?;
        Ok(())
    }
}

/// Collects writes in memory
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemorySink {
    pub writes: Vec<String>,
}

#[cfg(test)]
impl TextSink for MemorySink {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.writes.push(text.to_string());
        Ok(())
    }
}

/// Write the grouped matches to the sink. Returns how many files were
/// exported; zero means the sink was not touched.
pub fn export_matches<S: TextSink + ?Sized>(
    grouped: &GroupedResults<'_>,
    sink: &mut S,
) -> Result<usize, ClipboardError> {
    let Some(blob) = render_export(grouped) else {
        debug!("nothing matched, skipping clipboard export");
        return Ok(0);
    };

    sink.write_text(&blob)?;
    let count = grouped.file_count();
    debug!(files = count, bytes = blob.len(), "exported matches");
    Ok(count)
}
