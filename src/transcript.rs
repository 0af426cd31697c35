// src/transcript.rs

//! Conversion transcript
//!
//! An append-only record of everything the converter did: progress lines,
//! warnings, and every external command with its captured output. It is
//! printed in full when a conversion aborts so the operator can see exactly
//! which command failed and what had already been written to ./RCS.
//!
//! Each entry is also forwarded to `tracing` so that `RUST_LOG=debug`
//! shows the same stream live.

use std::fmt;
use tracing::{debug, info, warn};

/// Prefix put in front of every recorded message
pub const PREFIX: &str = "sccs2rcs: ";

/// A single transcript entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// Internal bookkeeping note
    Note(String),
    /// Progress line also shown to the user
    Progress(String),
    /// Non-fatal warning
    Warning(String),
    /// External command line and its combined output
    Command { command: String, output: String },
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Note(msg) | Entry::Progress(msg) => writeln!(f, "{}{}", PREFIX, msg),
            Entry::Warning(msg) => writeln!(f, "{}warning, {}", PREFIX, msg),
            Entry::Command { command, output } => {
                writeln!(f, "$ {}", command)?;
                writeln!(f, "{}", output.strip_suffix('\n').unwrap_or(output))
            }
        }
    }
}

/// Sequential log of a conversion run
#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<Entry>,
}

impl Transcript {
    /// Create an empty transcript
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a bookkeeping note
    pub fn record(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        debug!("{}", msg);
        self.entries.push(Entry::Note(msg));
    }

    /// Record a progress line
    pub fn progress(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        info!("{}", msg);
        self.entries.push(Entry::Progress(msg));
    }

    /// Record a warning
    pub fn warn(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        warn!("{}", msg);
        self.entries.push(Entry::Warning(msg));
    }

    /// Record an external command and whatever it printed
    pub fn command(&mut self, command: impl Into<String>, output: impl Into<String>) {
        let command = command.into();
        let output = output.into();
        debug!("$ {}", command);
        if !output.is_empty() {
            debug!("{}", output.trim_end());
        }
        self.entries.push(Entry::Command { command, output });
    }

    /// All entries in the order they were recorded
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Command lines recorded so far, oldest first
    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|e| match e {
            Entry::Command { command, .. } => Some(command.as_str()),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Render the transcript as printed after a failure
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            write!(f, "{}", entry)?;
        }
        Ok(())
    }
}
