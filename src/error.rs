// src/error.rs

//! Error types for the SCCS to RCS conversion
//!
//! Every variant here is fatal: the conversion aborts and the recovery
//! routine runs. Failures the converter is allowed to shrug off (branch
//! parent locks, source unlocks, workfile restoration) never become an
//! `Error`; they are recorded in the transcript instead.

use crate::revision::RevisionParseError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a conversion run
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error while reading or rewriting a workfile or table
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An SCCS or RCS tool could not be located
    #[error("'{tool}' not found in search path {search_path}")]
    ToolNotFound { tool: String, search_path: String },

    /// An external command could not be started
    #[error("'{command}' could not be run: {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// An external command ran but reported failure
    #[error("'{command}' failed")]
    CommandFailed {
        command: String,
        status: Option<i32>,
        output: String,
    },

    /// A `D` line in a revision listing had no revision identifier
    #[error("garbled revision line in master file s.{stem}: {line:?}")]
    MalformedRevisionLine { stem: String, line: String },

    /// A revision identifier that is not a dotted number sequence
    #[error(transparent)]
    InvalidRevision(#[from] RevisionParseError),

    /// Delta metadata did not come back as day, month, year, time, author
    #[error("prs output {output:?} from '{command}' was ill-formed")]
    MalformedMetadata { command: String, output: String },

    /// A tag table line did not have exactly four fields
    #[error("tags table in bad format: {0:?}")]
    MalformedTagLine(String),

    /// A description table line was not `filename:description`
    #[error("ill-formed line '{0}' in comments file")]
    MalformedDescription(String),

    /// The same filename appears twice in the description table
    #[error("duplicate filename '{0}' in comments file")]
    DuplicateDescription(String),

    /// The working directory is not in a state that can be converted
    #[error("{0}")]
    Precondition(String),

    /// The target archive directory could not be created
    #[error("failed while attempting to create RCS directory {path}: {source}")]
    TargetArchive {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Create a precondition error with a message
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// The external command line associated with this error, if any
    pub fn command(&self) -> Option<&str> {
        match self {
            Self::CommandSpawn { command, .. }
            | Self::CommandFailed { command, .. }
            | Self::MalformedMetadata { command, .. } => Some(command),
            _ => None,
        }
    }
}
