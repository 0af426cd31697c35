// src/lib.rs

//! sccs2rcs
//!
//! Converts an SCCS history into an RCS history without losing any of the
//! information in it: every delta keeps its date, author, comment and
//! position on the trunk or a branch.
//!
//! # Architecture
//!
//! - SCCS is read-only: deltas are only queried, checked out and unlocked
//! - Every archive interaction goes through `VersionControlBackend`
//! - Deltas replay oldest first; the first creates the RCS archive, later
//!   ones take a trunk or branch lock before checking in
//! - Fatal errors propagate as `Error`; the caller releases SCCS locks and
//!   prints the `Transcript`

pub mod backend;
pub mod config;
pub mod convert;
pub mod descriptions;
mod error;
pub mod history;
pub mod keywords;
pub mod preflight;
pub mod progress;
pub mod recovery;
pub mod revision;
pub mod transcript;

pub use backend::{
    CheckinKind, CheckinRequest, LockScope, QueryOutput, SccsRcsBackend, VersionControlBackend,
};
pub use config::ConversionConfig;
pub use convert::{ConversionReport, Converter};
pub use descriptions::DescriptionTable;
pub use error::{Error, Result};
pub use history::{
    FileReport, PendingEdit, Protocol, ReplayEngine, ReplayState, ReplayedRevision, Tag,
};
pub use revision::{Revision, RevisionParseError};
pub use transcript::Transcript;
