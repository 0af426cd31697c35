// src/backend/mod.rs

//! Access to the SCCS and RCS archives
//!
//! The replay engine never talks to `prs`, `get` or `ci` directly. It goes
//! through `VersionControlBackend`, which has one method per archive
//! interaction and reports failure as an `Err` rather than an exit status.
//! `SccsRcsBackend` drives the real tools; tests substitute an in-memory
//! backend.
//!
//! Query methods return the raw query text. Parsing it (revision listings,
//! delta metadata, comment bodies) is the job of the `history` module, so a
//! substitute backend only has to produce text in the same shape.

pub mod sccs_rcs;
pub mod tool;

pub use sccs_rcs::SccsRcsBackend;
pub use tool::{ToolOutput, ToolRunner};

use crate::error::Result;
use crate::revision::Revision;
use crate::transcript::Transcript;
use std::fmt;
use std::path::PathBuf;

/// Text returned by a source archive query, with the command that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutput {
    /// Rendered command line, for diagnostics
    pub command: String,
    /// What the query printed
    pub text: String,
}

/// Which RCS lock a check-in needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockScope {
    /// Lock the file's default (trunk) branch
    Trunk,
    /// Lock the tip of the branch a branch revision extends
    Branch { parent: Revision },
}

impl LockScope {
    /// Pick the lock for checking in `revision` on top of existing history
    pub fn for_revision(revision: &Revision) -> Self {
        match revision.parent() {
            Some(parent) if revision.is_branch() => Self::Branch { parent },
            _ => Self::Trunk,
        }
    }
}

impl fmt::Display for LockScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trunk => write!(f, "trunk"),
            Self::Branch { parent } => write!(f, "branch {}", parent),
        }
    }
}

/// How a revision enters the RCS archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckinKind {
    /// First check-in, creating the archive
    Initial {
        /// Descriptive text for the archive; None for an empty description
        description: Option<String>,
    },
    /// Check-in on top of existing history
    Incremental,
}

/// Everything needed to check one revision into RCS
#[derive(Debug, Clone)]
pub struct CheckinRequest<'a> {
    pub stem: &'a str,
    pub revision: &'a Revision,
    /// RCS-format date, e.g. `27 Mar 1994 12:00:00`
    pub date: &'a str,
    pub author: &'a str,
    /// Log message fed to the check-in
    pub message: &'a str,
    pub kind: CheckinKind,
}

/// One method per archive interaction the converter performs
pub trait VersionControlBackend {
    /// List the deltas recorded in the SCCS master for `stem`
    fn list_revisions(&mut self, stem: &str, log: &mut Transcript) -> Result<QueryOutput>;

    /// Query `day month year time author` for one delta
    fn query_metadata(
        &mut self,
        stem: &str,
        revision: &Revision,
        log: &mut Transcript,
    ) -> Result<QueryOutput>;

    /// Query the full delta description (headers plus comment) for one delta
    fn query_comment(
        &mut self,
        stem: &str,
        revision: &Revision,
        log: &mut Transcript,
    ) -> Result<QueryOutput>;

    /// Check `revision` out of SCCS for editing, returning the workfile path
    fn checkout(
        &mut self,
        stem: &str,
        revision: &Revision,
        log: &mut Transcript,
    ) -> Result<PathBuf>;

    /// Check the current workfile into RCS
    fn checkin(&mut self, request: &CheckinRequest<'_>, log: &mut Transcript) -> Result<()>;

    /// Take an RCS lock before an incremental check-in
    fn lock(&mut self, stem: &str, scope: &LockScope, log: &mut Transcript) -> Result<()>;

    /// Release the SCCS edit lock on `revision`
    fn unlock(&mut self, stem: &str, revision: &Revision, log: &mut Transcript) -> Result<()>;

    /// Attach symbolic name `name` to `revision` of the RCS file for `file`
    fn tag(
        &mut self,
        file: &str,
        name: &str,
        revision: &Revision,
        log: &mut Transcript,
    ) -> Result<()>;

    /// Check out a read-only workfile for `stem` from RCS
    fn restore(&mut self, stem: &str, log: &mut Transcript) -> Result<()>;
}
