// src/history/replay.rs

//! Replaying one SCCS master into RCS
//!
//! Deltas are replayed strictly in the order SCCS lists them (oldest first).
//! For each delta:
//!
//! 1. Query date and author, then `get -e` the delta
//! 2. Rewrite SCCS keywords in the workfile
//! 3. Check the workfile into RCS:
//!    - the oldest delta creates the archive (`Initial revision.`, with a
//!      description from the description table if one was given)
//!    - later trunk deltas lock the trunk first; failing to get that lock
//!      is fatal
//!    - later branch deltas try to lock the tip of the branch they extend.
//!      The first delta of a new branch has nothing to lock, so a failed
//!      branch lock is only a warning
//! 4. `unget` the SCCS edit lock, whether or not step 3 succeeded
//!
//! Per-delta state machine:
//!
//! ```text
//! NotStarted -> CheckedOut -> Translated -> CommittingInitial     -> Unlocked -> ... -> Done
//!                                        \-> CommittingIncremental -/
//! ```

use super::comment::extract_comment;
use super::enumerate::enumerate_revisions;
use super::metadata::{DeltaMetadata, extract_metadata};
use crate::backend::{CheckinKind, CheckinRequest, LockScope, VersionControlBackend};
use crate::descriptions::DescriptionTable;
use crate::error::Result;
use crate::keywords;
use crate::progress::ProgressTracker;
use crate::revision::Revision;
use crate::transcript::Transcript;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Log message of the check-in that creates an RCS archive
pub const INITIAL_MESSAGE: &str = "Initial revision.";

/// Where the engine is in replaying the current file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayState {
    /// No delta of the current file touched yet
    NotStarted,
    /// Delta checked out of SCCS for edit
    CheckedOut,
    /// Keywords rewritten in the workfile
    Translated,
    /// Creating the RCS archive
    CommittingInitial,
    /// Adding a delta to an existing RCS archive
    CommittingIncremental,
    /// SCCS edit lock released
    Unlocked,
    /// Every delta of the file replayed
    Done,
}

/// Check-in protocol used for a delta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Initial,
    Incremental,
}

/// What happened to one delta
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayedRevision {
    pub revision: Revision,
    pub protocol: Protocol,
    /// Lock requested before an incremental check-in
    pub lock: Option<LockScope>,
    /// Whether that lock was actually granted
    pub lock_acquired: bool,
    pub metadata: DeltaMetadata,
}

/// A delta checked out of SCCS for edit whose lock has not been released
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdit {
    pub stem: String,
    pub revision: Revision,
}

impl fmt::Display for PendingEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.stem, self.revision)
    }
}

/// Replay outcome for one SCCS master
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub stem: String,
    pub revisions: Vec<ReplayedRevision>,
}

impl FileReport {
    /// Number of check-ins that created an archive (always 1 for a non-empty file)
    pub fn initial_imports(&self) -> usize {
        self.revisions
            .iter()
            .filter(|r| r.protocol == Protocol::Initial)
            .count()
    }
}

/// Drives the per-delta checkout/translate/checkin/unget cycle
pub struct ReplayEngine<'a, B>
where
    B: VersionControlBackend + ?Sized,
{
    backend: &'a mut B,
    descriptions: Option<&'a DescriptionTable>,
    progress: &'a dyn ProgressTracker,
    state: ReplayState,
    pending: Vec<PendingEdit>,
}

impl<'a, B> ReplayEngine<'a, B>
where
    B: VersionControlBackend + ?Sized,
{
    pub fn new(
        backend: &'a mut B,
        descriptions: Option<&'a DescriptionTable>,
        progress: &'a dyn ProgressTracker,
    ) -> Self {
        Self {
            backend,
            descriptions,
            progress,
            state: ReplayState::NotStarted,
            pending: Vec::new(),
        }
    }

    /// Current state of the per-delta state machine
    pub fn state(&self) -> ReplayState {
        self.state
    }

    /// Edit locks taken by this engine and not yet released
    ///
    /// A delta is listed from just before `get -e` until its `unget`
    /// succeeds, so a failed checkout is included too.
    pub fn pending(&self) -> &[PendingEdit] {
        &self.pending
    }

    fn transition(&mut self, stem: &str, revision: &Revision, next: ReplayState) {
        debug!("{} {}: {:?} -> {:?}", stem, revision, self.state, next);
        self.state = next;
    }

    /// Replay every delta of `stem`, oldest first
    pub fn replay_file(&mut self, stem: &str, log: &mut Transcript) -> Result<FileReport> {
        self.state = ReplayState::NotStarted;

        let revisions = enumerate_revisions(&mut *self.backend, stem, log)?;
        let listed: Vec<String> = revisions.iter().map(|r| r.to_string()).collect();
        log.record(format!("{} revisions: {}", stem, listed.join(", ")));

        let mut report = FileReport {
            stem: stem.to_string(),
            revisions: Vec::with_capacity(revisions.len()),
        };
        for (index, revision) in revisions.iter().enumerate() {
            let replayed = self.replay_revision(stem, revision, index == 0, log)?;
            report.revisions.push(replayed);
        }

        self.state = ReplayState::Done;
        info!("Replayed {} revisions of {}", report.revisions.len(), stem);
        Ok(report)
    }

    fn replay_revision(
        &mut self,
        stem: &str,
        revision: &Revision,
        first: bool,
        log: &mut Transcript,
    ) -> Result<ReplayedRevision> {
        let metadata = extract_metadata(&mut *self.backend, stem, revision, log)?;
        log.progress(format!(
            "==> file {}, rev={}, date={}, author={}",
            stem, revision, metadata.date, metadata.author
        ));
        self.progress
            .set_message(&format!("{} {} ({})", stem, revision, metadata.author));

        self.pending.push(PendingEdit {
            stem: stem.to_string(),
            revision: revision.clone(),
        });
        let workfile = self.backend.checkout(stem, revision, log)?;
        self.transition(stem, revision, ReplayState::CheckedOut);
        log.record("checked out of SCCS");

        let outcome = self.translate_and_commit(stem, revision, &metadata, first, &workfile, log);

        // The edit lock goes back even when the check-in failed
        match self.backend.unlock(stem, revision, log) {
            Ok(()) => self
                .pending
                .retain(|p| !(p.stem == stem && p.revision == *revision)),
            Err(e) => log.record(format!("unget of {} {} failed: {}", stem, revision, e)),
        }
        self.transition(stem, revision, ReplayState::Unlocked);

        let (protocol, lock, lock_acquired) = outcome?;
        Ok(ReplayedRevision {
            revision: revision.clone(),
            protocol,
            lock,
            lock_acquired,
            metadata,
        })
    }

    fn translate_and_commit(
        &mut self,
        stem: &str,
        revision: &Revision,
        metadata: &DeltaMetadata,
        first: bool,
        workfile: &Path,
        log: &mut Transcript,
    ) -> Result<(Protocol, Option<LockScope>, bool)> {
        let content = fs::read(workfile)?;
        fs::write(workfile, keywords::translate_bytes(&content))?;
        self.transition(stem, revision, ReplayState::Translated);
        log.record("performed keyword substitutions");

        if first {
            self.transition(stem, revision, ReplayState::CommittingInitial);
            self.commit_initial(stem, revision, metadata, log)?;
            return Ok((Protocol::Initial, None, false));
        }

        let scope = LockScope::for_revision(revision);
        let acquired = self.acquire_lock(stem, &scope, log)?;

        let message = extract_comment(&mut *self.backend, stem, revision, log)?;
        self.transition(stem, revision, ReplayState::CommittingIncremental);
        self.backend.checkin(
            &CheckinRequest {
                stem,
                revision,
                date: &metadata.date,
                author: &metadata.author,
                message: &message,
                kind: CheckinKind::Incremental,
            },
            log,
        )?;
        log.record("delta checkin successful");

        Ok((Protocol::Incremental, Some(scope), acquired))
    }

    fn commit_initial(
        &mut self,
        stem: &str,
        revision: &Revision,
        metadata: &DeltaMetadata,
        log: &mut Transcript,
    ) -> Result<()> {
        let description = match self.descriptions {
            Some(table) => {
                let found = table.get(stem).map(str::to_string);
                if found.is_none() {
                    log.warn(format!("no description for {} in comments file", stem));
                }
                found
            }
            None => None,
        };

        self.backend.checkin(
            &CheckinRequest {
                stem,
                revision,
                date: &metadata.date,
                author: &metadata.author,
                message: INITIAL_MESSAGE,
                kind: CheckinKind::Initial { description },
            },
            log,
        )?;
        log.record("initial checkin successful");
        Ok(())
    }

    /// Take the lock for an incremental check-in; only a trunk lock must succeed
    fn acquire_lock(
        &mut self,
        stem: &str,
        scope: &LockScope,
        log: &mut Transcript,
    ) -> Result<bool> {
        match scope {
            LockScope::Trunk => {
                self.backend.lock(stem, scope, log)?;
                log.record("got trunk lock");
                Ok(true)
            }
            LockScope::Branch { parent } => match self.backend.lock(stem, scope, log) {
                Ok(()) => {
                    log.record("got branch lock");
                    Ok(true)
                }
                Err(e) => {
                    log.warn(format!(
                        "could not lock branch {} of {} ({}), continuing",
                        parent, stem, e
                    ));
                    Ok(false)
                }
            },
        }
    }
}
