// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.
//!
//! `FakeBackend` keeps SCCS masters and RCS archives in memory and checks the
//! same preconditions the real tools do: `ci -i` refuses an existing archive,
//! `rcs -l` needs something to lock, `unget` needs an outstanding edit.

#![allow(dead_code)]

use sccs2rcs::{
    CheckinKind, CheckinRequest, ConversionConfig, Error, LockScope, QueryOutput, Result, Revision,
    Transcript, VersionControlBackend,
};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// One delta of a fake SCCS master
#[derive(Debug, Clone)]
pub struct FakeDelta {
    pub revision: String,
    /// `day month yy time author`, as `prs -d` prints it
    pub metadata: String,
    pub comment: String,
    pub content: String,
}

impl FakeDelta {
    pub fn author(&self) -> &str {
        self.metadata.split_whitespace().last().unwrap_or("nobody")
    }
}

/// Build a delta from its id, metadata line, comment and file content
pub fn delta(revision: &str, metadata: &str, comment: &str, content: &str) -> FakeDelta {
    FakeDelta {
        revision: revision.to_string(),
        metadata: metadata.to_string(),
        comment: comment.to_string(),
        content: content.to_string(),
    }
}

/// Every backend call, in the order it was made
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListRevisions(String),
    QueryMetadata(String, String),
    QueryComment(String, String),
    Checkout(String, String),
    Checkin {
        stem: String,
        revision: String,
        date: String,
        author: String,
        message: String,
        kind: CheckinKind,
        content: String,
    },
    Lock(String, LockScope),
    Unlock(String, String),
    Tag {
        file: String,
        name: String,
        revision: String,
    },
    Restore(String),
}

/// A revision stored in a fake RCS archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedRevision {
    pub revision: String,
    pub date: String,
    pub author: String,
    pub message: String,
    pub content: String,
}

/// A fake RCS archive
#[derive(Debug, Clone, Default)]
pub struct FakeArchive {
    pub description: Option<String>,
    pub revisions: Vec<ArchivedRevision>,
    pub tags: BTreeMap<String, String>,
}

impl FakeArchive {
    pub fn revision_ids(&self) -> Vec<&str> {
        self.revisions.iter().map(|r| r.revision.as_str()).collect()
    }
}

/// In-memory SCCS/RCS pair
pub struct FakeBackend {
    work_dir: PathBuf,
    masters: BTreeMap<String, Vec<FakeDelta>>,
    metadata_overrides: HashMap<(String, String), String>,
    failing_checkins: HashSet<(String, String)>,
    failing_trunk_locks: HashSet<String>,
    failing_checkouts: HashSet<(String, String)>,
    pub calls: Vec<Call>,
    pub archives: BTreeMap<String, FakeArchive>,
    /// Outstanding SCCS edits as (stem, revision)
    pub checked_out: BTreeSet<(String, String)>,
}

impl FakeBackend {
    pub fn new(work_dir: &Path) -> Self {
        Self {
            work_dir: work_dir.to_path_buf(),
            masters: BTreeMap::new(),
            metadata_overrides: HashMap::new(),
            failing_checkins: HashSet::new(),
            failing_trunk_locks: HashSet::new(),
            failing_checkouts: HashSet::new(),
            calls: Vec::new(),
            archives: BTreeMap::new(),
            checked_out: BTreeSet::new(),
        }
    }

    /// Add a master with its deltas, oldest first
    pub fn with_master(mut self, stem: &str, deltas: Vec<FakeDelta>) -> Self {
        self.masters.insert(stem.to_string(), deltas);
        self
    }

    /// Make `prs -d` print `output` for one delta
    pub fn with_metadata_output(mut self, stem: &str, revision: &str, output: &str) -> Self {
        self.metadata_overrides
            .insert((stem.to_string(), revision.to_string()), output.to_string());
        self
    }

    /// Make `ci` fail for one delta
    pub fn failing_checkin(mut self, stem: &str, revision: &str) -> Self {
        self.failing_checkins
            .insert((stem.to_string(), revision.to_string()));
        self
    }

    /// Make `get -e` fail for one delta after it has taken the edit lock
    pub fn failing_checkout(mut self, stem: &str, revision: &str) -> Self {
        self.failing_checkouts
            .insert((stem.to_string(), revision.to_string()));
        self
    }

    /// Make `rcs -l` on the trunk fail for a file
    pub fn failing_trunk_lock(mut self, stem: &str) -> Self {
        self.failing_trunk_locks.insert(stem.to_string());
        self
    }

    pub fn archive(&self, stem: &str) -> Option<&FakeArchive> {
        self.archives.get(stem)
    }

    pub fn checkins(&self) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Checkin { .. }))
            .collect()
    }

    pub fn tags(&self) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Tag { .. }))
            .collect()
    }

    fn delta(&self, stem: &str, revision: &Revision) -> Result<&FakeDelta> {
        let rev = revision.to_string();
        self.masters
            .get(stem)
            .and_then(|deltas| deltas.iter().find(|d| d.revision == rev))
            .ok_or_else(|| failed(format!("prs -r{} SCCS/s.{}", rev, stem), "nonexistent SID"))
    }

    fn header(delta: &FakeDelta, seq: usize) -> String {
        format!(
            "D {} 94/03/27 12:00:00 {} {} {}\nMRs:\nCOMMENTS:\n{}\n",
            delta.revision,
            delta.author(),
            seq,
            seq - 1,
            delta.comment
        )
    }
}

fn failed(command: String, output: &str) -> Error {
    Error::CommandFailed {
        command,
        status: Some(1),
        output: output.to_string(),
    }
}

impl VersionControlBackend for FakeBackend {
    fn list_revisions(&mut self, stem: &str, log: &mut Transcript) -> Result<QueryOutput> {
        self.calls.push(Call::ListRevisions(stem.to_string()));
        let command = format!("prs SCCS/s.{}", stem);
        let deltas = self
            .masters
            .get(stem)
            .ok_or_else(|| failed(command.clone(), "not an SCCS file"))?;

        let mut text = format!("SCCS/s.{}:\n\n", stem);
        for (index, delta) in deltas.iter().enumerate().rev() {
            text.push_str(&Self::header(delta, index + 1));
            text.push('\n');
        }
        log.command(&command, &text);
        Ok(QueryOutput { command, text })
    }

    fn query_metadata(
        &mut self,
        stem: &str,
        revision: &Revision,
        log: &mut Transcript,
    ) -> Result<QueryOutput> {
        self.calls
            .push(Call::QueryMetadata(stem.to_string(), revision.to_string()));
        let command = format!(
            "prs -r{} '-d:Dd: :Dm: :Dy: :T: :P:' SCCS/s.{}",
            revision, stem
        );
        let key = (stem.to_string(), revision.to_string());
        let text = match self.metadata_overrides.get(&key) {
            Some(output) => output.clone(),
            None => format!("{}\n", self.delta(stem, revision)?.metadata),
        };
        log.command(&command, &text);
        Ok(QueryOutput { command, text })
    }

    fn query_comment(
        &mut self,
        stem: &str,
        revision: &Revision,
        log: &mut Transcript,
    ) -> Result<QueryOutput> {
        self.calls
            .push(Call::QueryComment(stem.to_string(), revision.to_string()));
        let command = format!("prs -r{} SCCS/s.{}", revision, stem);
        let text = format!(
            "SCCS/s.{}:\n\n{}",
            stem,
            Self::header(self.delta(stem, revision)?, 1)
        );
        log.command(&command, &text);
        Ok(QueryOutput { command, text })
    }

    fn checkout(
        &mut self,
        stem: &str,
        revision: &Revision,
        log: &mut Transcript,
    ) -> Result<PathBuf> {
        self.calls
            .push(Call::Checkout(stem.to_string(), revision.to_string()));
        let content = self.delta(stem, revision)?.content.clone();
        let path = self.work_dir.join(stem);
        fs::write(&path, content)?;
        let key = (stem.to_string(), revision.to_string());
        self.checked_out.insert(key.clone());
        let command = format!("get -e -r{} SCCS/s.{}", revision, stem);
        if self.failing_checkouts.contains(&key) {
            log.command(&command, "ERROR: write error\n");
            return Err(failed(command, "ERROR: write error"));
        }
        log.command(&command, format!("{}\nnew delta\n", revision));
        Ok(path)
    }

    fn checkin(&mut self, request: &CheckinRequest<'_>, log: &mut Transcript) -> Result<()> {
        let stem = request.stem.to_string();
        let revision = request.revision.to_string();
        let path = self.work_dir.join(&stem);
        let content = fs::read_to_string(&path)?;
        let command = format!(
            "ci -f -r{} '-d{}' -w{} {}",
            revision, request.date, request.author, stem
        );

        self.calls.push(Call::Checkin {
            stem: stem.clone(),
            revision: revision.clone(),
            date: request.date.to_string(),
            author: request.author.to_string(),
            message: request.message.to_string(),
            kind: request.kind.clone(),
            content: content.clone(),
        });

        if self.failing_checkins.contains(&(stem.clone(), revision.clone())) {
            log.command(&command, "ci error: checkin failed\n");
            return Err(failed(command, "ci error: checkin failed"));
        }

        let exists = self.archives.contains_key(&stem);
        let archive = match (&request.kind, exists) {
            (CheckinKind::Initial { description }, false) => {
                let archive = self.archives.entry(stem.clone()).or_default();
                archive.description = description.clone();
                archive
            }
            (CheckinKind::Initial { .. }, true) => {
                log.command(&command, "ci error: RCS file exists\n");
                return Err(failed(command, "ci error: RCS file exists"));
            }
            (CheckinKind::Incremental, false) => {
                log.command(&command, "ci error: no lock set\n");
                return Err(failed(command, "ci error: no lock set"));
            }
            (CheckinKind::Incremental, true) => self
                .archives
                .get_mut(&stem)
                .ok_or_else(|| failed(command.clone(), "no archive"))?,
        };
        archive.revisions.push(ArchivedRevision {
            revision: revision.clone(),
            date: request.date.to_string(),
            author: request.author.to_string(),
            message: request.message.to_string(),
            content,
        });

        fs::remove_file(&path)?;
        log.command(
            &command,
            format!("RCS/{},v  <--  {}\nnew revision: {}\ndone\n", stem, stem, revision),
        );
        Ok(())
    }

    fn lock(&mut self, stem: &str, scope: &LockScope, log: &mut Transcript) -> Result<()> {
        self.calls.push(Call::Lock(stem.to_string(), scope.clone()));
        let command = match scope {
            LockScope::Trunk => format!("rcs -l {}", stem),
            LockScope::Branch { parent } => format!("rcs -l{} {}", parent, stem),
        };

        let Some(archive) = self.archives.get(stem) else {
            log.command(&command, "rcs error: no such file\n");
            return Err(failed(command, "rcs error: no such file"));
        };
        let granted = match scope {
            LockScope::Trunk => !self.failing_trunk_locks.contains(stem),
            LockScope::Branch { parent } => {
                let prefix = format!("{}.", parent);
                archive
                    .revisions
                    .iter()
                    .any(|r| r.revision.starts_with(&prefix))
            }
        };
        if !granted {
            log.command(&command, "rcs error: revision absent\n");
            return Err(failed(command, "rcs error: revision absent"));
        }
        log.command(&command, "done\n");
        Ok(())
    }

    fn unlock(&mut self, stem: &str, revision: &Revision, log: &mut Transcript) -> Result<()> {
        self.calls
            .push(Call::Unlock(stem.to_string(), revision.to_string()));
        let command = format!("unget -r{} SCCS/s.{}", revision, stem);
        if !self
            .checked_out
            .remove(&(stem.to_string(), revision.to_string()))
        {
            log.command(&command, "ERROR: no outstanding deltas\n");
            return Err(failed(command, "ERROR: no outstanding deltas"));
        }
        log.command(&command, "");
        Ok(())
    }

    fn tag(
        &mut self,
        file: &str,
        name: &str,
        revision: &Revision,
        log: &mut Transcript,
    ) -> Result<()> {
        self.calls.push(Call::Tag {
            file: file.to_string(),
            name: name.to_string(),
            revision: revision.to_string(),
        });
        let command = format!("rcs -n{}:{} {}", name, revision, file);
        let rev = revision.to_string();
        let Some(archive) = self.archives.get_mut(file) else {
            log.command(&command, "rcs error: no such file\n");
            return Err(failed(command, "rcs error: no such file"));
        };
        if !archive.revisions.iter().any(|r| r.revision == rev) {
            log.command(&command, "rcs error: revision absent\n");
            return Err(failed(command, "rcs error: revision absent"));
        }
        archive.tags.insert(name.to_string(), rev);
        log.command(&command, "done\n");
        Ok(())
    }

    fn restore(&mut self, stem: &str, log: &mut Transcript) -> Result<()> {
        self.calls.push(Call::Restore(stem.to_string()));
        let command = format!("co RCS/{},v", stem);
        let content = self
            .archives
            .get(stem)
            .and_then(|a| a.revisions.last())
            .map(|r| r.content.clone())
            .ok_or_else(|| failed(command.clone(), "co error: no such file"))?;
        fs::write(self.work_dir.join(stem), content)?;
        log.command(&command, "done\n");
        Ok(())
    }
}

/// Create a working directory holding an SCCS directory with empty masters
///
/// Returns (TempDir, config) - keep the TempDir alive to prevent cleanup.
pub fn setup_workspace(stems: &[&str]) -> (TempDir, ConversionConfig) {
    let dir = tempfile::tempdir().unwrap();
    let sccs = dir.path().join("SCCS");
    fs::create_dir(&sccs).unwrap();
    for stem in stems {
        fs::write(sccs.join(format!("s.{}", stem)), "").unwrap();
    }
    let config = ConversionConfig::new(dir.path()).with_tool_dir(None);
    (dir, config)
}

/// Three deltas of foo.c: two on the trunk and one starting branch 1.2.1
pub fn branching_history() -> Vec<FakeDelta> {
    vec![
        delta(
            "1.1",
            "27 03 94 12:00:00 esr",
            "date and time created 94/03/27 12:00:00 by esr",
            "int main() { return 0; }\n",
        ),
        delta(
            "1.2",
            "28 03 94 10:00:00 esr",
            "second",
            "int main() { return 1; }\n",
        ),
        delta(
            "1.2.1.1",
            "02 04 94 09:15:00 brian",
            "branch fix",
            "int main() { return 2; }\n",
        ),
    ]
}
