// src/backend/sccs_rcs.rs

//! Backend driving the real SCCS and RCS command-line tools
//!
//! SCCS side (read and lock-cycle only, the master is never rewritten):
//! - `prs` for revision listings, delta metadata and comments
//! - `get -e` to check a revision out for editing
//! - `unget` to release the edit lock again
//!
//! RCS side:
//! - `ci -f` with explicit revision, date and author
//! - `rcs -l` for locks, `rcs -n` for symbolic names
//! - `co` to restore read-only workfiles at the end

use super::tool::ToolRunner;
use super::{CheckinKind, CheckinRequest, LockScope, QueryOutput, VersionControlBackend};
use crate::config::ConversionConfig;
use crate::error::Result;
use crate::revision::Revision;
use crate::transcript::Transcript;
use std::path::PathBuf;

/// `prs` data keywords yielding `day month year time author`
pub const METADATA_FORMAT: &str = ":Dd: :Dm: :Dy: :T: :P:";

/// Backend built on the system's SCCS and RCS tools
#[derive(Debug, Clone)]
pub struct SccsRcsBackend {
    config: ConversionConfig,
    runner: ToolRunner,
}

impl SccsRcsBackend {
    /// Create a backend operating in `config.work_dir`
    pub fn new(config: &ConversionConfig) -> Self {
        Self {
            runner: ToolRunner::new(&config.work_dir, config.tool_dir.as_deref()),
            config: config.clone(),
        }
    }

    pub fn runner(&self) -> &ToolRunner {
        &self.runner
    }

    fn master(&self, stem: &str) -> String {
        self.config.master(stem).display().to_string()
    }

    fn query(&self, args: Vec<String>, log: &mut Transcript) -> Result<QueryOutput> {
        let output = self.runner.run("prs", &args, None, log)?;
        Ok(QueryOutput {
            command: output.command,
            text: output.stdout,
        })
    }
}

impl VersionControlBackend for SccsRcsBackend {
    fn list_revisions(&mut self, stem: &str, log: &mut Transcript) -> Result<QueryOutput> {
        self.query(vec![self.master(stem)], log)
    }

    fn query_metadata(
        &mut self,
        stem: &str,
        revision: &Revision,
        log: &mut Transcript,
    ) -> Result<QueryOutput> {
        self.query(
            vec![
                format!("-d{}", METADATA_FORMAT),
                format!("-r{}", revision),
                self.master(stem),
            ],
            log,
        )
    }

    fn query_comment(
        &mut self,
        stem: &str,
        revision: &Revision,
        log: &mut Transcript,
    ) -> Result<QueryOutput> {
        self.query(vec![format!("-r{}", revision), self.master(stem)], log)
    }

    fn checkout(
        &mut self,
        stem: &str,
        revision: &Revision,
        log: &mut Transcript,
    ) -> Result<PathBuf> {
        self.runner.run(
            "get",
            &[
                "-e".to_string(),
                format!("-r{}", revision),
                self.master(stem),
            ],
            None,
            log,
        )?;
        Ok(self.config.workfile(stem))
    }

    fn checkin(&mut self, request: &CheckinRequest<'_>, log: &mut Transcript) -> Result<()> {
        let mut args = vec![
            "-f".to_string(),
            format!("-r{}", request.revision),
            format!("-d{}", request.date),
            format!("-w{}", request.author),
        ];
        if let CheckinKind::Initial { description } = &request.kind {
            args.push(match description {
                Some(text) => format!("-t-{}", text),
                None => "-t/dev/null".to_string(),
            });
        }
        args.push(request.stem.to_string());

        self.runner.run("ci", &args, Some(request.message), log)?;
        Ok(())
    }

    fn lock(&mut self, stem: &str, scope: &LockScope, log: &mut Transcript) -> Result<()> {
        let args = match scope {
            LockScope::Trunk => vec!["-l".to_string(), stem.to_string()],
            LockScope::Branch { parent } => vec![format!("-l{}", parent), stem.to_string()],
        };
        self.runner.run("rcs", &args, None, log)?;
        Ok(())
    }

    fn unlock(&mut self, stem: &str, revision: &Revision, log: &mut Transcript) -> Result<()> {
        self.runner.run(
            "unget",
            &[format!("-r{}", revision), self.master(stem)],
            None,
            log,
        )?;
        Ok(())
    }

    fn tag(
        &mut self,
        file: &str,
        name: &str,
        revision: &Revision,
        log: &mut Transcript,
    ) -> Result<()> {
        self.runner.run(
            "rcs",
            &[format!("-n{}:{}", name, revision), file.to_string()],
            None,
            log,
        )?;
        Ok(())
    }

    fn restore(&mut self, stem: &str, log: &mut Transcript) -> Result<()> {
        let archive = self.config.archive(stem).display().to_string();
        self.runner.run("co", &[archive], None, log)?;
        Ok(())
    }
}
