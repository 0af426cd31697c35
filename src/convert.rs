// src/convert.rs

//! Top-level conversion driver
//!
//! Runs the whole conversion for one working directory: description table,
//! preflight checks, replay of every SCCS master, tags, and workfile
//! restoration. Any fatal error is returned unchanged; the caller decides
//! when to run `recover()` and print the transcript.

use crate::backend::VersionControlBackend;
use crate::config::ConversionConfig;
use crate::descriptions::DescriptionTable;
use crate::error::Result;
use crate::history::{FileReport, PendingEdit, ReplayEngine, import_tags, load_tag_table};
use crate::preflight;
use crate::progress::ProgressTracker;
use crate::recovery::{self, RecoveryReport};
use crate::transcript::Transcript;
use tracing::info;

/// Summary of a successful conversion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    /// One entry per SCCS master, in processing order
    pub files: Vec<FileReport>,
    pub tags_applied: usize,
    /// Workfiles checked back out of RCS
    pub restored: Vec<String>,
}

impl ConversionReport {
    /// Total number of deltas replayed across all files
    pub fn revision_count(&self) -> usize {
        self.files.iter().map(|f| f.revisions.len()).sum()
    }
}

/// Owns the backend and transcript for one conversion run
pub struct Converter<B: VersionControlBackend> {
    config: ConversionConfig,
    backend: B,
    transcript: Transcript,
    pending: Vec<PendingEdit>,
}

impl<B: VersionControlBackend> Converter<B> {
    pub fn new(config: ConversionConfig, backend: B) -> Self {
        Self {
            config,
            backend,
            transcript: Transcript::new(),
            pending: Vec::new(),
        }
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Run the conversion
    pub fn run(&mut self, progress: &dyn ProgressTracker) -> Result<ConversionReport> {
        self.pending.clear();
        let descriptions = match &self.config.descriptions {
            Some(path) => Some(DescriptionTable::load(path)?),
            None => None,
        };

        preflight::check(&self.config, &mut self.transcript)?;

        let stems = preflight::discover_stems(&self.config)?;
        let workfiles = preflight::existing_workfiles(&self.config, &stems);
        progress.set_length(stems.len() as u64);
        info!("Converting {} SCCS masters", stems.len());

        let mut report = ConversionReport::default();
        let replayed = {
            let mut engine =
                ReplayEngine::new(&mut self.backend, descriptions.as_ref(), progress);
            let mut outcome = Ok(());
            for stem in &stems {
                match engine.replay_file(stem, &mut self.transcript) {
                    Ok(file) => {
                        report.files.push(file);
                        progress.increment(1);
                    }
                    Err(e) => {
                        outcome = Err(e);
                        break;
                    }
                }
            }
            self.pending = engine.pending().to_vec();
            outcome
        };
        replayed?;

        if let Some(tags) = load_tag_table(&self.config.tag_table_path())? {
            report.tags_applied = import_tags(&mut self.backend, &tags, &mut self.transcript)?;
        }

        if !workfiles.is_empty() {
            self.transcript.progress("replacing workfiles...");
        }
        for stem in workfiles {
            match self.backend.restore(&stem, &mut self.transcript) {
                Ok(()) => report.restored.push(stem),
                Err(e) => self
                    .transcript
                    .record(format!("could not restore workfile {}: {}", stem, e)),
            }
        }

        self.transcript.progress("done.");
        progress.finish_with_message("done.");
        Ok(report)
    }

    /// SCCS edit locks taken by the last run and still held
    pub fn pending(&self) -> &[PendingEdit] {
        &self.pending
    }

    /// Release the SCCS edit locks a failed run left behind
    pub fn recover(&mut self) -> RecoveryReport {
        let pending = std::mem::take(&mut self.pending);
        recovery::release_pending(&mut self.backend, &pending, &mut self.transcript)
    }
}
