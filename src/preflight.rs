// src/preflight.rs

//! Sanity checks before a conversion touches anything
//!
//! The working directory must be writable and hold an SCCS directory with no
//! deltas checked out for edit. An existing RCS directory is accepted only
//! if it is empty; otherwise one is created.

use crate::config::ConversionConfig;
use crate::error::{Error, Result};
use crate::transcript::Transcript;
use nix::unistd::{AccessFlags, access};
use std::fs;
use std::path::Path;

/// Prefix of SCCS master files
pub const MASTER_PREFIX: &str = "s.";

/// Prefix of SCCS edit-lock files
pub const LOCK_PREFIX: &str = "p.";

fn writable(path: &Path) -> bool {
    access(path, AccessFlags::W_OK).is_ok()
}

/// Check the directory layout and create the RCS directory
pub fn check(config: &ConversionConfig, log: &mut Transcript) -> Result<()> {
    if !writable(&config.work_dir) {
        return Err(Error::precondition(format!(
            "{} is not writeable by you.",
            config.work_dir.display()
        )));
    }

    let source = config.source_path();
    if !source.is_dir() {
        return Err(Error::precondition("no SCCS directory to convert."));
    }

    for stem in discover_stems(config)? {
        if source.join(format!("{}{}", LOCK_PREFIX, stem)).exists() {
            return Err(Error::precondition(format!(
                "{}{} is locked for edit...unlock before converting.",
                MASTER_PREFIX, stem
            )));
        }
    }

    prepare_target(config, log)
}

/// Accept an empty RCS directory or create a new one
pub fn prepare_target(config: &ConversionConfig, log: &mut Transcript) -> Result<()> {
    let target = config.target_path();
    if target.is_dir() {
        log.warn("RCS directory already exists.");
        if fs::read_dir(&target)?.next().is_some() {
            return Err(Error::precondition("RCS directory is nonempty."));
        }
        return Ok(());
    }

    fs::create_dir(&target).map_err(|source| Error::TargetArchive {
        path: target.clone(),
        source,
    })?;
    log.record(format!("created {}", target.display()));
    Ok(())
}

/// Stems of every SCCS master in the source directory, sorted by name
///
/// Returns an empty list if the source directory does not exist.
pub fn discover_stems(config: &ConversionConfig) -> Result<Vec<String>> {
    let source = config.source_path();
    if !source.is_dir() {
        return Ok(Vec::new());
    }

    let mut stems = Vec::new();
    for entry in fs::read_dir(&source)? {
        let entry = entry?;
        let name = entry.file_name();
        if let Some(stem) = name.to_str().and_then(|n| n.strip_prefix(MASTER_PREFIX))
            && !stem.is_empty()
        {
            stems.push(stem.to_string());
        }
    }
    stems.sort();
    Ok(stems)
}

/// Stems whose workfile is present in the working directory
pub fn existing_workfiles(config: &ConversionConfig, stems: &[String]) -> Vec<String> {
    stems
        .iter()
        .filter(|stem| config.workfile(stem).exists())
        .cloned()
        .collect()
}
