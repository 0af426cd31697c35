// src/history/tags.rs

//! Symbolic names from Emacs VC snapshots
//!
//! Emacs VC mode records SCCS snapshots in `SCCS/VC-names`, one line per
//! file per snapshot:
//!
//! ```text
//! REL1_0 : src/myfile.c 1.3
//! ```
//!
//! The whole table is parsed before any name is applied, so a bad line
//! aborts the conversion without leaving half of the names in RCS.

use crate::backend::VersionControlBackend;
use crate::error::{Error, Result};
use crate::revision::Revision;
use crate::transcript::Transcript;
use std::fs;
use std::path::Path;

/// One symbolic name to attach to an RCS revision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    /// File as written in the table (may include directories)
    pub file: String,
    pub revision: Revision,
}

impl Tag {
    /// The workfile name RCS should be pointed at
    pub fn target_file(&self) -> &str {
        Path::new(&self.file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.file)
    }
}

/// Parse a snapshot table
///
/// Each non-blank line must be exactly `name <ignored> file revision`.
pub fn parse_tag_table(text: &str) -> Result<Vec<Tag>> {
    let mut tags = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let [name, _, file, revision] = tokens[..] else {
            return Err(Error::MalformedTagLine(line.to_string()));
        };
        tags.push(Tag {
            name: name.to_string(),
            file: file.to_string(),
            revision: Revision::parse(revision)?,
        });
    }
    Ok(tags)
}

/// Read and parse the snapshot table at `path`, if there is one
pub fn load_tag_table(path: &Path) -> Result<Option<Vec<Tag>>> {
    if !path.exists() {
        return Ok(None);
    }
    let text = fs::read_to_string(path)?;
    parse_tag_table(&text).map(Some)
}

/// Apply parsed tags to the RCS archive, returning how many were applied
pub fn import_tags<B>(backend: &mut B, tags: &[Tag], log: &mut Transcript) -> Result<usize>
where
    B: VersionControlBackend + ?Sized,
{
    for tag in tags {
        backend.tag(tag.target_file(), &tag.name, &tag.revision, log)?;
        log.record(format!(
            "tagged {} revision {} as {}",
            tag.target_file(),
            tag.revision,
            tag.name
        ));
    }
    Ok(tags.len())
}
