// src/history/enumerate.rs

//! Listing the deltas of an SCCS master

use crate::backend::VersionControlBackend;
use crate::error::{Error, Result};
use crate::revision::Revision;
use crate::transcript::Transcript;

/// Extract revision identifiers from a `prs` listing, oldest first
///
/// `prs` prints one `D <rev> <date> <time> <user> <seq> <pred>` line per
/// delta, newest first. Every other line is ignored.
pub fn parse_revision_listing(stem: &str, listing: &str) -> Result<Vec<Revision>> {
    let mut revisions = Vec::new();
    for line in listing.lines() {
        if !line.starts_with("D ") {
            continue;
        }
        let id = line
            .split_whitespace()
            .nth(1)
            .ok_or_else(|| Error::MalformedRevisionLine {
                stem: stem.to_string(),
                line: line.to_string(),
            })?;
        revisions.push(Revision::parse(id)?);
    }
    revisions.reverse();
    Ok(revisions)
}

/// Query the source archive for `stem`'s revisions, oldest first
pub fn enumerate_revisions<B>(
    backend: &mut B,
    stem: &str,
    log: &mut Transcript,
) -> Result<Vec<Revision>>
where
    B: VersionControlBackend + ?Sized,
{
    let listing = backend.list_revisions(stem, log)?;
    parse_revision_listing(stem, &listing.text)
}
