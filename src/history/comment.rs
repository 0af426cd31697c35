// src/history/comment.rs

//! Delta comments
//!
//! `prs -r<rev>` prints the delta's header lines (the `D` line, `MRs:` and
//! so on) before a `COMMENTS:` line; everything after that line is the
//! comment the user typed.

use crate::backend::VersionControlBackend;
use crate::error::Result;
use crate::revision::Revision;
use crate::transcript::Transcript;

/// Line prefix ending the header block of a delta description
pub const COMMENTS_MARKER: &str = "COMMENTS";

/// Pull the free-text comment out of a delta description
///
/// Drops every line up to and including the first `COMMENTS` line. Leading
/// blank lines are then stripped, except when what remains is exactly two
/// empty lines, which is kept as is.
pub fn parse_comment(description: &str) -> String {
    let mut lines = description.lines();
    for line in lines.by_ref() {
        if line.starts_with(COMMENTS_MARKER) {
            break;
        }
    }

    let mut body: Vec<&str> = lines.collect();
    if body != ["", ""] {
        let first_text = body
            .iter()
            .position(|line| !line.trim().is_empty())
            .unwrap_or(body.len());
        body.drain(..first_text);
    }
    body.join("\n")
}

/// Query and parse the comment of one delta
pub fn extract_comment<B>(
    backend: &mut B,
    stem: &str,
    revision: &Revision,
    log: &mut Transcript,
) -> Result<String>
where
    B: VersionControlBackend + ?Sized,
{
    let query = backend.query_comment(stem, revision, log)?;
    Ok(parse_comment(&query.text))
}
