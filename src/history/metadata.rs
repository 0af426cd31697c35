// src/history/metadata.rs

//! Delta dates and authors
//!
//! SCCS reports a delta's date as two-digit day, month and year. RCS wants
//! `27 Mar 1994 12:00:00`. Two-digit years below 70 are taken to be in the
//! 2000s and everything else in the 1900s; archives from before 1970 or
//! after 2069 cannot be represented.

use crate::backend::VersionControlBackend;
use crate::error::{Error, Result};
use crate::revision::Revision;
use crate::transcript::Transcript;
use chrono::Month;

/// Date and author of one delta, ready for an RCS check-in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeltaMetadata {
    /// RCS date string, `<day> <Mon> <yyyy> <hh:mm:ss>`
    pub date: String,
    pub author: String,
}

/// Expand a two-digit SCCS year: `69` -> `2069`, `70` -> `1970`
pub fn expand_year(year: &str) -> Option<String> {
    if year.len() != 2 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u32 = year.parse().ok()?;
    let century = if value < 70 { "20" } else { "19" };
    Some(format!("{}{}", century, year))
}

/// Three-letter English abbreviation for a 1-based month number
pub fn month_abbrev(month: &str) -> Option<&'static str> {
    let number: u8 = month.parse().ok()?;
    let month = Month::try_from(number).ok()?;
    Some(&month.name()[..3])
}

/// Parse `day month year time author` as printed by `prs -d`
///
/// `command` is only used to describe the failure.
pub fn parse_metadata(command: &str, output: &str) -> Result<DeltaMetadata> {
    let malformed = || Error::MalformedMetadata {
        command: command.to_string(),
        output: output.trim().to_string(),
    };

    let tokens: Vec<&str> = output.split_whitespace().collect();
    let [day, month, year, time, author] = tokens[..] else {
        return Err(malformed());
    };

    let month = month_abbrev(month).ok_or_else(malformed)?;
    let year = expand_year(year).ok_or_else(malformed)?;

    Ok(DeltaMetadata {
        date: format!("{} {} {} {}", day, month, year, time),
        author: author.to_string(),
    })
}

/// Query and parse the metadata of one delta
pub fn extract_metadata<B>(
    backend: &mut B,
    stem: &str,
    revision: &Revision,
    log: &mut Transcript,
) -> Result<DeltaMetadata>
where
    B: VersionControlBackend + ?Sized,
{
    let query = backend.query_metadata(stem, revision, log)?;
    parse_metadata(&query.command, &query.text)
}
