// src/revision.rs

//! Revision identifiers shared by SCCS and RCS
//!
//! Both systems name a delta with a dotted sequence of non-negative integers:
//!
//! - `1.3` - a trunk revision (two segments)
//! - `1.3.1.2` - the second revision on the first branch off `1.3`
//!
//! The number of segments is the revision's depth. Depth 2 lives on the
//! trunk; anything deeper lives on a branch, and the identifier with its
//! last segment removed names the revision the branch line hangs off.

use std::fmt;
use std::str::FromStr;

/// A dotted revision identifier such as `1.2` or `1.2.1.1`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Revision {
    segments: Vec<u32>,
}

impl Revision {
    /// Parse a revision from its dotted form
    pub fn parse(s: &str) -> Result<Self, RevisionParseError> {
        if s.is_empty() {
            return Err(RevisionParseError::Empty);
        }

        let segments = s
            .split('.')
            .map(|seg| {
                if seg.is_empty() || !seg.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(RevisionParseError::InvalidSegment {
                        revision: s.to_string(),
                        segment: seg.to_string(),
                    });
                }
                seg.parse::<u32>()
                    .map_err(|_| RevisionParseError::InvalidSegment {
                        revision: s.to_string(),
                        segment: seg.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { segments })
    }

    /// Number of dot-separated segments
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// True for revisions deeper than the trunk
    pub fn is_branch(&self) -> bool {
        self.depth() > 2
    }

    /// The identifier with its last segment removed
    ///
    /// `1.2.1.1` -> `1.2.1`, `1.2` -> `1`. Returns None for a
    /// single-segment revision.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.len() < 2 {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// The raw numeric segments
    pub fn segments(&self) -> &[u32] {
        &self.segments
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for seg in &self.segments {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{}", seg)?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for Revision {
    type Err = RevisionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Revision::parse(s)
    }
}

/// Errors that can occur when parsing a revision identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevisionParseError {
    /// Empty identifier
    Empty,
    /// A segment that is empty or not a non-negative integer
    InvalidSegment { revision: String, segment: String },
}

impl fmt::Display for RevisionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RevisionParseError::Empty => write!(f, "Empty revision identifier"),
            RevisionParseError::InvalidSegment { revision, segment } => {
                write!(f, "Invalid segment '{}' in revision: {}", segment, revision)
            }
        }
    }
}

impl std::error::Error for RevisionParseError {}
