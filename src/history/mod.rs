// src/history/mod.rs

//! Replaying SCCS history into RCS
//!
//! For each SCCS master the converter:
//! 1. Enumerates its deltas oldest first (`enumerate`)
//! 2. Pulls date, author and comment for each delta (`metadata`, `comment`)
//! 3. Checks each delta out, translates keywords, and checks it into RCS
//!    under the right lock (`replay`)
//!
//! Symbolic names from an Emacs VC snapshot table are applied once every
//! file has been replayed (`tags`).

pub mod comment;
pub mod enumerate;
pub mod metadata;
pub mod replay;
pub mod tags;

pub use comment::{extract_comment, parse_comment};
pub use enumerate::{enumerate_revisions, parse_revision_listing};
pub use metadata::{expand_year, extract_metadata, parse_metadata, DeltaMetadata};
pub use replay::{
    FileReport, PendingEdit, Protocol, ReplayEngine, ReplayState, ReplayedRevision,
};
pub use tags::{import_tags, load_tag_table, parse_tag_table, Tag};
