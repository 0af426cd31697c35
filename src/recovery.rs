// src/recovery.rs

//! Recovery after a fatal conversion error
//!
//! There is no rollback. SCCS history is only ever read and lock-cycled, so
//! recovery releases the SCCS edit locks the run itself took and did not
//! give back, tells the operator to remove the partial ./RCS, and dumps the
//! transcript. Locks held before the run started are never touched.
//! Rerunning after `rm -rf RCS` starts from scratch.

use crate::backend::VersionControlBackend;
use crate::error::Error;
use crate::history::PendingEdit;
use crate::transcript::Transcript;
use std::io::{self, Write};
use tracing::warn;

/// Printed after a fatal error, before the transcript
pub const DANGER: &str = "\
Danger!  Danger!
Incomplete history in ./RCS -- remove it.
Original unchanged history in ./SCCS.
";

/// Which edit locks were released during recovery
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecoveryReport {
    pub released: Vec<PendingEdit>,
    pub failed: Vec<PendingEdit>,
}

/// Release each pending edit lock, best effort
pub fn release_pending<B>(
    backend: &mut B,
    pending: &[PendingEdit],
    log: &mut Transcript,
) -> RecoveryReport
where
    B: VersionControlBackend + ?Sized,
{
    log.record("error recovery begins");

    let mut report = RecoveryReport::default();
    for edit in pending {
        match backend.unlock(&edit.stem, &edit.revision, log) {
            Ok(()) => report.released.push(edit.clone()),
            Err(e) => {
                warn!("unget of {} failed during recovery: {}", edit, e);
                report.failed.push(edit.clone());
            }
        }
    }
    report
}

/// Write the fatal-error banner, warning and transcript
pub fn write_report(out: &mut dyn Write, err: &Error, log: &Transcript) -> io::Result<()> {
    writeln!(out, "sccs2rcs: fatal error, {}", err)?;
    write!(out, "{}", DANGER)?;
    if !log.is_empty() {
        writeln!(out, "Log follows:")?;
        write!(out, "{}", log)?;
        writeln!(out, "Log ends here.")?;
    }
    Ok(())
}
