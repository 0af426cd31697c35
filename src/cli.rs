// src/cli.rs
//! CLI definitions for sccs2rcs
//!
//! The actual command implementation is in the `commands` module.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sccs2rcs")]
#[command(author = "sccs2rcs Contributors")]
#[command(version)]
#[command(
    about = "Convert an SCCS history into an RCS history",
    long_about = "Convert the SCCS history in ./SCCS into an RCS history in ./RCS, \
                  preserving every delta's date, author, comment and branch position. \
                  ./SCCS is never altered. If a step fails the run stops, prints its log, \
                  and ./RCS must be removed before trying again."
)]
pub struct Cli {
    /// Description table for initial check-ins (lines of `filename:description`)
    #[arg(short = 'c', long = "comments", value_name = "FILE")]
    pub comments: Option<PathBuf>,

    /// Directory containing the SCCS directory to convert
    #[arg(short = 'C', long, value_name = "DIR", default_value = ".")]
    pub directory: PathBuf,

    /// Extra directory searched for SCCS/RCS tools
    #[arg(long, value_name = "DIR", default_value = sccs2rcs::config::DEFAULT_TOOL_DIR)]
    pub tool_dir: PathBuf,

    /// Print the full command log after a successful conversion
    #[arg(long)]
    pub show_log: bool,

    /// Don't show progress bars
    #[arg(short, long)]
    pub quiet: bool,
}
