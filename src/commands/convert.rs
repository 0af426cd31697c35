// src/commands/convert.rs

//! The conversion command

use super::progress::ConversionProgress;
use crate::cli::Cli;
use anyhow::{Context, Result};
use sccs2rcs::progress::{LogProgress, ProgressTracker, SilentProgress};
use sccs2rcs::{ConversionConfig, Converter, SccsRcsBackend, recovery};
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;
use tracing::info;

/// Convert ./SCCS under `cli.directory` into ./RCS
///
/// Returns a failure exit code after a fatal conversion error; the recovery
/// report and transcript have already been printed by then.
pub fn cmd_convert(cli: &Cli) -> Result<ExitCode> {
    let mut config =
        ConversionConfig::new(&cli.directory).with_tool_dir(Some(cli.tool_dir.clone()));
    if let Some(comments) = &cli.comments {
        config = config.with_descriptions(comments);
    }

    info!("Converting SCCS history in {}", config.source_path().display());

    let backend = SccsRcsBackend::new(&config);
    let mut converter = Converter::new(config, backend);

    // Bars draw on stderr; when that is a file or pipe, log progress instead
    let progress: Box<dyn ProgressTracker> = if cli.quiet {
        Box::new(SilentProgress::new())
    } else if io::stderr().is_terminal() {
        Box::new(ConversionProgress::new())
    } else {
        Box::new(LogProgress::new("convert", 0))
    };

    match converter.run(progress.as_ref()) {
        Ok(report) => {
            println!(
                "Converted {} revisions of {} files",
                report.revision_count(),
                report.files.len()
            );
            if report.tags_applied > 0 {
                println!("  Tags applied: {}", report.tags_applied);
            }
            if !report.restored.is_empty() {
                println!("  Workfiles restored: {}", report.restored.join(", "));
            }
            if cli.show_log {
                print!("{}", converter.transcript());
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            progress.finish_with_error(&err.to_string());
            let released = converter.recover();
            info!(
                "Released {} SCCS locks during recovery ({} failed)",
                released.released.len(),
                released.failed.len()
            );

            let stderr = io::stderr();
            let mut out = stderr.lock();
            recovery::write_report(&mut out, &err, converter.transcript())
                .context("Failed to print the conversion log")?;
            out.flush().context("Failed to print the conversion log")?;
            Ok(ExitCode::FAILURE)
        }
    }
}
