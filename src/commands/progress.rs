// src/commands/progress.rs
//! Terminal progress for conversions
//!
//! An overall bar counting SCCS masters with a status line below showing the
//! delta being replayed.

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use sccs2rcs::progress::ProgressTracker;
use std::time::Duration;

/// Progress bar + status spinner for a conversion run
pub struct ConversionProgress {
    // Keeps the bars drawn together
    _multi: MultiProgress,
    overall: ProgressBar,
    status: ProgressBar,
}

impl ConversionProgress {
    pub fn new() -> Self {
        let multi = MultiProgress::new();

        let overall = ProgressBar::new(0);
        overall.set_style(
            ProgressStyle::default_bar()
                .template("{msg} ({pos}/{len}) [{bar:40.green/dim}] {percent}%")
                .expect("Invalid progress bar template")
                .progress_chars("##-"),
        );
        overall.set_message("Converting");

        let status = ProgressBar::new_spinner();
        status.set_style(
            ProgressStyle::default_spinner()
                .template("  {spinner:.cyan} {msg}")
                .expect("Invalid spinner template"),
        );
        status.enable_steady_tick(Duration::from_millis(100));

        let overall = multi.add(overall);
        let status = multi.add(status);

        Self {
            _multi: multi,
            overall,
            status,
        }
    }
}

impl ProgressTracker for ConversionProgress {
    fn set_message(&self, message: &str) {
        self.status.set_message(message.to_string());
    }

    fn increment(&self, amount: u64) {
        self.overall.inc(amount);
    }

    fn set_length(&self, length: u64) {
        self.overall.set_length(length);
    }

    fn position(&self) -> u64 {
        self.overall.position()
    }

    fn finish_with_message(&self, message: &str) {
        self.status.finish_and_clear();
        self.overall.finish_with_message(message.to_string());
    }

    fn finish_with_error(&self, message: &str) {
        self.status.finish_and_clear();
        self.overall.abandon_with_message(message.to_string());
    }
}
