//! Per-repetition progress reporting

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::config::ExperimentConfig;

/// Receives the number of repetitions completed so far.
///
/// Purely observational: runners behave identically with or without one.
pub trait ProgressSink: Send + Sync {
    fn advance(&self, completed: u64);

    fn finish(&self) {}
}

/// Hands out one sink per configuration in a batch
pub trait ProgressFactory: Sync {
    fn sink_for(&self, config: &ExperimentConfig) -> Box<dyn ProgressSink>;
}

/// Discards all progress
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn advance(&self, _completed: u64) {}
}

impl ProgressFactory for NoProgress {
    fn sink_for(&self, _config: &ExperimentConfig) -> Box<dyn ProgressSink> {
        Box::new(NoProgress)
    }
}

impl ProgressSink for ProgressBar {
    fn advance(&self, completed: u64) {
        self.set_position(completed);
    }

    fn finish(&self) {
        ProgressBar::finish(self);
    }
}

/// One terminal progress bar per configuration
pub struct TerminalProgress {
    bars: MultiProgress,
    style: ProgressStyle,
}

impl TerminalProgress {
    pub fn new() -> Self {
        let style = ProgressStyle::with_template(
            "{prefix:>18} [{bar:40.cyan/blue}] {pos}/{len} ({per_sec}, eta {eta})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
        Self {
            bars: MultiProgress::new(),
            style,
        }
    }
}

impl Default for TerminalProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressFactory for TerminalProgress {
    fn sink_for(&self, config: &ExperimentConfig) -> Box<dyn ProgressSink> {
        let bar = self.bars.add(ProgressBar::new(config.repetitions));
        bar.set_style(self.style.clone());
        bar.set_prefix(config.label());
        Box::new(bar)
    }
}
