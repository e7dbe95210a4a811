//! Progress bar display for the fetch and removal phases

use indicatif::{ProgressBar, ProgressStyle};

/// Single overwritable status line for one phase
pub struct PhaseProgress {
    bar: ProgressBar,
}

impl PhaseProgress {
    /// Bar for the concurrent metadata fetch
    pub fn fetch(total: u64) -> Self {
        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} packages fetched")
            .unwrap()
            .progress_chars("#>-");

        let bar = ProgressBar::new(total);
        bar.set_style(style);
        Self { bar }
    }

    /// Bar for the sequential removal batch; the message carries the running
    /// error count
    pub fn removal(total: u64) -> Self {
        let style = ProgressStyle::default_bar()
            .template("[{bar:40.green/yellow}] {msg}")
            .unwrap()
            .progress_chars("#>-");

        let bar = ProgressBar::new(total);
        bar.set_style(style);
        bar.set_message(format!("0/{total} packages uninstalled (0 errors)"));
        Self { bar }
    }

    pub fn set_completed(&self, done: u64) {
        self.bar.set_position(done);
    }

    pub fn set_message(&self, message: impl Into<String>) {
        self.bar.set_message(message.into());
    }

    pub fn inc(&self) {
        self.bar.inc(1);
    }

    pub fn finish(&self) {
        self.bar.finish();
    }
}
