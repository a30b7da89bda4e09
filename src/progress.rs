use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Thin wrapper over an indicatif bar that can be disabled wholesale
/// (quiet mode, non-text output, tests).
pub struct ProgressReporter {
    bar: Option<ProgressBar>,
    enabled: bool,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        Self { bar: None, enabled }
    }

    /// Start a determinate bar over `total` units with a short label.
    pub fn start(&mut self, total: usize, message: &'static str) {
        if !self.enabled {
            return;
        }

        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg} ({eta})")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(120));
        self.bar = Some(pb);
    }

    pub fn inc(&self) {
        if let Some(ref pb) = self.bar {
            pb.inc(1);
        }
    }

    /// Print a line above the bar without disturbing it.
    pub fn println(&self, message: &str) {
        match self.bar {
            Some(ref pb) => pb.println(message),
            None => {
                if self.enabled {
                    println!("{message}");
                }
            }
        }
    }

    pub fn finish(&mut self, message: &'static str) {
        if let Some(pb) = self.bar.take() {
            pb.finish_with_message(message);
        }
    }

    pub fn finish_and_clear(&mut self) {
        if let Some(pb) = self.bar.take() {
            pb.finish_and_clear();
        }
    }
}
