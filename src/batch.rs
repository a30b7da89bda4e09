//! Shared per-file outcome accounting and the write policy
//! (dry-run / overwrite / skip) every batch tool follows.

use std::fmt;
use std::path::Path;

/// What happened to a single file in a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Done,
    Skipped,
    DryRun,
    Error,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Outcome::Done => "done",
            Outcome::Skipped => "skipped",
            Outcome::DryRun => "dry-run",
            Outcome::Error => "error",
        };
        write!(f, "{label}")
    }
}

/// Counters for a batch run, printed as a summary at the end.
#[derive(Debug, Default, Clone, Copy)]
pub struct BatchStats {
    pub done: usize,
    pub skipped: usize,
    pub dry_run: usize,
    pub errors: usize,
}

impl BatchStats {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Done => self.done += 1,
            Outcome::Skipped => self.skipped += 1,
            Outcome::DryRun => self.dry_run += 1,
            Outcome::Error => self.errors += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.done + self.skipped + self.dry_run + self.errors
    }

    pub fn summary(&self) -> String {
        format!(
            "Summary:\n  done: {}\n  skipped: {}\n  dry-run: {}\n  errors: {}",
            self.done, self.skipped, self.dry_run, self.errors
        )
    }
}

/// Decide whether a destination should be written.
///
/// Existing destinations are skipped unless `overwrite` is set; dry-run
/// always wins over an actual write.
pub fn write_decision(dest: &Path, overwrite: bool, dry_run: bool) -> Option<Outcome> {
    if dest.exists() && !overwrite {
        return Some(Outcome::Skipped);
    }
    if dry_run {
        return Some(Outcome::DryRun);
    }
    None
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use std::fs;

    #[test]
    fn test_batch_stats_record_and_total() {
        let mut stats = BatchStats::default();
        stats.record(Outcome::Done);
        stats.record(Outcome::Done);
        stats.record(Outcome::Skipped);
        stats.record(Outcome::DryRun);
        stats.record(Outcome::Error);

        assert_eq!(stats.done, 2);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.dry_run, 1);
        assert_eq!(stats.errors, 1);
        assert_eq!(stats.total(), 5);
    }

    #[test]
    fn test_batch_stats_summary_lists_all_buckets() {
        let mut stats = BatchStats::default();
        stats.record(Outcome::Done);
        let summary = stats.summary();
        assert!(summary.contains("done: 1"));
        assert!(summary.contains("skipped: 0"));
        assert!(summary.contains("dry-run: 0"));
        assert!(summary.contains("errors: 0"));
    }

    #[test]
    fn test_write_decision__when_dest_exists_without_overwrite() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dest = temp_dir.path().join("out.png");
        fs::write(&dest, "x").unwrap();

        assert_eq!(
            write_decision(&dest, false, false),
            Some(Outcome::Skipped)
        );
        // Overwrite takes the skip away
        assert_eq!(write_decision(&dest, true, false), None);
        // Dry-run still reported even with overwrite
        assert_eq!(
            write_decision(&dest, true, true),
            Some(Outcome::DryRun)
        );
    }

    #[test]
    fn test_write_decision__when_dest_missing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dest = temp_dir.path().join("new.png");

        assert_eq!(write_decision(&dest, false, false), None);
        assert_eq!(write_decision(&dest, false, true), Some(Outcome::DryRun));
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::Done.to_string(), "done");
        assert_eq!(Outcome::DryRun.to_string(), "dry-run");
    }
}
