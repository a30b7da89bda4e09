use chrono::NaiveDate;
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use std::fs;
use std::path::{Path, PathBuf};

use crate::batch::Outcome;
use crate::core::error::Result;

static DATE_DIR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("static regex is valid"));

/// Whether a directory name has the `YYYY-MM-DD` shape.
pub fn is_date_dir_name(name: &str) -> bool {
    DATE_DIR_RE.is_match(name)
}

/// Parse a date-shaped name, rejecting impossible dates (2025-13-40).
pub fn parse_date_dir_name(name: &str) -> Option<NaiveDate> {
    if !is_date_dir_name(name) {
        return None;
    }
    NaiveDate::parse_from_str(name, "%Y-%m-%d").ok()
}

/// Destination for a dated directory: `<parent>/<YYYY>/<MM>/<name>`.
pub fn target_for(path: &Path, name: &str) -> PathBuf {
    let year = &name[0..4];
    let month = &name[5..7];
    path.parent()
        .unwrap_or_else(|| Path::new("."))
        .join(year)
        .join(month)
        .join(name)
}

/// Move one `YYYY-MM-DD` directory under `YYYY/MM/` if it is strictly in
/// the past. `today` is injected so behavior is deterministic under test.
pub fn organize_dir(path: &Path, today: NaiveDate, dry_run: bool) -> Result<Outcome> {
    if !path.is_dir() {
        debug!("Skipping (not a dir): {}", path.display());
        return Ok(Outcome::Skipped);
    }

    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name.to_string(),
        None => return Ok(Outcome::Skipped),
    };

    let Some(dir_date) = parse_date_dir_name(&name) else {
        debug!("Skipping (not a valid date): {}", path.display());
        return Ok(Outcome::Skipped);
    };

    if dir_date >= today {
        debug!("Skipping (current or future date): {}", path.display());
        return Ok(Outcome::Skipped);
    }

    let dest = target_for(path, &name);
    if dest.exists() {
        warn!("Skipping (target exists): {}", dest.display());
        return Ok(Outcome::Skipped);
    }

    info!(
        "{} {} -> {}",
        if dry_run { "Would move" } else { "Moving" },
        path.display(),
        dest.display()
    );
    if dry_run {
        return Ok(Outcome::DryRun);
    }

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::rename(path, &dest)?;

    Ok(Outcome::Done)
}
