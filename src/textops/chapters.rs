use log::info;
use once_cell::sync::Lazy;
use regex::Regex;

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::Result;

static CHAPTER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(Prologue|Chapter \d+|Epilogue)\b").expect("static regex is valid")
});

/// Split a story text file into one file per chapter, written next to the
/// input as `<stem>_<suffix>.txt`. Text before the first heading is
/// dropped. Returns the paths written.
pub fn split_chapters(input: &Path) -> Result<Vec<PathBuf>> {
    let content = fs::read_to_string(input)?;
    let lines: Vec<&str> = content.split_inclusive('\n').collect();

    let base_name = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let output_dir = input.parent().unwrap_or_else(|| Path::new("."));

    let mut heading_indices = Vec::new();
    let mut heading_titles = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if CHAPTER_RE.is_match(line.trim()) {
            heading_indices.push(i);
            heading_titles.push(line.trim().to_string());
        }
    }
    // Sentinel index so the last chapter runs to end of file
    heading_indices.push(lines.len());

    let mut written = Vec::new();
    let mut chapter_count = 1usize;
    for idx in 0..heading_indices.len() - 1 {
        let start = heading_indices[idx];
        let end = heading_indices[idx + 1];
        let title = heading_titles[idx].to_lowercase();

        let suffix = if title.contains("prologue") {
            "ch00_prologue".to_string()
        } else if title.contains("epilogue") {
            format!("ch{chapter_count:02}_epilogue")
        } else {
            let suffix = format!("ch{chapter_count:02}");
            chapter_count += 1;
            suffix
        };

        let output_file = output_dir.join(format!("{base_name}_{suffix}.txt"));
        fs::write(&output_file, lines[start..end].concat())?;
        info!("Wrote: {}", output_file.display());
        written.push(output_file);
    }

    Ok(written)
}
