use log::{info, warn};
use regex::RegexBuilder;
use rustc_hash::FxHashMap;

use std::fs;
use std::path::{Path, PathBuf};

use crate::batch::{BatchStats, Outcome};
use crate::core::error::Result;

/// Sprite names recognized by the `@sprites` counter preset.
pub const SPRITE_NAMES: [&str; 28] = [
    "admiration",
    "amusement",
    "anger",
    "annoyance",
    "approval",
    "caring",
    "confusion",
    "curiosity",
    "desire",
    "disappointment",
    "disapproval",
    "disgust",
    "embarrassment",
    "excitement",
    "fear",
    "gratitude",
    "grief",
    "joy",
    "love",
    "nervousness",
    "neutral",
    "optimism",
    "pride",
    "realization",
    "relief",
    "remorse",
    "sadness",
    "surprise",
];

#[derive(Debug, Clone)]
pub struct CounterOptions {
    /// Interpret the match expression as a regex instead of a word list
    pub regex: bool,
    /// Word list (`a|b|c`), `@sprites` preset, or regex pattern
    pub match_expr: String,
    /// Replace the whole stem instead of just the matched part
    pub full: bool,
    pub ignore_case: bool,
    /// Separator between the matched key and the counter
    pub delimiter: String,
    /// Zero-pad counters to this width (0 disables padding)
    pub pad: usize,
}

type RenamePair = (PathBuf, PathBuf);

/// Plan simple string replacement over file stems.
pub fn plan_replace(files: &[PathBuf], old: &str, new: &str) -> Vec<RenamePair> {
    files
        .iter()
        .map(|file| {
            let stem = stem_of(file);
            (file.clone(), with_stem(file, &stem.replace(old, new)))
        })
        .collect()
}

/// Plan regex replacement over file stems.
pub fn plan_regex_replace(
    files: &[PathBuf],
    pattern: &str,
    replacement: &str,
) -> Result<Vec<RenamePair>> {
    let re = regex::Regex::new(pattern)?;
    Ok(files
        .iter()
        .map(|file| {
            let stem = stem_of(file);
            let new_stem = re.replace_all(&stem, replacement).to_string();
            (file.clone(), with_stem(file, &new_stem))
        })
        .collect())
}

/// Plan per-match counters: every file whose stem matches the expression
/// gets `<key><delimiter><n>` spliced in, with one counter per distinct
/// key. Files are visited in sorted order so numbering is stable.
pub fn plan_counter(files: &[PathBuf], opts: &CounterOptions) -> Result<Vec<RenamePair>> {
    let mut sorted: Vec<PathBuf> = files.to_vec();
    sorted.sort();

    let mut counters: FxHashMap<String, usize> = FxHashMap::default();
    let mut renamed = Vec::with_capacity(sorted.len());

    if opts.regex {
        let pattern = RegexBuilder::new(&opts.match_expr)
            .case_insensitive(opts.ignore_case)
            .build()?;

        for file in sorted {
            let stem = stem_of(&file);
            match pattern.find(&stem).map(|m| m.as_str().to_string()) {
                Some(key) => {
                    let pair = numbered(&file, &stem, &key, &mut counters, opts);
                    renamed.push(pair);
                }
                None => renamed.push((file.clone(), file)),
            }
        }
    } else {
        let match_list = word_list(&opts.match_expr, opts.ignore_case);

        for file in sorted {
            let stem = if opts.ignore_case {
                stem_of(&file).to_lowercase()
            } else {
                stem_of(&file)
            };

            match match_list.iter().find(|word| stem.contains(*word)) {
                Some(key) => {
                    let key = key.clone();
                    let pair = numbered(&file, &stem, &key, &mut counters, opts);
                    renamed.push(pair);
                }
                None => renamed.push((file.clone(), file)),
            }
        }
    }

    Ok(renamed)
}

/// Carry out planned renames. Identity pairs are ignored; a destination
/// that already exists is skipped, never clobbered.
pub fn apply_renames(pairs: &[RenamePair], dry_run: bool) -> BatchStats {
    let mut stats = BatchStats::default();

    for (src, dst) in pairs {
        if src == dst {
            continue;
        }
        if dst.exists() {
            warn!("{} already exists. Skipping {}", dst.display(), src.display());
            stats.record(Outcome::Skipped);
            continue;
        }

        info!("{} -> {}", src.display(), dst.display());
        if dry_run {
            stats.record(Outcome::DryRun);
            continue;
        }

        match fs::rename(src, dst) {
            Ok(()) => stats.record(Outcome::Done),
            Err(err) => {
                warn!("Could not rename {}: {err}", src.display());
                stats.record(Outcome::Error);
            }
        }
    }

    stats
}

fn numbered(
    file: &Path,
    stem: &str,
    key: &str,
    counters: &mut FxHashMap<String, usize>,
    opts: &CounterOptions,
) -> RenamePair {
    let count = counters.entry(key.to_string()).or_insert(0);
    *count += 1;

    let number = if opts.pad > 0 {
        format!("{:0width$}", *count, width = opts.pad)
    } else {
        count.to_string()
    };

    let numbered_key = format!("{key}{}{number}", opts.delimiter);
    let new_stem = if opts.full {
        numbered_key
    } else {
        stem.replace(key, &numbered_key)
    };

    (file.to_path_buf(), with_stem(file, &new_stem))
}

fn word_list(match_expr: &str, ignore_case: bool) -> Vec<String> {
    let expr = if ignore_case {
        match_expr.to_lowercase()
    } else {
        match_expr.to_string()
    };

    if expr == "@sprites" {
        SPRITE_NAMES.iter().map(|s| s.to_string()).collect()
    } else if expr.contains('|') {
        expr.split('|').map(str::to_string).collect()
    } else {
        vec![expr]
    }
}

fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn with_stem(path: &Path, stem: &str) -> PathBuf {
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    path.with_file_name(format!("{stem}{ext}"))
}
