use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashMap;
use serde::Serialize;

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::core::constants::output_formats;
use crate::core::error::{BatchError, Result};
use crate::linkcheck::checker::CheckOutcome;

static YEAR_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})\b").expect("static regex is valid"));

/// Per-file link buckets. `old` is a non-exclusive tag: a stale link also
/// appears in `ok` or `fail` according to its reachability.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub ok: Vec<String>,
    pub fail: Vec<String>,
    pub old: Vec<String>,
}

/// Summaries keyed by source file path, ordered by path for reproducible
/// output.
pub type Summary = BTreeMap<String, FileSummary>;

/// Whether any bare 4-digit token in `url` parses as a year in
/// `[current_year - years_back, current_year)`.
pub fn is_stale(url: &str, current_year: i32, years_back: i32) -> bool {
    YEAR_TOKEN
        .find_iter(url)
        .filter_map(|token| token.as_str().parse::<i32>().ok())
        .any(|year| year >= current_year - years_back && year < current_year)
}

/// Group check results back by origin file.
///
/// Only probed links appear: anything excluded or capped before the check
/// stage never entered `results` and is absent here. `current_year` is
/// injected rather than read from the clock so the stale window is
/// deterministic under test.
pub fn build_summary(
    results: &FxHashMap<String, CheckOutcome>,
    origins: &FxHashMap<String, PathBuf>,
    current_year: i32,
    years_back: i32,
) -> Summary {
    let mut urls: Vec<&String> = results.keys().collect();
    urls.sort();

    let mut summary = Summary::new();
    for url in urls {
        let outcome = &results[url];
        let source_file = origins
            .get(url)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "UNKNOWN".to_string());

        let entry = summary.entry(source_file).or_default();
        if outcome.reachable {
            entry.ok.push(url.clone());
        } else {
            entry.fail.push(url.clone());
        }
        if is_stale(url, current_year, years_back) {
            entry.old.push(url.clone());
        }
    }

    summary
}

/// Render a summary in one of the supported formats.
pub fn render_summary(summary: &Summary, format: &str) -> Result<String> {
    match format {
        output_formats::JSON => render_json(summary),
        output_formats::CSV => render_csv(summary),
        output_formats::TEXT => Ok(render_text(summary)),
        other => Err(BatchError::InvalidArgument(format!(
            "unknown output format '{other}'"
        ))),
    }
}

fn render_text(summary: &Summary) -> String {
    let mut out = String::new();
    for (i, (file, buckets)) in summary.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(file);
        out.push('\n');
        for (tag, urls) in categories(buckets) {
            for url in urls {
                out.push_str(&format!("{:>7} {url}\n", format!("[{tag}]")));
            }
        }
    }
    out
}

fn render_json(summary: &Summary) -> Result<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}

fn render_csv(summary: &Summary) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["source_file", "status", "url"])
        .map_err(BatchError::from)?;

    for (file, buckets) in summary {
        for (tag, urls) in categories(buckets) {
            let status = tag.to_ascii_lowercase();
            for url in urls {
                writer
                    .write_record([file.as_str(), status.as_str(), url.as_str()])
                    .map_err(BatchError::from)?;
            }
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| BatchError::InvalidArgument(format!("CSV buffer error: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| BatchError::InvalidArgument(format!("CSV output was not UTF-8: {e}")))
}

fn categories(buckets: &FileSummary) -> [(&'static str, &Vec<String>); 3] {
    [
        ("OK", &buckets.ok),
        ("FAIL", &buckets.fail),
        ("OLD", &buckets.old),
    ]
}
