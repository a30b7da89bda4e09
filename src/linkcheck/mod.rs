//! Link extraction and concurrent validation pipeline.
//!
//! Four stages, each feeding the next: HTML file discovery, anchor
//! extraction with URL resolution, bounded concurrent reachability
//! probing, and per-file aggregation/rendering.

pub mod checker;
pub mod discovery;
pub mod extract;
pub mod report;

// Re-export commonly used items
pub use checker::{CheckOutcome, Checker, CheckerOptions, ProbeLinks};
pub use discovery::find_html_files;
pub use extract::{extract_links, resolve_href, ExtractedLinks, ResolvedHref};
pub use report::{build_summary, render_summary, FileSummary, Summary};
