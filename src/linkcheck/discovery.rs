use std::path::{Path, PathBuf};

use crate::core::error::{BatchError, Result};

/// Recursively collect every file under `root` whose extension is `.html`
/// (case-insensitive). Symlinked directories are not followed, which keeps
/// cyclic link farms from recursing forever. A missing root is fatal.
pub fn find_html_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(BatchError::PathExpansion(format!(
            "'{}' is not a directory",
            root.display()
        )));
    }

    let mut builder = ignore::WalkBuilder::new(root);
    builder
        .hidden(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .follow_links(false);

    let mut html_files = Vec::new();
    for entry in builder.build() {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && is_html(path) {
            html_files.push(path.to_path_buf());
        }
    }

    html_files.sort();
    Ok(html_files)
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html"))
}
