use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::core::error::{BatchError, Result};

/// Expand a mix of files and directories into a flat file list.
///
/// Directories are walked recursively only when `recursive` is set;
/// otherwise naming a directory is an error. Extension matching is
/// case-insensitive. Symlinked directories are not followed.
pub fn expand_paths(
    input_paths: Vec<&Path>,
    recursive: bool,
    extensions: Option<&HashSet<String>>,
) -> Result<Vec<PathBuf>> {
    let mut result_paths = Vec::new();

    for path in input_paths {
        if path.is_file() {
            if matches_extension(path, extensions) {
                result_paths.push(path.to_path_buf());
            }
        } else if path.is_dir() && recursive {
            let mut builder = ignore::WalkBuilder::new(path);
            builder.hidden(false);

            for entry in builder.build() {
                let entry = entry?;
                let entry_path = entry.path();

                if entry_path.is_file() && matches_extension(entry_path, extensions) {
                    result_paths.push(entry_path.to_path_buf());
                }
            }
        } else if path.is_dir() {
            return Err(BatchError::PathExpansion(format!(
                "'{}' is a directory. Use --recursive to process directories.",
                path.display()
            )));
        } else {
            return Err(BatchError::PathExpansion(format!(
                "'{}' does not exist",
                path.display()
            )));
        }
    }

    result_paths.sort();
    Ok(result_paths)
}

fn matches_extension(path: &Path, extensions: Option<&HashSet<String>>) -> bool {
    let Some(extensions) = extensions else {
        return true;
    };

    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => extensions.contains(&ext.to_ascii_lowercase()),
        None => extensions.contains(""),
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use std::fs;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    fn extensions(exts: &[&str]) -> HashSet<String> {
        exts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_expand_paths__single_file() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        let file = temp_dir.path().join("a.png");
        fs::write(&file, "x")?;

        let result = expand_paths(vec![&file], false, None)?;

        assert_eq!(result, vec![file]);
        Ok(())
    }

    #[test]
    fn test_expand_paths__extension_filter_is_case_insensitive() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        let upper = temp_dir.path().join("SHOT.PNG");
        let lower = temp_dir.path().join("shot.jpg");
        fs::write(&upper, "x")?;
        fs::write(&lower, "x")?;

        let result = expand_paths(vec![&upper, &lower], false, Some(&extensions(&["png"])))?;

        assert_eq!(result, vec![upper]);
        Ok(())
    }

    #[test]
    fn test_expand_paths__directory_without_recursive_fails() -> TestResult {
        let temp_dir = tempfile::tempdir()?;

        let result = expand_paths(vec![temp_dir.path()], false, None);

        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("is a directory. Use --recursive")
        );
        Ok(())
    }

    #[test]
    fn test_expand_paths__recursive_with_filter() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        let base = temp_dir.path();
        fs::create_dir_all(base.join("sub/nested"))?;
        fs::write(base.join("top.png"), "x")?;
        fs::write(base.join("sub/mid.jpeg"), "x")?;
        fs::write(base.join("sub/nested/deep.png"), "x")?;
        fs::write(base.join("sub/skip.txt"), "x")?;

        let result = expand_paths(
            vec![base],
            true,
            Some(&extensions(&["png", "jpeg"])),
        )?;

        let names: Vec<String> = result
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(result.len(), 3);
        assert!(names.contains(&"top.png".to_string()));
        assert!(names.contains(&"mid.jpeg".to_string()));
        assert!(names.contains(&"deep.png".to_string()));
        Ok(())
    }

    #[test]
    fn test_expand_paths__missing_path_fails() {
        let result = expand_paths(vec![Path::new("/definitely/not/here")], false, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_expand_paths__output_is_sorted() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        let base = temp_dir.path();
        fs::write(base.join("b.txt"), "x")?;
        fs::write(base.join("a.txt"), "x")?;
        fs::write(base.join("c.txt"), "x")?;

        let result = expand_paths(vec![base], true, None)?;
        let mut sorted = result.clone();
        sorted.sort();

        assert_eq!(result, sorted);
        Ok(())
    }
}
