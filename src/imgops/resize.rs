use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use log::warn;

use std::fs;
use std::path::Path;

use crate::batch::{write_decision, Outcome};
use crate::core::error::{BatchError, Result};

/// What to do with images already at or below the target height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmallerPolicy {
    /// Scale them up to the target height
    Upscale,
    /// Copy them through unchanged
    Keep,
    /// Leave them out of the batch
    Skip,
}

impl SmallerPolicy {
    pub fn from_str(value: &str) -> Result<Self> {
        match value {
            "upscale" => Ok(Self::Upscale),
            "keep" => Ok(Self::Keep),
            "skip" => Ok(Self::Skip),
            other => Err(BatchError::InvalidArgument(format!(
                "invalid resize-smaller policy '{other}'. Expected upscale, keep or skip."
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResizeOptions {
    pub target_height: u32,
    pub prefix: String,
    pub suffix: String,
    pub smaller: SmallerPolicy,
    pub overwrite: bool,
    pub dry_run: bool,
}

/// Scale to the target height, preserving aspect ratio, with Lanczos
/// resampling.
pub fn resize_to_height(img: &DynamicImage, target_height: u32) -> DynamicImage {
    let (width, height) = img.dimensions();
    let scale = f64::from(target_height) / f64::from(height);
    let new_width = ((f64::from(width) * scale) as u32).max(1);
    img.resize_exact(new_width, target_height, FilterType::Lanczos3)
}

/// Decorated output file name: `<prefix><stem><suffix><.ext>`.
pub fn output_name(path: &Path, prefix: &str, suffix: &str) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    format!("{prefix}{stem}{suffix}{ext}")
}

/// Resize a single file into `out_dir` under the decorated name.
pub fn process_file(path: &Path, out_dir: &Path, opts: &ResizeOptions) -> Result<Outcome> {
    let img = image::open(path)?;
    let original_height = img.height();

    if original_height <= opts.target_height {
        warn!(
            "Image smaller than target height: {} ({}px <= {}px)",
            path.display(),
            original_height,
            opts.target_height
        );
        if opts.smaller == SmallerPolicy::Skip {
            return Ok(Outcome::Skipped);
        }
    }

    let dest = out_dir.join(output_name(path, &opts.prefix, &opts.suffix));
    if let Some(outcome) = write_decision(&dest, opts.overwrite, opts.dry_run) {
        return Ok(outcome);
    }

    fs::create_dir_all(out_dir)?;
    if original_height <= opts.target_height && opts.smaller == SmallerPolicy::Keep {
        img.save(&dest)?;
    } else {
        resize_to_height(&img, opts.target_height).save(&dest)?;
    }

    Ok(Outcome::Done)
}

/// Extensions the resizer accepts.
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            matches!(
                ext.to_ascii_lowercase().as_str(),
                "png" | "jpg" | "jpeg"
            )
        })
        .unwrap_or(false)
}
