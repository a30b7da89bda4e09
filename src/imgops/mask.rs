use image::{DynamicImage, GrayImage, RgbaImage};

use std::fs;
use std::path::{Path, PathBuf};

use crate::batch::{write_decision, Outcome};
use crate::core::error::{BatchError, Result};

/// Replace the alpha channel of `img` with the mask's luma values.
/// Dimensions must match.
pub fn apply_mask_image(img: &DynamicImage, mask: &GrayImage) -> Result<RgbaImage> {
    let mut rgba = img.to_rgba8();
    if rgba.dimensions() != mask.dimensions() {
        return Err(BatchError::InvalidArgument(format!(
            "mask dimensions {:?} do not match image dimensions {:?}",
            mask.dimensions(),
            rgba.dimensions()
        )));
    }

    for (pixel, luma) in rgba.pixels_mut().zip(mask.pixels()) {
        pixel.0[3] = luma.0[0];
    }

    Ok(rgba)
}

/// Where the mask for `image` lives: `<mask_dir>/<stem>_mask.png`.
pub fn mask_path_for(image: &Path, mask_dir: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    mask_dir.join(format!("{stem}_mask.png"))
}

/// Apply a saved mask to one image and write the result to `dest`.
pub fn apply_mask_file(
    image_path: &Path,
    mask_path: &Path,
    dest: &Path,
    overwrite: bool,
    dry_run: bool,
) -> Result<Outcome> {
    if dest == image_path {
        return Err(BatchError::InvalidArgument(format!(
            "output path is the same as the input path: {}",
            dest.display()
        )));
    }

    if let Some(outcome) = write_decision(dest, overwrite, dry_run) {
        return Ok(outcome);
    }

    let img = image::open(image_path)?;
    let mask = image::open(mask_path)?.to_luma8();
    let masked = apply_mask_image(&img, &mask)?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    masked.save(dest)?;

    Ok(Outcome::Done)
}
