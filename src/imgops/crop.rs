use image::RgbaImage;
use log::info;

use std::fs;
use std::path::Path;

use crate::batch::{write_decision, Outcome};
use crate::core::error::Result;

/// Bounding box `(x, y, width, height)` of the non-transparent pixels, or
/// `None` for a fully transparent image.
pub fn alpha_bbox(img: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    let mut any = false;

    for (x, y, pixel) in img.enumerate_pixels() {
        if pixel.0[3] != 0 {
            any = true;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    if !any {
        return None;
    }
    Some((min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
}

/// Formats that can carry an alpha channel worth cropping against.
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "png" | "webp" | "gif"))
        .unwrap_or(false)
}

/// Crop one image to its non-transparent bounding box and save it to
/// `dest`. Fully transparent images are skipped.
pub fn crop_file(input: &Path, dest: &Path, overwrite: bool, dry_run: bool) -> Result<Outcome> {
    let img = image::open(input)?.to_rgba8();

    let Some((x, y, width, height)) = alpha_bbox(&img) else {
        info!("Skipping empty image: {}", input.display());
        return Ok(Outcome::Skipped);
    };

    if let Some(outcome) = write_decision(dest, overwrite, dry_run) {
        return Ok(outcome);
    }

    let cropped = image::imageops::crop_imm(&img, x, y, width, height).to_image();
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    cropped.save(dest)?;

    Ok(Outcome::Done)
}
