//! Background removal through a rembg-compatible matting service.
//!
//! Model inference stays out of process: image bytes are POSTed to the
//! service and the response body is the cut-out PNG with an alpha channel.

use image::GrayImage;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::batch::{write_decision, Outcome};
use crate::core::error::{BatchError, Result};

/// Short aliases accepted on the command line, mapped to the service's
/// model names.
pub const MODEL_ALIASES: [(&str, &str); 5] = [
    ("u2", "u2net"),
    ("u2p", "u2netp"),
    ("human", "u2net_human_seg"),
    ("silu", "silueta"),
    ("isnet", "isnet-general-use"),
];

/// Resolve a model alias to one or more service model names. `all` expands
/// to every known model.
pub fn resolve_models(alias: &str) -> Result<Vec<String>> {
    let alias = alias.to_ascii_lowercase();
    if alias == "all" {
        return Ok(MODEL_ALIASES.iter().map(|(_, m)| m.to_string()).collect());
    }

    MODEL_ALIASES
        .iter()
        .find(|(short, _)| *short == alias)
        .map(|(_, model)| vec![model.to_string()])
        .ok_or_else(|| BatchError::InvalidArgument(format!("unknown model: {alias}")))
}

/// Filename suffix distinguishing outputs when several models run in one
/// batch; empty for a single-model run.
pub fn model_suffix(model: &str, multi_model: bool) -> String {
    if multi_model {
        format!("_{}", model.replace('-', ""))
    } else {
        String::new()
    }
}

/// HTTP client for the matting service.
pub struct MattingClient {
    client: reqwest::Client,
    endpoint: String,
}

impl MattingClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    /// Send one image through the service and return the cut-out bytes.
    pub async fn remove_background(&self, image: Vec<u8>, model: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("model", model)])
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(image)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.bytes().await?.to_vec())
    }
}

/// Pull the alpha channel out of a cut-out PNG as a grayscale mask.
pub fn extract_alpha_mask(png_bytes: &[u8]) -> Result<GrayImage> {
    let img = image::load_from_memory(png_bytes)?.to_rgba8();
    let (width, height) = img.dimensions();
    Ok(GrayImage::from_fn(width, height, |x, y| {
        image::Luma([img.get_pixel(x, y).0[3]])
    }))
}

/// Where the exported mask for `output` goes: a `masks/` subdirectory next
/// to the output file.
pub fn mask_export_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    output
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("masks")
        .join(format!("{stem}_mask.png"))
}

/// Run one file through the service and write the cut-out (and optionally
/// its mask) under `output_path`.
pub async fn process_file(
    client: &MattingClient,
    input: &Path,
    output_path: &Path,
    model: &str,
    save_mask: bool,
    overwrite: bool,
    dry_run: bool,
) -> Result<Outcome> {
    if let Some(outcome) = write_decision(output_path, overwrite, dry_run) {
        return Ok(outcome);
    }

    let input_bytes = fs::read(input)?;
    let output_bytes = client.remove_background(input_bytes, model).await?;

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(output_path, &output_bytes)?;

    if save_mask {
        let mask = extract_alpha_mask(&output_bytes)?;
        let mask_path = mask_export_path(output_path);
        if let Some(parent) = mask_path.parent() {
            fs::create_dir_all(parent)?;
        }
        mask.save(&mask_path)?;
    }

    Ok(Outcome::Done)
}
