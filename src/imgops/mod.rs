//! Image batch operations: resize, mask application, transparent crop.

pub mod crop;
pub mod mask;
pub mod resize;

pub use crop::{alpha_bbox, crop_file};
pub use mask::{apply_mask_file, apply_mask_image, mask_path_for};
pub use resize::{output_name, resize_to_height, ResizeOptions, SmallerPolicy};
