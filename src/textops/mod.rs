//! Text and file-organization batch operations.

pub mod chapters;
pub mod convert;
pub mod organize;
pub mod rename;

pub use chapters::split_chapters;
pub use convert::{convert_file, DataFormat};
pub use organize::organize_dir;
pub use rename::{apply_renames, plan_counter, plan_regex_replace, plan_replace, CounterOptions};
