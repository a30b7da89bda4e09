//! Core types shared across the crate.

pub mod constants;
pub mod error;

pub use error::{BatchError, Result};
