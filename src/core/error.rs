use std::fmt;

/// Error type covering every utility in the crate.
#[derive(Debug)]
pub enum BatchError {
    /// IO error (file operations, etc.)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// HTTP client error
    Http(reqwest::Error),

    /// Path expansion error
    PathExpansion(String),

    /// Regex compilation error
    Regex(regex::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// JSON (de)serialization error
    Json(serde_json::Error),

    /// CSV (de)serialization error
    Csv(csv::Error),

    /// Image decode/encode error
    Image(image::ImageError),

    /// Invalid argument error
    InvalidArgument(String),

    /// File walking/ignore error
    FileWalking(ignore::Error),
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchError::Io(err) => write!(f, "IO error: {err}"),
            BatchError::Config(msg) => write!(f, "Configuration error: {msg}"),
            BatchError::Http(err) => write!(f, "HTTP error: {err}"),
            BatchError::PathExpansion(msg) => write!(f, "Path expansion error: {msg}"),
            BatchError::Regex(err) => write!(f, "Regex error: {err}"),
            BatchError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            BatchError::Json(err) => write!(f, "JSON error: {err}"),
            BatchError::Csv(err) => write!(f, "CSV error: {err}"),
            BatchError::Image(err) => write!(f, "Image error: {err}"),
            BatchError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            BatchError::FileWalking(err) => write!(f, "File walking error: {err}"),
        }
    }
}

impl std::error::Error for BatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BatchError::Io(err) => Some(err),
            BatchError::Http(err) => Some(err),
            BatchError::Regex(err) => Some(err),
            BatchError::TomlParsing(err) => Some(err),
            BatchError::Json(err) => Some(err),
            BatchError::Csv(err) => Some(err),
            BatchError::Image(err) => Some(err),
            BatchError::FileWalking(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BatchError {
    fn from(err: std::io::Error) -> Self {
        BatchError::Io(err)
    }
}

impl From<reqwest::Error> for BatchError {
    fn from(err: reqwest::Error) -> Self {
        BatchError::Http(err)
    }
}

impl From<regex::Error> for BatchError {
    fn from(err: regex::Error) -> Self {
        BatchError::Regex(err)
    }
}

impl From<toml::de::Error> for BatchError {
    fn from(err: toml::de::Error) -> Self {
        BatchError::TomlParsing(err)
    }
}

impl From<serde_json::Error> for BatchError {
    fn from(err: serde_json::Error) -> Self {
        BatchError::Json(err)
    }
}

impl From<csv::Error> for BatchError {
    fn from(err: csv::Error) -> Self {
        BatchError::Csv(err)
    }
}

impl From<image::ImageError> for BatchError {
    fn from(err: image::ImageError) -> Self {
        BatchError::Image(err)
    }
}

impl From<ignore::Error> for BatchError {
    fn from(err: ignore::Error) -> Self {
        BatchError::FileWalking(err)
    }
}

/// Type alias for Results using BatchError
pub type Result<T> = std::result::Result<T, BatchError>;
