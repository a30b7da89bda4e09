/// Application-wide constants shared by the binaries.
/// Output format constants for the link checker report
pub mod output_formats {
    /// Plain text grouped by source file
    pub const TEXT: &str = "text";
    /// Nested JSON mapping file -> category -> URLs
    pub const JSON: &str = "json";
    /// Flat CSV rows of (source_file, status, url)
    pub const CSV: &str = "csv";

    /// Default output format
    pub const DEFAULT: &str = TEXT;

    /// All valid output formats
    pub const ALL: [&str; 3] = [TEXT, JSON, CSV];
}

/// Link checker defaults
pub mod checker {
    /// Default per-probe timeout in seconds
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 5;
    /// Default number of probes in flight
    pub const DEFAULT_CONCURRENCY: usize = 10;
    /// Maximum redirects followed per probe
    pub const MAX_REDIRECTS: usize = 10;
    /// Reachable status range, lower bound inclusive
    pub const REACHABLE_MIN: u16 = 200;
    /// Reachable status range, upper bound exclusive
    pub const REACHABLE_MAX: u16 = 400;
}

/// Stale-link tagging defaults
pub mod stale {
    /// Trailing window of years considered "old"
    pub const DEFAULT_YEARS_BACK: i32 = 5;
}

/// Background-removal service defaults
pub mod matting {
    /// Default endpoint of the matting service
    pub const DEFAULT_ENDPOINT: &str = "http://localhost:7000/api/remove";
    /// Default model alias
    pub const DEFAULT_MODEL: &str = "u2";
}
