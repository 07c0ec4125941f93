//! Configuration types for a listing run.
//!
//! The naming convention (file prefix, extension, heading marker and
//! identifier pattern) is fixed. The look-ahead tolerance, read limits and
//! output locations are configurable.

use std::path::PathBuf;

/// Glob selecting test case file names: `TC` prefix, `.txt` extension,
/// both case-sensitive.
pub const TEST_CASE_GLOB: &str = "TC*.txt";

/// Marker locating the requirements section. Matched case-insensitively.
pub const HEADING_MARKER: &str = "REQUIREMENTS";

/// Pattern of a low-level requirement identifier. Matched case-sensitively.
pub const REQUIREMENT_PATTERN: &str = r"IMMC_LLR_[0-9]+";

/// Default path of the plain-text run log.
pub const DEFAULT_LOG_PATH: &str = "./results.log";

/// Default path of the comma-separated results table.
pub const DEFAULT_TABLE_PATH: &str = "./results.csv";

/// Options controlling discovery and extraction.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ListingConfig {
    /// Root directory of the test case tree. Required.
    pub root: PathBuf,
    /// Number of non-matching lines tolerated between the heading and the
    /// first requirement (default: 1, for an optional blank separator).
    pub blank_line_tolerance: usize,
    /// Maximum file size in bytes (default: 10 MB).
    pub max_file_size: u64,
    /// Whether to follow symbolic links (default: `false`).
    pub follow_links: bool,
}

impl ListingConfig {
    /// Config for `root` with every other option at its default.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            blank_line_tolerance: 1,
            max_file_size: 10_485_760,
            follow_links: false,
        }
    }
}

/// Locations of the two run artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct OutputPaths {
    /// Plain-text progress log.
    pub log: PathBuf,
    /// Comma-separated table of test cases and requirements.
    pub table: PathBuf,
}

impl OutputPaths {
    /// Output paths with explicit locations.
    #[must_use]
    pub fn new(log: impl Into<PathBuf>, table: impl Into<PathBuf>) -> Self {
        Self {
            log: log.into(),
            table: table.into(),
        }
    }
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_PATH, DEFAULT_TABLE_PATH)
    }
}
