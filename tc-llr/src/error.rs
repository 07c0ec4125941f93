//! Error and warning types for a listing run.
//!
//! Only setup failures are errors. Everything that goes wrong with a single
//! test case file is a [`FileWarning`]: it is logged, recorded in the report
//! and the walk carries on.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Fatal failures that abort the whole run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ListingError {
    /// The root directory does not exist.
    #[error("Root directory does not exist: {}", path.display())]
    RootNotFound {
        /// The path given as root.
        path: PathBuf,
    },
    /// The root path exists but is not a directory.
    #[error("Root is not a directory: {}", path.display())]
    RootNotDirectory {
        /// The path given as root.
        path: PathBuf,
    },
    /// An output artifact could not be created or written.
    #[error("Cannot write output file {}: {source}", path.display())]
    OutputUnwritable {
        /// The artifact path.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// The kind of per-file problem encountered during the run.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub enum WarningKind {
    /// No line contains the `REQUIREMENTS` marker.
    MissingHeading,
    /// The heading was found but no identifier follows it.
    NoRequirements,
    /// An I/O error occurred while reading the file.
    IoError,
    /// The file content is not valid UTF-8.
    InvalidEncoding,
    /// The file exceeded the configured maximum size limit.
    FileTooLarge,
    /// A directory traversal error (permission denied, loop detected, etc.).
    WalkError,
}

/// A problem with a single test case file or directory entry.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct FileWarning {
    /// The path the warning refers to.
    pub file: PathBuf,
    /// The kind of problem.
    pub kind: WarningKind,
    /// Human-readable description.
    pub message: String,
}

impl FileWarning {
    /// Create a warning for `file`.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            kind,
            message: message.into(),
        }
    }

    /// Format the warning for human-readable output.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        format!("{}: [warning] {}", self.file.display(), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_warning() {
        let warning = FileWarning::new(
            "cases/TC_001.txt",
            WarningKind::MissingHeading,
            "Could not find LLR requirements",
        );
        let formatted = warning.format_human_readable();
        assert!(formatted.starts_with("cases/TC_001.txt"));
        assert!(formatted.contains("[warning] Could not find LLR requirements"));
    }

    #[test]
    fn test_fatal_error_messages() {
        let err = ListingError::RootNotFound {
            path: PathBuf::from("missing"),
        };
        assert_eq!(err.to_string(), "Root directory does not exist: missing");

        let err = ListingError::OutputUnwritable {
            path: PathBuf::from("out/results.csv"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("out/results.csv"));
        assert!(err.to_string().contains("denied"));
    }
}
