//! Listing report types.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::FileWarning;

/// One row of the results table.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct ReportRow {
    /// Test case file name.
    pub test_case: String,
    /// Full path of the test case file.
    pub path: PathBuf,
    /// Identifiers in the order found, duplicates kept. Empty when the
    /// heading or the identifiers are missing.
    pub requirements: Vec<String>,
}

impl ReportRow {
    /// The "Requirements Covered" cell: identifiers joined by newlines.
    #[must_use]
    pub fn requirements_cell(&self) -> String {
        self.requirements.join("\n")
    }
}

/// Result of a listing run.
///
/// `rows` mirrors the table written to disk. Files that could not be read
/// appear only in `warnings` and are counted in `skipped_files`.
#[derive(Debug, Clone, Default, Serialize)]
#[non_exhaustive]
pub struct ListingReport {
    /// Number of directories visited (hidden ones excluded).
    pub directories_visited: usize,
    /// Number of test case files that produced a row.
    pub processed_files: usize,
    /// Number of test case files that could not be read.
    pub skipped_files: usize,
    /// Table rows in traversal order.
    pub rows: Vec<ReportRow>,
    /// Per-file warnings in the order they occurred.
    pub warnings: Vec<FileWarning>,
}

impl ListingReport {
    /// Number of rows whose requirements cell is empty.
    #[must_use]
    pub fn files_without_requirements(&self) -> usize {
        self.rows.iter().filter(|r| r.requirements.is_empty()).count()
    }

    /// Total number of identifiers listed, duplicates included.
    #[must_use]
    pub fn total_requirements(&self) -> usize {
        self.rows.iter().map(|r| r.requirements.len()).sum()
    }

    /// Distinct identifiers covered across all test cases, sorted.
    #[must_use]
    pub fn distinct_requirements(&self) -> BTreeSet<&str> {
        self.rows
            .iter()
            .flat_map(|r| r.requirements.iter().map(String::as_str))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, tokens: &[&str]) -> ReportRow {
        ReportRow {
            test_case: name.to_owned(),
            path: PathBuf::from(name),
            requirements: tokens.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn test_counts() {
        let report = ListingReport {
            processed_files: 3,
            rows: vec![
                row("TC_01.txt", &["IMMC_LLR_002", "IMMC_LLR_001"]),
                row("TC_02.txt", &[]),
                row("TC_03.txt", &["IMMC_LLR_001"]),
            ],
            ..ListingReport::default()
        };

        assert_eq!(report.files_without_requirements(), 1);
        assert_eq!(report.total_requirements(), 3);
        assert_eq!(
            report.distinct_requirements().into_iter().collect::<Vec<_>>(),
            vec!["IMMC_LLR_001", "IMMC_LLR_002"]
        );
    }

    #[test]
    fn test_requirements_cell() {
        assert_eq!(
            row("TC_01.txt", &["IMMC_LLR_001", "IMMC_LLR_002"]).requirements_cell(),
            "IMMC_LLR_001\nIMMC_LLR_002"
        );
        assert_eq!(row("TC_02.txt", &[]).requirements_cell(), "");
    }
}
