//! # tc-llr
//!
//! Lists the low-level requirements (LLRs) covered by test case text files.
//!
//! Every `TC*.txt` file under a root directory is searched for a
//! `REQUIREMENTS` heading; the `IMMC_LLR_<n>` identifiers listed directly
//! below it are written to a comma-separated table, one row per test case,
//! while progress and warnings go to a plain-text log.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tc_llr::{ListingConfig, OutputPaths, run_listing};
//!
//! let config = ListingConfig::new("test_cases");
//! let report = run_listing(&config, &OutputPaths::default()).unwrap();
//! println!("Test cases listed: {}", report.processed_files);
//! println!("Without requirements: {}", report.files_without_requirements());
//! ```

mod config;
mod error;
pub mod extract;
pub mod output;
mod report;
pub mod sink;
pub mod walk;

pub use config::{
    DEFAULT_LOG_PATH, DEFAULT_TABLE_PATH, HEADING_MARKER, ListingConfig, OutputPaths,
    REQUIREMENT_PATTERN, TEST_CASE_GLOB,
};
pub use error::{FileWarning, ListingError, WarningKind};
pub use report::{ListingReport, ReportRow};
pub use sink::{CsvTable, RunLog};

use std::io::Write;
use std::path::Path;

use tracing::{debug, info, warn};

use extract::scan_test_case;
use walk::{TestCaseFile, find_test_cases, read_file_bounded};

/// Check that the root exists and is a directory.
///
/// # Errors
///
/// Returns [`ListingError::RootNotFound`] or [`ListingError::RootNotDirectory`].
pub fn validate_root(root: &Path) -> Result<(), ListingError> {
    if !root.exists() {
        return Err(ListingError::RootNotFound {
            path: root.to_path_buf(),
        });
    }
    if !root.is_dir() {
        return Err(ListingError::RootNotDirectory {
            path: root.to_path_buf(),
        });
    }
    Ok(())
}

/// List requirements into the default artifact files.
///
/// The root is validated before the artifacts are created, so an invalid
/// root leaves the results of a previous run untouched.
///
/// # Errors
///
/// Returns an error if the root is invalid or an artifact cannot be
/// created or written. Per-file problems are reported in
/// `report.warnings` and never abort the run.
pub fn run_listing(config: &ListingConfig, outputs: &OutputPaths) -> anyhow::Result<ListingReport> {
    // `list_requirements` checks the root again; this early check only keeps
    // an invalid root from truncating the artifacts.
    validate_root(&config.root)?;

    let mut log = RunLog::create(&outputs.log)?;
    let mut table = CsvTable::create(&outputs.table)?;
    list_requirements(config, &mut log, &mut table)
}

/// Walk `config.root`, extracting the requirements of every test case into
/// `table` and mirroring progress to `log`.
///
/// Rows are appended as each file is processed. A file with no heading or
/// no identifiers still gets a row with an empty requirements cell and a
/// "No or improper requirements" warning; a file that cannot be read gets
/// no row.
///
/// # Errors
///
/// Returns an error if the root is invalid or a sink cannot be written.
pub fn list_requirements<L: Write, T: Write>(
    config: &ListingConfig,
    log: &mut RunLog<L>,
    table: &mut CsvTable<T>,
) -> anyhow::Result<ListingReport> {
    validate_root(&config.root)?;
    log.start(&config.root)?;
    info!(root = %config.root.display(), "Listing test case requirements");

    let (directories, walk_warnings) = find_test_cases(config);

    let mut report = ListingReport::default();
    for warning in walk_warnings {
        record_warning(log, &mut report, warning)?;
    }

    for listing in &directories {
        debug!(dir = %listing.dir.display(), "Found directory");
        log.directory(&listing.dir)?;
        report.directories_visited += 1;

        for file in &listing.files {
            process_test_case(config, file, log, table, &mut report)?;
        }
    }

    info!(
        directories = report.directories_visited,
        processed = report.processed_files,
        skipped = report.skipped_files,
        without_requirements = report.files_without_requirements(),
        "Listing complete"
    );
    Ok(report)
}

fn process_test_case<L: Write, T: Write>(
    config: &ListingConfig,
    file: &TestCaseFile,
    log: &mut RunLog<L>,
    table: &mut CsvTable<T>,
    report: &mut ListingReport,
) -> anyhow::Result<()> {
    debug!(file = %file.path.display(), "Processing test case");
    log.test_case(&file.name)?;

    let content = match read_file_bounded(&file.path, config.max_file_size) {
        Ok(content) => content,
        Err(warning) => {
            report.skipped_files += 1;
            return record_warning(log, report, warning);
        }
    };

    let extraction = scan_test_case(&content, config.blank_line_tolerance);
    for token in &extraction.requirements {
        log.requirement(token)?;
    }

    if extraction.heading_line.is_none() {
        let warning = FileWarning::new(
            &file.path,
            WarningKind::MissingHeading,
            format!("Could not find LLR requirements in file {}", file.name),
        );
        record_warning(log, report, warning)?;
    }
    if extraction.requirements.is_empty() {
        let warning = FileWarning::new(
            &file.path,
            WarningKind::NoRequirements,
            format!("No or improper requirements in file {}", file.name),
        );
        record_warning(log, report, warning)?;
    }

    let row = ReportRow {
        test_case: file.name.clone(),
        path: file.path.clone(),
        requirements: extraction.requirements,
    };
    table.append(&row)?;
    report.rows.push(row);
    report.processed_files += 1;
    Ok(())
}

fn record_warning<L: Write>(
    log: &mut RunLog<L>,
    report: &mut ListingReport,
    warning: FileWarning,
) -> anyhow::Result<()> {
    warn!(file = %warning.file.display(), kind = ?warning.kind, "{}", warning.message);
    log.warning(&warning)?;
    report.warnings.push(warning);
    Ok(())
}
