//! Run artifacts: the plain-text log and the comma-separated table.
//!
//! Both sinks are opened once at the start of a run and written append-only.
//! Every write is flushed straight away so an interrupted run still leaves
//! the rows produced so far on disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::{FileWarning, ListingError};
use crate::report::ReportRow;

/// Header row of the results table.
pub const TABLE_HEADER: [&str; 2] = ["Test Case", "Requirements Covered"];

/// Row terminator of the results table.
const RECORD_TERMINATOR: &str = "\r\n";

fn create_file(path: &Path) -> Result<BufWriter<File>, ListingError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| ListingError::OutputUnwritable {
            path: path.to_path_buf(),
            source,
        })
}

/// Line-oriented progress log of a run.
///
/// Records the chosen root, each visited directory, each processed file
/// with the identifiers found in it, and per-file warnings.
#[derive(Debug)]
pub struct RunLog<W: Write> {
    writer: W,
    path: PathBuf,
}

impl RunLog<BufWriter<File>> {
    /// Create (truncate) the log file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::OutputUnwritable`] if the file cannot be created.
    pub fn create(path: &Path) -> Result<Self, ListingError> {
        Ok(Self::new(create_file(path)?, path))
    }
}

impl<W: Write> RunLog<W> {
    /// Wrap an arbitrary writer; `path` is only used in error messages.
    #[must_use]
    pub fn new(writer: W, path: impl Into<PathBuf>) -> Self {
        Self {
            writer,
            path: path.into(),
        }
    }

    fn line(&mut self, text: &str) -> Result<(), ListingError> {
        writeln!(self.writer, "{text}")
            .and_then(|()| self.writer.flush())
            .map_err(|source| ListingError::OutputUnwritable {
                path: self.path.clone(),
                source,
            })
    }

    /// Record the start of a run over `root`.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::OutputUnwritable`] if the log cannot be written.
    pub fn start(&mut self, root: &Path) -> Result<(), ListingError> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        self.line(&format!("tc-llr run started {timestamp}"))?;
        self.line(&format!("Head of tree traversal selected {}", root.display()))
    }

    /// Record entering a directory.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::OutputUnwritable`] if the log cannot be written.
    pub fn directory(&mut self, dir: &Path) -> Result<(), ListingError> {
        self.line("")?;
        self.line(&format!("Found directory: {}", dir.display()))
    }

    /// Record a test case being processed.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::OutputUnwritable`] if the log cannot be written.
    pub fn test_case(&mut self, name: &str) -> Result<(), ListingError> {
        self.line(&format!("\t{name}"))
    }

    /// Record an identifier found in the current test case.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::OutputUnwritable`] if the log cannot be written.
    pub fn requirement(&mut self, token: &str) -> Result<(), ListingError> {
        self.line(&format!("\t\t{token}"))
    }

    /// Record a per-file warning.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::OutputUnwritable`] if the log cannot be written.
    pub fn warning(&mut self, warning: &FileWarning) -> Result<(), ListingError> {
        self.line(&format!("\t\tWARNING: {}", warning.message))
    }

    /// Consume the log, returning the underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Quote a field when it contains a separator, a quote or a line break.
/// Embedded quotes are doubled.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}

/// The results table: one `Test Case,Requirements Covered` row per file.
#[derive(Debug)]
pub struct CsvTable<W: Write> {
    writer: W,
    path: PathBuf,
    rows: usize,
}

impl CsvTable<BufWriter<File>> {
    /// Create (truncate) the table at `path` and write the header row.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::OutputUnwritable`] if the file cannot be
    /// created or the header cannot be written.
    pub fn create(path: &Path) -> Result<Self, ListingError> {
        Self::new(create_file(path)?, path)
    }
}

impl<W: Write> CsvTable<W> {
    /// Write the header row to `writer`; `path` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::OutputUnwritable`] if the header cannot be written.
    pub fn new(writer: W, path: impl Into<PathBuf>) -> Result<Self, ListingError> {
        let mut table = Self {
            writer,
            path: path.into(),
            rows: 0,
        };
        table.record(&TABLE_HEADER)?;
        Ok(table)
    }

    fn record(&mut self, fields: &[&str]) -> Result<(), ListingError> {
        let line = fields
            .iter()
            .map(|field| escape_field(field))
            .collect::<Vec<_>>()
            .join(",");
        self.writer
            .write_all(line.as_bytes())
            .and_then(|()| self.writer.write_all(RECORD_TERMINATOR.as_bytes()))
            .and_then(|()| self.writer.flush())
            .map_err(|source| ListingError::OutputUnwritable {
                path: self.path.clone(),
                source,
            })
    }

    /// Append one row and flush it.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::OutputUnwritable`] if the row cannot be written.
    pub fn append(&mut self, row: &ReportRow) -> Result<(), ListingError> {
        let requirements = row.requirements_cell();
        self.record(&[row.test_case.as_str(), requirements.as_str()])?;
        self.rows += 1;
        Ok(())
    }

    /// Number of data rows written so far (header excluded).
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Consume the table, returning the underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}
