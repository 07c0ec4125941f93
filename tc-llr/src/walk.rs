//! Filesystem discovery of test case files.
//!
//! Walks the root depth-first with entries sorted by name and files ahead of
//! subdirectories, so every directory's test cases are grouped together and
//! two runs over the same tree visit files in the same order.
//! - Hidden entries (leading `.`) are pruned, except the root itself
//! - Symlinks are not followed by default (`follow_links: false`)
//! - Depth is unbounded; walkdir reports symlink loops as walk errors
//! - Bounded streaming reads cap memory per file

use std::cmp::Ordering;
use std::io::Read;
use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::{DirEntry, WalkDir};

use crate::config::{ListingConfig, TEST_CASE_GLOB};
use crate::error::{FileWarning, WarningKind};

/// A test case file selected for extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCaseFile {
    /// File name as shown in the log and the table.
    pub name: String,
    /// Full path used to read the file.
    pub path: PathBuf,
}

/// One visited directory and the test cases directly inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryListing {
    /// The visited directory.
    pub dir: PathBuf,
    /// Test case files in this directory, sorted by name.
    pub files: Vec<TestCaseFile>,
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().as_encoded_bytes().starts_with(b".")
}

/// Files sort ahead of directories, then by name.
fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

fn test_case_pattern() -> Pattern {
    match Pattern::new(TEST_CASE_GLOB) {
        Ok(pattern) => pattern,
        Err(err) => panic!("Invalid test case glob: {err}"),
    }
}

/// Walk `config.root` and collect the test case files of every directory.
///
/// Returns `(directories, warnings)`:
/// - `directories`: every visited (non-hidden) directory in walk order,
///   including directories without test cases.
/// - `warnings`: traversal errors (permission denied, loop, etc.), which
///   never abort the walk.
///
/// # Panics
///
/// Never in practice: the test case glob is a compile-time constant.
pub fn find_test_cases(config: &ListingConfig) -> (Vec<DirectoryListing>, Vec<FileWarning>) {
    let pattern = test_case_pattern();
    let mut directories: Vec<DirectoryListing> = Vec::new();
    let mut warnings = Vec::new();

    for entry_result in WalkDir::new(&config.root)
        .follow_links(config.follow_links)
        .sort_by(files_first)
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
    {
        let entry = match entry_result {
            Ok(e) => e,
            Err(walk_err) => {
                let path = walk_err
                    .path()
                    .map_or_else(|| config.root.clone(), Path::to_path_buf);
                warnings.push(FileWarning::new(
                    path,
                    WarningKind::WalkError,
                    format!("Directory traversal error: {walk_err}"),
                ));
                continue;
            }
        };

        if entry.file_type().is_dir() {
            directories.push(DirectoryListing {
                dir: entry.path().to_path_buf(),
                files: Vec::new(),
            });
            continue;
        }

        // Devices, pipes and sockets are never test cases.
        if !entry.path().is_file() {
            continue;
        }

        // Non-UTF-8 names are matched and displayed lossily; the raw path is
        // kept for reading.
        let name = entry.file_name().to_string_lossy();
        if !pattern.matches(&name) {
            continue;
        }

        // Files always follow their parent directory in walk order.
        if let Some(current) = directories.last_mut() {
            current.files.push(TestCaseFile {
                name: name.into_owned(),
                path: entry.path().to_path_buf(),
            });
        }
    }

    (directories, warnings)
}

/// Read a file using a bounded streaming read, enforcing `max_file_size`.
///
/// # Errors
///
/// Returns a [`FileWarning`] if the file cannot be opened or read, exceeds
/// `max_file_size`, or is not valid UTF-8.
pub fn read_file_bounded(path: &Path, max_file_size: u64) -> Result<String, FileWarning> {
    let file = std::fs::File::open(path).map_err(|e| {
        FileWarning::new(path, WarningKind::IoError, format!("Failed to open file: {e}"))
    })?;

    // Read at most max_file_size + 1 bytes to detect oversized files
    let mut buffer = Vec::new();
    file.take(max_file_size.saturating_add(1))
        .read_to_end(&mut buffer)
        .map_err(|e| {
            FileWarning::new(path, WarningKind::IoError, format!("Failed to read file: {e}"))
        })?;

    if buffer.len() as u64 > max_file_size {
        return Err(FileWarning::new(
            path,
            WarningKind::FileTooLarge,
            format!("File exceeds maximum size of {max_file_size} bytes"),
        ));
    }

    String::from_utf8(buffer).map_err(|_| {
        FileWarning::new(path, WarningKind::InvalidEncoding, "File is not valid UTF-8")
    })
}
