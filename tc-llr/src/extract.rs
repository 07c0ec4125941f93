//! Requirement extraction from test case text.
//!
//! Two stages:
//! 1. [`find_heading_line`] locates the first line carrying the
//!    `REQUIREMENTS` marker
//! 2. [`extract_requirements`] collects the identifiers listed directly
//!    below it

use std::sync::LazyLock;

use regex::Regex;

use crate::config::{HEADING_MARKER, REQUIREMENT_PATTERN};

static REQUIREMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(REQUIREMENT_PATTERN) {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid requirement regex: {err}"),
    }
});

/// Outcome of scanning one test case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// 1-based line number of the heading, if any.
    pub heading_line: Option<usize>,
    /// Identifiers in the order found, duplicates kept.
    pub requirements: Vec<String>,
}

/// Split content into lines, accepting `\n`, `\r\n` and bare `\r` endings.
fn split_lines(content: &str) -> Vec<&str> {
    content.lines().flat_map(|line| line.split('\r')).collect()
}

/// Return the 1-based number of the first line whose ASCII-upper-cased text
/// contains `REQUIREMENTS`, or `None` when there is no such line.
#[must_use]
pub fn find_heading_line(lines: &[&str]) -> Option<usize> {
    lines
        .iter()
        .position(|line| line.to_ascii_uppercase().contains(HEADING_MARKER))
        .map(|idx| idx + 1)
}

/// First requirement identifier in `line`, if any.
#[must_use]
pub fn match_requirement(line: &str) -> Option<&str> {
    REQUIREMENT_REGEX.find(line).map(|m| m.as_str())
}

/// Collect the identifiers listed below the heading at `heading_line`.
///
/// Scanning starts on the line after the heading. Each matching line
/// contributes its first identifier. Before the first identifier up to
/// `tolerance` non-matching lines are skipped (a blank separator line);
/// after that the first non-matching line ends the list. Running past the
/// last line counts as a non-matching line.
#[must_use]
pub fn extract_requirements(lines: &[&str], heading_line: usize, tolerance: usize) -> Vec<String> {
    let mut requirements = Vec::new();
    let mut skipped = 0;

    // 1-based heading number == 0-based index of the following line.
    let mut idx = heading_line;
    loop {
        match lines.get(idx).and_then(|line| match_requirement(line)) {
            Some(token) => requirements.push(token.to_owned()),
            None if requirements.is_empty() && skipped < tolerance => skipped += 1,
            None => break,
        }
        idx += 1;
    }

    requirements
}

/// Locate the heading in `content` and extract the identifiers below it.
///
/// A missing heading yields no identifiers.
#[must_use]
pub fn scan_test_case(content: &str, tolerance: usize) -> Extraction {
    let lines = split_lines(content);
    let Some(heading_line) = find_heading_line(&lines) else {
        return Extraction::default();
    };

    Extraction {
        heading_line: Some(heading_line),
        requirements: extract_requirements(&lines, heading_line, tolerance),
    }
}
