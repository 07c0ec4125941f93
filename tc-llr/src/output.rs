//! Summary formatting for listing reports.
//!
//! Provides JSON and plain-text formatters for `ListingReport`. The log and
//! table artifacts are written by `sink`; these formatters only summarize a
//! finished run for the terminal.

use std::io::Write;

use crate::report::ListingReport;

/// Format a `ListingReport` as JSON to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &ListingReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Format a `ListingReport` as human-readable plain text to a writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(report: &ListingReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer, "  TEST CASE REQUIREMENTS LISTING")?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer)?;
    writeln!(writer, "  Directories visited:   {}", report.directories_visited)?;
    writeln!(writer, "  Test cases listed:     {}", report.processed_files)?;
    writeln!(writer, "  Test cases skipped:    {}", report.skipped_files)?;
    writeln!(writer, "  Requirements listed:   {}", report.total_requirements())?;
    writeln!(
        writer,
        "  Distinct requirements: {}",
        report.distinct_requirements().len()
    )?;
    writeln!(writer)?;

    if !report.warnings.is_empty() {
        writeln!(writer, "{}", "-".repeat(80))?;
        writeln!(writer, "  WARNINGS")?;
        writeln!(writer, "{}", "-".repeat(80))?;
        for warning in &report.warnings {
            writeln!(writer, "{}", warning.format_human_readable())?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "{}", "=".repeat(80))?;
    let missing = report.files_without_requirements();
    if missing == 0 && report.skipped_files == 0 {
        writeln!(
            writer,
            "\u{2713} All {} test case(s) list their requirements",
            report.processed_files
        )?;
    } else {
        if missing > 0 {
            writeln!(
                writer,
                "\u{2717} {missing} test case(s) with no or improper requirements"
            )?;
        }
        if report.skipped_files > 0 {
            writeln!(
                writer,
                "\u{2717} {} test case(s) could not be read",
                report.skipped_files
            )?;
        }
    }
    writeln!(writer, "{}", "=".repeat(80))?;

    Ok(())
}
