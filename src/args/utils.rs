//! Shared utilities for argument processing.

use colored::Colorize;

use pk::install::{BatchReport, JobStatus};
use pk::state::PackageRecord;

/// How a command ended from the operator's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Ran to the end; individual packages may still have failed.
    Completed,
    /// The operator cancelled (empty or malformed selection, declined prompt).
    Aborted,
}

impl Outcome {
    /// Process exit code for this outcome.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::Completed => 0,
            Self::Aborted => 1,
        }
    }
}

/// What: Determine the log level based on command-line arguments.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides `--log-level`. `RUST_LOG` is handled by the
///   subscriber and wins over both.
#[must_use]
pub fn determine_log_level(args: &crate::args::Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else {
        args.log_level.clone()
    }
}

/// What: Parse package names from input, handling both comma-separated and space-separated formats.
///
/// Inputs:
/// - `packages`: Vector of package strings (may contain comma-separated values).
///
/// Output:
/// - Vector of individual package names.
///
/// Details:
/// - Splits each input string by commas and whitespace and trims it.
/// - Filters out empty strings.
#[must_use]
pub fn parse_package_names(packages: &[String]) -> Vec<String> {
    packages
        .iter()
        .flat_map(|pkg| pkg.split([',', ' ']))
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect()
}

/// Format one search result line: `1. name version - description (source)`.
#[must_use]
pub fn format_package(pkg: &PackageRecord, index: usize) -> String {
    let version = pkg
        .version
        .as_deref()
        .map(|v| format!(" {v}"))
        .unwrap_or_default();
    format!(
        "{}. {}{} - {} ({})",
        index + 1,
        pkg.name.bold(),
        version.green(),
        pkg.description,
        pkg.source.label().cyan()
    )
}

/// What: Print the outcome of every job in `reports`.
///
/// Inputs:
/// - `reports`: Batch reports in submission order.
///
/// Details:
/// - Refused batches print their reason once instead of one line per job.
pub fn print_reports(reports: &[BatchReport]) {
    for report in reports {
        if let Some(reason) = &report.refused {
            eprintln!(
                "{} {}",
                format!("Skipped {} batch:", report.label).red(),
                reason
            );
            continue;
        }
        for r in &report.reports {
            match &r.status {
                JobStatus::Done => println!("{} {}", "Done:".green(), r.job),
                JobStatus::Failed(e) => eprintln!("{} {}: {e}", "Failed:".red(), r.job),
                JobStatus::Skipped(why) => {
                    println!("{} {} ({why})", "Skipped:".yellow(), r.job);
                }
            }
        }
    }
}
