//! Command-line remove functionality.

use colored::Colorize;

use pk::install::{Batch, Job};
use pk::state::{PackageRecord, Source};

use crate::args::Context;
use crate::args::utils::{self, Outcome};

/// What: Handle `pk remove <names...>`.
///
/// Inputs:
/// - `ctx`: Settings and orchestrator.
/// - `packages`: Raw arguments (comma or space separated).
///
/// Output:
/// - `Completed`, even when individual removals fail.
///
/// Details:
/// - All names go into one batch, so a failed removal does not stop the rest.
pub async fn handle_remove(ctx: &Context, packages: &[String]) -> Outcome {
    let names = utils::parse_package_names(packages);
    if names.is_empty() {
        eprintln!("{}", "No packages specified.".red());
        return Outcome::Aborted;
    }
    tracing::info!(packages = ?names, "remove requested from CLI");
    println!("{}", format!("Removing packages: {}...", names.join(", ")).green());
    let jobs = names
        .into_iter()
        .map(|n| Job::Remove(PackageRecord::new(n, Source::official())))
        .collect();
    let reports = ctx
        .orchestrator
        .run_batches(vec![Batch::new("remove", jobs)])
        .await;
    utils::print_reports(&reports);
    Outcome::Completed
}
