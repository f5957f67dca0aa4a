//! Command-line install functionality.

use colored::Colorize;

use pk::install::{BatchReport, PacmanProbe, plan_installs};
use pk::logic::{SuggestionOutcome, offer_suggestions, suggest};
use pk::prompt::Console;
use pk::state::{PackageRecord, Source};

use crate::args::Context;
use crate::args::utils::{self, Outcome};

/// What: Plan and run installs for `records` without offering suggestions.
///
/// Output:
/// - Batch reports, or `None` when every package was dropped at a conflict prompt.
async fn run_installs(
    ctx: &Context,
    records: Vec<PackageRecord>,
    console: &mut dyn Console,
) -> Option<Vec<BatchReport>> {
    let plan = plan_installs(records, &PacmanProbe, console);
    for name in &plan.declined {
        tracing::info!(package = %name, "dropped after conflict prompt");
    }
    if plan.is_empty() {
        return None;
    }
    let reports = ctx.orchestrator.run_batches(vec![plan.batch]).await;
    utils::print_reports(&reports);
    Some(reports)
}

/// What: Install `records`, then offer companion packages for the ones that succeeded.
///
/// Inputs:
/// - `ctx`: Settings and orchestrator.
/// - `records`: Packages to install, already tagged with their source.
/// - `console`: Operator channel.
///
/// Output:
/// - `Aborted` when every package was declined at a conflict prompt.
///
/// Details:
/// - Suggestions are offered only when `offer_suggestions` is enabled and
///   only for packages that have any.
pub async fn install_records(
    ctx: &Context,
    records: Vec<PackageRecord>,
    console: &mut dyn Console,
) -> Outcome {
    if records.is_empty() {
        return Outcome::Completed;
    }
    let Some(reports) = run_installs(ctx, records, console).await else {
        println!("{}", "Nothing to install.".yellow());
        return Outcome::Aborted;
    };
    if !ctx.settings.offer_suggestions {
        return Outcome::Completed;
    }
    let installed: Vec<String> = reports.iter().flat_map(BatchReport::installed).collect();
    for name in installed.iter().filter(|n| !suggest(n).is_empty()) {
        if let SuggestionOutcome::Selected(extra) = offer_suggestions(name, console) {
            let extra = extra
                .into_iter()
                .map(|n| PackageRecord::new(n, Source::official()))
                .collect();
            run_installs(ctx, extra, console).await;
        }
    }
    Outcome::Completed
}

/// What: Handle `pk install <names...>`.
///
/// Inputs:
/// - `ctx`: Settings and orchestrator.
/// - `packages`: Raw arguments (comma or space separated).
/// - `aur`: Treat every name as an AUR package.
/// - `console`: Operator channel.
///
/// Output:
/// - Outcome of [`install_records`].
pub async fn handle_install(
    ctx: &Context,
    packages: &[String],
    aur: bool,
    console: &mut dyn Console,
) -> Outcome {
    let names = utils::parse_package_names(packages);
    if names.is_empty() {
        eprintln!("{}", "No packages specified.".red());
        return Outcome::Aborted;
    }
    tracing::info!(packages = ?names, aur, "install requested from CLI");
    println!(
        "{}",
        format!("Installing packages: {}...", names.join(", ")).green()
    );
    let source = if aur { Source::Aur } else { Source::official() };
    let records = names
        .into_iter()
        .map(|n| PackageRecord::new(n, source.clone()))
        .collect();
    install_records(ctx, records, console).await
}
