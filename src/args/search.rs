//! Command-line search functionality.

use colored::Colorize;

use pk::error::Result;
use pk::logic::parse_selection;
use pk::prompt::Console;
use pk::sources::{AurSearch, RepoSearch, search_all};

use crate::args::Context;
use crate::args::install::install_records;
use crate::args::utils::{Outcome, format_package};

/// What: Search both sources, list the merged results and install the picks.
///
/// Inputs:
/// - `ctx`: Settings and orchestrator.
/// - `query`: Search text.
/// - `json`: Print results as JSON and stop.
/// - `console`: Operator channel.
///
/// Output:
/// - `Aborted` for an empty or malformed selection.
///
/// # Errors
/// - Returns `Err` when the AUR client cannot be built or JSON output fails.
///
/// Details:
/// - A failing source is reported and the other one's results are still shown.
pub async fn handle_search(
    ctx: &Context,
    query: &str,
    json: bool,
    console: &mut dyn Console,
) -> Result<Outcome> {
    tracing::info!(query = %query, "search requested from CLI");
    let aur = AurSearch::new(&ctx.settings.aur_rpc_url)?;
    let outcome = search_all(&RepoSearch, &aur, query).await;
    for (label, err) in &outcome.errors {
        eprintln!("{} {err}", format!("Search in {label} failed:").red());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.items)?);
        return Ok(Outcome::Completed);
    }
    if outcome.items.is_empty() {
        println!("{}", "No packages found.".red());
        return Ok(Outcome::Completed);
    }

    console.show(&"Search results:".green().to_string());
    for (i, pkg) in outcome.items.iter().enumerate() {
        console.show(&format_package(pkg, i));
    }
    console.show(
        &"Enter the package number(s) to install (e.g., 1 2 3 or 1,2,3):"
            .green()
            .to_string(),
    );
    let choice = console.ask("Your choice: ")?;
    let indices = match parse_selection(&choice, outcome.items.len()) {
        Ok(indices) if indices.is_empty() => {
            console.show(&"No selection made. Aborting.".red().to_string());
            return Ok(Outcome::Aborted);
        }
        Ok(indices) => indices,
        Err(e) => {
            tracing::warn!(input = %choice, error = %e, "invalid search selection");
            console.show(&format!("Invalid input: {e}").red().to_string());
            return Ok(Outcome::Aborted);
        }
    };

    let selected = indices
        .into_iter()
        .map(|i| outcome.items[i].clone())
        .collect();
    console.show(&"Installing selected packages...".blue().to_string());
    Ok(install_records(ctx, selected, console).await)
}
