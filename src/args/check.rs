//! Command-line cycle check before install.

use colored::Colorize;

use pk::error::Result;
use pk::logic::deps::{PacmanDependencies, load_graph};
use pk::logic::{CycleDecision, check_cycles};
use pk::prompt::Console;
use pk::state::{PackageRecord, Source};

use crate::args::Context;
use crate::args::install::install_records;
use crate::args::utils::Outcome;

/// What: Load the dependency tree of `package`, check it for cycles and install it.
///
/// Inputs:
/// - `ctx`: Settings and orchestrator.
/// - `package`: Official package to check.
/// - `no_install`: Stop after the check.
/// - `console`: Operator channel.
///
/// Output:
/// - `Aborted` when the operator chose to skip the package.
///
/// # Errors
/// - `MissingTool` when pacman is not installed, `CommandFailed` when the
///   package is not in the sync databases.
///
/// Details:
/// - The whole tree is loaded before the check runs. Dependencies that could
///   not be queried are listed before the result.
pub async fn handle_check(
    ctx: &Context,
    package: &str,
    no_install: bool,
    console: &mut dyn Console,
) -> Result<Outcome> {
    console.show(&format!("Checking for cyclic dependencies in {package}..."));
    let graph = load_graph(
        PackageRecord::new(package, Source::official()),
        &PacmanDependencies,
    )?;
    if !graph.is_complete() {
        console.show(&format!(
            "{} {}",
            "Could not resolve dependencies of:".yellow(),
            graph.unresolved.join(", ")
        ));
        console.show("Cycles through these packages cannot be detected.");
    }
    let root = graph.root;
    let decision = check_cycles(&root, console);
    if decision == CycleDecision::Skip {
        return Ok(Outcome::Aborted);
    }
    if no_install {
        return Ok(Outcome::Completed);
    }
    if decision == CycleDecision::Proceed {
        console.show(&format!("Installing {package} despite the cyclic dependency."));
    }
    let record = PackageRecord::new(root.name, root.source);
    Ok(install_records(ctx, vec![record], console).await)
}
