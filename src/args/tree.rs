//! Command-line dependency tree view.

use std::process::Command;

use pk::error::Result;
use pk::install::ensure_tool;
use pk::util::pacman::run_status;

use crate::args::utils::Outcome;

/// What: Show the dependency tree of `package` with `pactree`.
///
/// # Errors
/// - `MissingTool` when `pactree` is not installed.
/// - `CommandFailed` when `pactree` exits unsuccessfully.
pub fn handle_tree(package: &str) -> Result<Outcome> {
    tracing::info!(package = %package, "dependency tree requested from CLI");
    ensure_tool("pactree")?;
    println!("Dependency tree for {package}:");
    run_status(Command::new("pactree").arg(package), package)?;
    Ok(Outcome::Completed)
}
