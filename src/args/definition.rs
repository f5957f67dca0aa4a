//! Command-line argument definition and dispatch.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use pk::error::Result;
use pk::prompt::Console;

use crate::args::utils::Outcome;
use crate::args::{Context, check, install, remove, search, suggest, tree, update};

/// pk - search, install, remove and update packages from pacman and the AUR
#[derive(Parser, Debug)]
#[command(name = "pk")]
#[command(version)]
#[command(about = "Search, install, remove and update packages from pacman and the AUR", long_about = None)]
pub struct Args {
    /// Print the commands that would run instead of running them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use this settings file instead of ~/.config/pk/settings.conf
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// pk subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Search official repositories and the AUR, then pick packages to install
    #[command(visible_alias = "s")]
    Search {
        /// Search terms
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        /// Print the merged results as JSON and exit
        #[arg(long)]
        json: bool,
    },

    /// Install one or more packages (comma-separated or space-separated)
    #[command(visible_alias = "i")]
    Install {
        /// Package names
        #[arg(required = true, num_args = 1..)]
        packages: Vec<String>,
        /// Build the packages from the AUR instead of the official repositories
        #[arg(long)]
        aur: bool,
    },

    /// Remove one or more packages
    #[command(visible_alias = "r")]
    Remove {
        /// Package names
        #[arg(required = true, num_args = 1..)]
        packages: Vec<String>,
    },

    /// Upgrade the system, then AUR packages when a helper is available
    #[command(visible_alias = "u")]
    Update,

    /// Show the dependency tree of a package (needs pactree)
    Tree {
        /// Package name
        package: String,
    },

    /// Check a package for cyclic dependencies before installing it
    Check {
        /// Package name
        package: String,
        /// Only report; never install
        #[arg(long)]
        no_install: bool,
    },

    /// Suggest companion packages and install the chosen ones
    Suggest {
        /// Package name
        package: String,
    },
}

/// What: Run the selected subcommand.
///
/// Inputs:
/// - `command`: Parsed subcommand.
/// - `ctx`: Settings and orchestrator.
/// - `console`: Operator channel.
///
/// Output:
/// - `Outcome::Aborted` when the operator cancelled; `Completed` otherwise.
///
/// # Errors
/// - Returns `Err` when the command cannot run at all (missing tool,
///   unusable AUR endpoint).
pub async fn run_command(
    command: Command,
    ctx: &Context,
    console: &mut dyn Console,
) -> Result<Outcome> {
    tracing::debug!(command = ?command, "dispatching");
    match command {
        Command::Search { query, json } => {
            search::handle_search(ctx, &query.join(" "), json, console).await
        }
        Command::Install { packages, aur } => {
            Ok(install::handle_install(ctx, &packages, aur, console).await)
        }
        Command::Remove { packages } => Ok(remove::handle_remove(ctx, &packages).await),
        Command::Update => Ok(update::handle_update(ctx).await),
        Command::Tree { package } => tree::handle_tree(&package),
        Command::Check {
            package,
            no_install,
        } => check::handle_check(ctx, &package, no_install, console).await,
        Command::Suggest { package } => Ok(suggest::handle_suggest(ctx, &package, console).await),
    }
}
