//! Command-line argument parsing and handling.

pub mod check;
pub mod definition;
pub mod install;
pub mod remove;
pub mod search;
pub mod suggest;
pub mod tree;
pub mod update;
pub mod utils;

use pk::config::Settings;
use pk::install::Orchestrator;

// Re-export commonly used items
pub use definition::{Args, run_command};
pub use utils::determine_log_level;

/// Everything a command handler needs besides the console.
pub struct Context {
    /// Settings after command-line overrides.
    pub settings: Settings,
    /// Runs install/remove/update batches.
    pub orchestrator: Orchestrator,
}
