//! Command-line system update functionality.

use colored::Colorize;

use pk::install::{Batch, Job};

use crate::args::Context;
use crate::args::utils::{self, Outcome};

/// What: Handle `pk update`.
///
/// Output:
/// - `Completed`; a failed upgrade is reported but does not change the exit code.
///
/// Details:
/// - Runs as a single-job batch so it waits for the batch lock and the
///   pacman database check like everything else.
pub async fn handle_update(ctx: &Context) -> Outcome {
    tracing::info!("system update requested from CLI");
    println!("{}", "Updating packages...".green());
    let reports = ctx
        .orchestrator
        .run_batches(vec![Batch::new("update", vec![Job::Update])])
        .await;
    utils::print_reports(&reports);
    if reports.iter().all(|r| r.refused.is_none() && r.failures() == 0) {
        println!("{}", "Update completed.".green());
    }
    Outcome::Completed
}
