//! Install orchestration.
//!
//! Jobs are grouped into batches, each batch runs under the coarse
//! [`BatchLock`], and the [`Executor`] does the actual work.

mod batch;
pub mod command;
mod executor;
mod lock;
mod logging;
mod plan;
mod utils;

pub use batch::{Batch, BatchReport, Job, JobReport, JobStatus, Orchestrator, run_batch};
pub use executor::{ConflictProbe, Executor, PacmanProbe, SystemExecutor};
pub use lock::{BatchLock, clear_stale_db_lock, pacman_running};
pub use logging::{log_installed, log_removed};
pub use plan::{InstallPlan, plan_installs};
pub use utils::{command_on_path, ensure_tool, resolve_aur_helper};
