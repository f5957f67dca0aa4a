//! Batches of install/remove jobs and the worker pool that runs them.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Semaphore;

use super::executor::Executor;
use super::lock::{BatchLock, clear_stale_db_lock, pacman_running};
use super::logging::{log_installed, log_removed};
use crate::config::Settings;
use crate::error::{PkError, Result};
use crate::logic::conflict::{Decision, ReplaceOutcome, apply_decision};
use crate::state::PackageRecord;

/// One unit of work for the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
    /// Install a package.
    Install(PackageRecord),
    /// Remove an installed package.
    Remove(PackageRecord),
    /// Remove `existing`, then install `incoming`.
    Replace {
        /// Installed package that conflicts.
        existing: PackageRecord,
        /// Package replacing it.
        incoming: PackageRecord,
    },
    /// Full system upgrade.
    Update,
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Install(p) => write!(f, "install {}", p.name),
            Self::Remove(p) => write!(f, "remove {}", p.name),
            Self::Replace { existing, incoming } => {
                write!(f, "replace {} with {}", existing.name, incoming.name)
            }
            Self::Update => f.write_str("system update"),
        }
    }
}

/// Jobs that run back to back under one acquisition of the batch lock.
#[derive(Debug, Clone)]
pub struct Batch {
    /// Shown in reports, e.g. `"install"` or `"remove"`.
    pub label: String,
    /// Jobs in execution order.
    pub jobs: Vec<Job>,
}

impl Batch {
    /// Create a batch.
    #[must_use]
    pub fn new(label: impl Into<String>, jobs: Vec<Job>) -> Self {
        Self {
            label: label.into(),
            jobs,
        }
    }
}

/// How one job ended.
#[derive(Debug)]
pub enum JobStatus {
    /// Completed successfully.
    Done,
    /// The executor reported an error.
    Failed(PkError),
    /// Never attempted.
    Skipped(String),
}

/// A job together with its outcome.
#[derive(Debug)]
pub struct JobReport {
    /// The job that ran.
    pub job: Job,
    /// What happened to it.
    pub status: JobStatus,
}

/// Outcome of a whole batch.
#[derive(Debug)]
pub struct BatchReport {
    /// Label of the batch.
    pub label: String,
    /// Per-job outcomes in execution order.
    pub reports: Vec<JobReport>,
    /// Set when the batch was refused before any job ran.
    pub refused: Option<PkError>,
}

impl BatchReport {
    /// Names installed by successful jobs.
    #[must_use]
    pub fn installed(&self) -> Vec<String> {
        self.done_jobs()
            .filter_map(|job| match job {
                Job::Install(p) | Job::Replace { incoming: p, .. } => Some(p.name.clone()),
                _ => None,
            })
            .collect()
    }

    /// Names removed by successful jobs.
    #[must_use]
    pub fn removed(&self) -> Vec<String> {
        self.done_jobs()
            .filter_map(|job| match job {
                Job::Remove(p) | Job::Replace { existing: p, .. } => Some(p.name.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of jobs that failed.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.status, JobStatus::Failed(_)))
            .count()
    }

    fn done_jobs(&self) -> impl Iterator<Item = &Job> {
        self.reports
            .iter()
            .filter(|r| matches!(r.status, JobStatus::Done))
            .map(|r| &r.job)
    }
}

/// What: Run one job through the executor.
fn run_job(job: &Job, executor: &dyn Executor) -> JobStatus {
    let result = match job {
        Job::Install(p) => executor.install(p),
        Job::Remove(p) => executor.remove(p),
        Job::Update => executor.update(),
        Job::Replace { existing, incoming } => {
            return match apply_decision(Decision::Replace, existing, incoming, executor) {
                ReplaceOutcome::Replaced => JobStatus::Done,
                ReplaceOutcome::Aborted => JobStatus::Skipped("aborted".into()),
                ReplaceOutcome::RemoveFailed(e) | ReplaceOutcome::InstallFailed(e) => {
                    JobStatus::Failed(e)
                }
            };
        }
    };
    match result {
        Ok(()) => JobStatus::Done,
        Err(e) => {
            tracing::error!(job = %job, error = %e, "job failed");
            JobStatus::Failed(e)
        }
    }
}

/// What: Run a batch under the coarse lock.
///
/// Inputs:
/// - `batch`: Jobs to run.
/// - `executor`: Install/remove collaborator.
/// - `lock`: Process-wide batch lock.
/// - `db_lock_check`: Runs once the lock is held, before the first job.
///
/// Output:
/// - [`BatchReport`] with one entry per job.
///
/// Details:
/// - The lock is held from before the check until the last job finishes.
/// - A failing check refuses the batch and marks every job skipped.
/// - A failing job does not stop the ones after it.
#[must_use]
pub fn run_batch(
    batch: Batch,
    executor: &dyn Executor,
    lock: &BatchLock,
    db_lock_check: impl FnOnce() -> Result<()>,
) -> BatchReport {
    let _guard = lock.acquire();
    tracing::debug!(batch = %batch.label, jobs = batch.jobs.len(), "batch lock acquired");
    if let Err(e) = db_lock_check() {
        tracing::warn!(batch = %batch.label, error = %e, "batch refused");
        let reason = e.to_string();
        return BatchReport {
            label: batch.label,
            reports: batch
                .jobs
                .into_iter()
                .map(|job| JobReport {
                    job,
                    status: JobStatus::Skipped(reason.clone()),
                })
                .collect(),
            refused: Some(e),
        };
    }
    let reports = batch
        .jobs
        .into_iter()
        .map(|job| {
            let status = run_job(&job, executor);
            JobReport { job, status }
        })
        .collect();
    BatchReport {
        label: batch.label,
        reports,
        refused: None,
    }
}

/// Dispatches batches to a bounded pool of blocking workers.
#[derive(Clone)]
pub struct Orchestrator {
    executor: Arc<dyn Executor>,
    lock: BatchLock,
    db_lock_path: PathBuf,
    workers: usize,
    dry_run: bool,
    audit_dir: Option<PathBuf>,
}

impl Orchestrator {
    /// What: Build an orchestrator from settings.
    ///
    /// Details:
    /// - Audit logging is off until [`Orchestrator::with_audit_dir`] is called.
    #[must_use]
    pub fn new(executor: Arc<dyn Executor>, settings: &Settings) -> Self {
        Self {
            executor,
            lock: BatchLock::new(),
            db_lock_path: settings.db_lock_path.clone(),
            workers: settings.workers.max(1),
            dry_run: settings.dry_run,
            audit_dir: None,
        }
    }

    /// Append successful installs and removals to logs in `dir`.
    #[must_use]
    pub fn with_audit_dir(mut self, dir: PathBuf) -> Self {
        self.audit_dir = Some(dir);
        self
    }

    /// Share an existing batch lock.
    #[must_use]
    pub fn with_lock(mut self, lock: BatchLock) -> Self {
        self.lock = lock;
        self
    }

    /// What: Run all batches on the worker pool and collect their reports.
    ///
    /// Inputs:
    /// - `batches`: Batches to run.
    ///
    /// Output:
    /// - One report per batch, in submission order.
    ///
    /// Details:
    /// - At most `workers` batches are dispatched at once; the batch lock
    ///   still lets only one of them touch the system at a time.
    /// - Dry runs skip the pacman database lock check.
    pub async fn run_batches(&self, batches: Vec<Batch>) -> Vec<BatchReport> {
        let permits = Arc::new(Semaphore::new(self.workers));
        let tasks = batches.into_iter().map(|batch| {
            let permits = Arc::clone(&permits);
            let this = self.clone();
            async move {
                let label = batch.label.clone();
                let _permit = match permits.acquire_owned().await {
                    Ok(p) => Some(p),
                    Err(e) => {
                        tracing::warn!(error = %e, "worker pool closed");
                        None
                    }
                };
                let handle = tokio::task::spawn_blocking(move || this.run_one(batch));
                match handle.await {
                    Ok(report) => report,
                    Err(e) => {
                        tracing::error!(batch = %label, error = %e, "batch worker failed");
                        BatchReport {
                            label,
                            reports: Vec::new(),
                            refused: Some(PkError::Worker(e)),
                        }
                    }
                }
            }
        });
        futures::future::join_all(tasks).await
    }

    /// Blocking body of one worker.
    fn run_one(&self, batch: Batch) -> BatchReport {
        let path = self.db_lock_path.clone();
        let dry_run = self.dry_run;
        let report = run_batch(batch, self.executor.as_ref(), &self.lock, move || {
            if dry_run {
                Ok(())
            } else {
                clear_stale_db_lock(&path, pacman_running)
            }
        });
        if let Some(dir) = self.audit_dir.as_deref()
            && !self.dry_run
        {
            if let Err(e) = log_installed(dir, &report.installed()) {
                tracing::warn!(error = %e, "failed to write install log");
            }
            if let Err(e) = log_removed(dir, &report.removed()) {
                tracing::warn!(error = %e, "failed to write remove log");
            }
        }
        report
    }
}
