//! Batch orchestration under the coarse lock.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use pk::config::Settings;
use pk::error::{PkError, Result};
use pk::install::{Batch, BatchLock, Executor, Job, JobStatus, Orchestrator, run_batch};
use pk::state::{PackageRecord, Source};

/// Executor that tracks how many calls overlap and fails for one package.
#[derive(Default)]
struct CountingExecutor {
    active: AtomicUsize,
    max_active: AtomicUsize,
    calls: Mutex<Vec<String>>,
    fail_for: Option<&'static str>,
}

impl CountingExecutor {
    fn work(&self, call: String, name: &str) -> Result<()> {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now, Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(5));
        self.calls.lock().expect("calls").push(call);
        self.active.fetch_sub(1, Ordering::SeqCst);
        if self.fail_for == Some(name) {
            return Err(PkError::CommandFailed {
                program: "pacman".into(),
                package: name.into(),
                code: Some(1),
            });
        }
        Ok(())
    }
}

impl Executor for CountingExecutor {
    fn install(&self, pkg: &PackageRecord) -> Result<()> {
        self.work(format!("install {}", pkg.name), &pkg.name)
    }

    fn remove(&self, pkg: &PackageRecord) -> Result<()> {
        self.work(format!("remove {}", pkg.name), &pkg.name)
    }

    fn update(&self) -> Result<()> {
        self.work("update".into(), "system")
    }
}

fn install(name: &str) -> Job {
    Job::Install(PackageRecord::new(name, Source::official()))
}

/// Settings pointing the database lock at a path that does not exist.
fn settings_in(dir: &std::path::Path, dry_run: bool) -> Settings {
    Settings {
        dry_run,
        workers: 4,
        db_lock_path: dir.join("db.lck"),
        ..Settings::default()
    }
}

#[tokio::test]
/// What: Concurrent batches never overlap and failures do not stop a batch
///
/// Inputs:
/// - Six batches of three installs on four workers; `p1-1` fails.
///
/// Output:
/// - Max observed concurrency 1; every job ran; exactly one failure.
async fn batches_never_overlap() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ex = Arc::new(CountingExecutor {
        fail_for: Some("p1-1"),
        ..CountingExecutor::default()
    });
    let orchestrator = Orchestrator::new(ex.clone(), &settings_in(dir.path(), false));
    let batches = (0..6)
        .map(|b| {
            Batch::new(
                format!("batch{b}"),
                (0..3).map(|j| install(&format!("p{b}-{j}"))).collect(),
            )
        })
        .collect();

    let reports = orchestrator.run_batches(batches).await;

    assert_eq!(ex.max_active.load(Ordering::SeqCst), 1);
    assert_eq!(ex.calls.lock().expect("calls").len(), 18);
    assert_eq!(reports.len(), 6);
    assert_eq!(reports[1].label, "batch1");
    assert_eq!(reports.iter().map(|r| r.failures()).sum::<usize>(), 1);
    assert!(matches!(reports[1].reports[1].status, JobStatus::Failed(_)));
    assert!(matches!(reports[1].reports[2].status, JobStatus::Done));
}

#[tokio::test]
/// What: Jobs inside a batch run back to back in order
///
/// Inputs:
/// - One batch: install a, remove b, update.
///
/// Output:
/// - Calls recorded in job order.
async fn batch_jobs_run_in_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ex = Arc::new(CountingExecutor::default());
    let orchestrator = Orchestrator::new(ex.clone(), &settings_in(dir.path(), false));
    let batch = Batch::new(
        "mixed",
        vec![
            install("a"),
            Job::Remove(PackageRecord::new("b", Source::official())),
            Job::Update,
        ],
    );
    orchestrator.run_batches(vec![batch]).await;
    assert_eq!(
        *ex.calls.lock().expect("calls"),
        vec!["install a", "remove b", "update"]
    );
}

#[tokio::test]
/// What: Successful installs and removals land in the audit logs
///
/// Inputs:
/// - Batch installing x (ok) and y (fails), removing z.
///
/// Output:
/// - install_log lists only x; remove_log lists z.
async fn batch_writes_audit_logs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ex = Arc::new(CountingExecutor {
        fail_for: Some("y"),
        ..CountingExecutor::default()
    });
    let orchestrator = Orchestrator::new(ex, &settings_in(dir.path(), false))
        .with_audit_dir(dir.path().to_path_buf());
    let batch = Batch::new(
        "audit",
        vec![
            install("x"),
            install("y"),
            Job::Remove(PackageRecord::new("z", Source::official())),
        ],
    );
    orchestrator.run_batches(vec![batch]).await;

    let installed = std::fs::read_to_string(dir.path().join("install_log.log")).expect("read");
    assert_eq!(installed.lines().count(), 1);
    assert!(installed.trim_end().ends_with(" x"));
    let removed = std::fs::read_to_string(dir.path().join("remove_log.log")).expect("read");
    assert_eq!(removed, "z\n");
}

#[tokio::test]
/// What: Dry runs skip the database lock check and write no audit logs
///
/// Inputs:
/// - Existing lock file; dry-run orchestrator with an audit dir.
///
/// Output:
/// - Job runs; lock file untouched; no install log.
async fn dry_run_skips_db_lock_check() {
    let dir = tempfile::tempdir().expect("tempdir");
    let lock_file = dir.path().join("db.lck");
    std::fs::write(&lock_file, b"").expect("write lock");
    let ex = Arc::new(CountingExecutor::default());
    let orchestrator = Orchestrator::new(ex.clone(), &settings_in(dir.path(), true))
        .with_audit_dir(dir.path().to_path_buf());

    let reports = orchestrator
        .run_batches(vec![Batch::new("dry", vec![install("a")])])
        .await;

    assert!(reports[0].refused.is_none());
    assert!(lock_file.exists());
    assert!(!dir.path().join("install_log.log").exists());
    assert_eq!(ex.calls.lock().expect("calls").len(), 1);
}

#[test]
/// What: A held database lock refuses the batch before any job runs
///
/// Inputs:
/// - `run_batch` with a check reporting `LockHeld`.
///
/// Output:
/// - Every job skipped; executor untouched.
fn held_db_lock_refuses_batch() {
    let ex = CountingExecutor::default();
    let report = run_batch(
        Batch::new("official", vec![install("a"), install("b")]),
        &ex,
        &BatchLock::new(),
        || {
            Err(PkError::LockHeld {
                path: "/var/lib/pacman/db.lck".into(),
            })
        },
    );
    assert!(report.refused.is_some());
    assert!(
        report
            .reports
            .iter()
            .all(|r| matches!(r.status, JobStatus::Skipped(_)))
    );
    assert!(ex.calls.lock().expect("calls").is_empty());
}
