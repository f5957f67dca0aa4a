//! Process-wide batch lock and the pacman database lock check.

use std::io;
use std::path::Path;
use std::process::Command;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{PkError, Result};
use crate::util::is_root;
use crate::util::pacman::run_status;

/// Coarse lock serializing every batch that touches the package database.
///
/// Clones share the same underlying mutex.
#[derive(Debug, Clone, Default)]
pub struct BatchLock(Arc<Mutex<()>>);

impl BatchLock {
    /// Create a new, unlocked batch lock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// What: Block until the lock is free and take it.
    ///
    /// Output:
    /// - Guard releasing the lock on drop.
    ///
    /// Details:
    /// - A batch that panicked while holding the lock leaves nothing to
    ///   repair, so a poisoned mutex is recovered.
    pub fn acquire(&self) -> MutexGuard<'_, ()> {
        self.0
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// What: Whether a `pacman` process is currently running.
///
/// Output:
/// - `Ok(true)` when `pgrep -x pacman` finds one.
///
/// # Errors
/// - Returns `MissingTool` when `pgrep` is not installed.
pub fn pacman_running() -> Result<bool> {
    match Command::new("pgrep").args(["-x", "pacman"]).output() {
        Ok(out) => Ok(out.status.success()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(PkError::missing_tool("pgrep")),
        Err(e) => Err(PkError::Io(e)),
    }
}

/// What: Make sure the pacman database lock does not block the next batch.
///
/// Inputs:
/// - `path`: Database lock file.
/// - `probe`: Reports whether pacman is running; [`pacman_running`] in production.
///
/// Output:
/// - `Ok(())` when there is no lock file or a stale one was removed.
///
/// # Errors
/// - `LockHeld` when pacman is running and owns the lock.
/// - IO or command errors when the stale file cannot be removed.
///
/// Details:
/// - The probe is only consulted when the lock file exists.
/// - Removal falls back to `sudo rm -f` when permission is denied.
pub fn clear_stale_db_lock(path: &Path, probe: impl FnOnce() -> Result<bool>) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    if probe()? {
        tracing::warn!(path = %path.display(), "pacman database is locked by a running pacman");
        return Err(PkError::LockHeld {
            path: path.to_path_buf(),
        });
    }
    tracing::info!(path = %path.display(), "removing stale pacman database lock");
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied && !is_root() => {
            let mut cmd = Command::new("sudo");
            cmd.arg("rm").arg("-f").arg(path);
            run_status(&mut cmd, "db.lck")
        }
        Err(e) => Err(PkError::Io(e)),
    }
}
