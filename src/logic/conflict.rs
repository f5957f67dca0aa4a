//! Conflict resolution between an installed package and an incoming one.
//!
//! Asking and acting are separate: [`resolve_conflict`] only talks to the
//! operator, [`apply_decision`] only talks to the executor.

use crate::error::PkError;
use crate::install::{ConflictProbe, Executor};
use crate::prompt::Console;
use crate::state::PackageRecord;

/// What the operator chose for a conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Remove the existing package, then install the incoming one.
    Replace,
    /// Leave everything as is.
    Abort,
}

/// What: Map the operator's answer to the replace question onto a decision.
///
/// Inputs:
/// - `answer`: Raw line typed by the operator.
///
/// Output:
/// - `Replace` only for `y` / `yes` (any case); empty input aborts.
#[must_use]
pub fn decide(answer: &str) -> Decision {
    let a = answer.trim();
    if a.eq_ignore_ascii_case("y") || a.eq_ignore_ascii_case("yes") {
        Decision::Replace
    } else {
        Decision::Abort
    }
}

/// What: Present two conflicting packages and ask whether to replace.
///
/// Inputs:
/// - `existing`: Package currently installed.
/// - `incoming`: Package the operator wants to install.
/// - `console`: Operator channel.
///
/// Output:
/// - The operator's [`Decision`]. A failed read aborts.
pub fn resolve_conflict(
    existing: &PackageRecord,
    incoming: &PackageRecord,
    console: &mut dyn Console,
) -> Decision {
    console.show(&format!(
        "Conflict detected between {} and {}.",
        existing.name, incoming.name
    ));
    for pkg in [existing, incoming] {
        console.show(&format!(
            "{}: {} from {}",
            pkg.name,
            pkg.version_or_unknown(),
            pkg.source
        ));
    }
    let answer = console
        .ask("Do you want to remove the existing package and install the new one? (y/N): ")
        .unwrap_or_default();
    let decision = decide(&answer);
    if decision == Decision::Abort {
        console.show("Installation aborted.");
        tracing::info!(existing = %existing.name, incoming = %incoming.name, "conflict resolution aborted by user");
    }
    decision
}

/// Result of carrying out a [`Decision`].
#[derive(Debug)]
pub enum ReplaceOutcome {
    /// Nothing was done.
    Aborted,
    /// Existing package removed and incoming package installed.
    Replaced,
    /// Removal failed; the install was not attempted.
    RemoveFailed(PkError),
    /// Removal succeeded but the install failed.
    InstallFailed(PkError),
}

impl ReplaceOutcome {
    /// Whether the replacement went through completely.
    #[must_use]
    pub const fn is_replaced(&self) -> bool {
        matches!(self, Self::Replaced)
    }
}

/// What: Carry out a conflict decision through the executor.
///
/// Inputs:
/// - `decision`: Operator's choice.
/// - `existing`: Package to remove on `Replace`.
/// - `incoming`: Package to install on `Replace`.
/// - `executor`: Install/remove collaborator.
///
/// Output:
/// - [`ReplaceOutcome`] describing what happened.
///
/// Details:
/// - The install half never runs when the remove half fails.
/// - Nothing already applied is rolled back.
#[must_use]
pub fn apply_decision(
    decision: Decision,
    existing: &PackageRecord,
    incoming: &PackageRecord,
    executor: &dyn Executor,
) -> ReplaceOutcome {
    if decision == Decision::Abort {
        return ReplaceOutcome::Aborted;
    }
    tracing::info!(existing = %existing.name, incoming = %incoming.name, "replacing conflicting package");
    if let Err(e) = executor.remove(existing) {
        tracing::error!(package = %existing.name, error = %e, "failed to remove conflicting package; install skipped");
        return ReplaceOutcome::RemoveFailed(e);
    }
    match executor.install(incoming) {
        Ok(()) => ReplaceOutcome::Replaced,
        Err(e) => {
            tracing::error!(package = %incoming.name, error = %e, "install failed after removing conflicting package");
            ReplaceOutcome::InstallFailed(e)
        }
    }
}

/// What: Find installed packages that conflict with `incoming`.
///
/// Inputs:
/// - `incoming`: Package about to be installed.
/// - `probe`: Source of declared conflicts and installed state.
///
/// Output:
/// - Installed records named in `incoming`'s conflicts, in declared order.
///
/// Details:
/// - A package never conflicts with an installed copy of itself; that is an
///   ordinary reinstall.
#[must_use]
pub fn installed_conflicts(
    incoming: &PackageRecord,
    probe: &dyn ConflictProbe,
) -> Vec<PackageRecord> {
    probe
        .conflicts_of(incoming)
        .iter()
        .filter(|name| **name != incoming.name)
        .filter_map(|name| probe.installed(name))
        .collect()
}
