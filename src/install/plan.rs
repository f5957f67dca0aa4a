//! Turn selected packages into batches, resolving conflicts on the way.

use super::batch::{Batch, Job};
use super::executor::ConflictProbe;
use crate::logic::conflict::{Decision, installed_conflicts, resolve_conflict};
use crate::prompt::Console;
use crate::state::PackageRecord;

/// The batch ready for the orchestrator plus what the operator turned down.
#[derive(Debug)]
pub struct InstallPlan {
    /// One batch for the whole command: official jobs first, then AUR jobs.
    pub batch: Batch,
    /// Packages dropped because the operator declined a conflict prompt.
    pub declined: Vec<String>,
}

impl InstallPlan {
    /// Whether there is nothing left to run.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.batch.jobs.is_empty()
    }
}

/// What: Build install batches for `records`, asking about every conflict.
///
/// Inputs:
/// - `records`: Packages the operator chose, in selection order.
/// - `probe`: Installed-state and conflict queries.
/// - `console`: Operator channel for conflict prompts.
///
/// Output:
/// - [`InstallPlan`] holding a single `install` batch.
///
/// Details:
/// - The batch runs under one lock acquisition, so official packages are
///   always installed before AUR packages that may build against them.
/// - A package without installed conflicts becomes `Job::Install`.
/// - With conflicts, each one is asked about in turn. Any refusal drops the
///   package. If all are accepted, extra conflicts become `Job::Remove` and
///   the first one becomes `Job::Replace`.
#[must_use]
pub fn plan_installs(
    records: Vec<PackageRecord>,
    probe: &dyn ConflictProbe,
    console: &mut dyn Console,
) -> InstallPlan {
    let mut official = Vec::new();
    let mut aur = Vec::new();
    let mut declined = Vec::new();

    for incoming in records {
        let conflicts = installed_conflicts(&incoming, probe);
        let accepted = conflicts
            .iter()
            .all(|existing| resolve_conflict(existing, &incoming, console) == Decision::Replace);
        if !accepted {
            declined.push(incoming.name.clone());
            continue;
        }
        let target = if incoming.source.is_aur() {
            &mut aur
        } else {
            &mut official
        };
        let mut conflicts = conflicts.into_iter();
        match conflicts.next() {
            None => target.push(Job::Install(incoming)),
            Some(first) => {
                target.extend(conflicts.map(Job::Remove));
                target.push(Job::Replace {
                    existing: first,
                    incoming,
                });
            }
        }
    }

    official.append(&mut aur);
    InstallPlan {
        batch: Batch::new("install", official),
        declined,
    }
}
