//! Cycle detection over a materialized dependency tree.
//!
//! Nodes are identified by package name. Two sets drive the search:
//! `visited` holds every name ever entered, `on_stack` only the names on the
//! active path. A dependency already in `visited` but no longer on the stack
//! is a shared, fully explored subtree (a diamond) and is skipped.

use std::collections::HashSet;

use crate::prompt::Console;
use crate::state::PackageRecord;

/// What: Report whether a dependency cycle is reachable from `root`.
///
/// Inputs:
/// - `root`: Fully materialized dependency tree.
///
/// Output:
/// - `true` when some dependency points back at a package on the active path
///   (including a package listing itself).
///
/// Details:
/// - Runs in time proportional to the number of edges; shared subtrees are
///   explored once.
#[must_use]
pub fn has_cycle(root: &PackageRecord) -> bool {
    let mut visited = HashSet::new();
    let mut on_stack = HashSet::new();
    visit(root, &mut visited, &mut on_stack)
}

/// Recursive step of [`has_cycle`].
fn visit<'a>(
    node: &'a PackageRecord,
    visited: &mut HashSet<&'a str>,
    on_stack: &mut HashSet<&'a str>,
) -> bool {
    visited.insert(node.name.as_str());
    on_stack.insert(node.name.as_str());
    for dep in &node.dependencies {
        if !visited.contains(dep.name.as_str()) {
            if visit(dep, visited, on_stack) {
                return true;
            }
        } else if on_stack.contains(dep.name.as_str()) {
            return true;
        }
    }
    on_stack.remove(node.name.as_str());
    false
}

/// What: Find the names forming the first cycle reachable from `root`.
///
/// Inputs:
/// - `root`: Fully materialized dependency tree.
///
/// Output:
/// - `Some(path)` where `path` starts and ends with the same name
///   (e.g. `["a", "b", "c", "a"]`); `None` exactly when [`has_cycle`] is `false`.
///
/// Details:
/// - Same traversal order and skip rules as [`has_cycle`]; the active path is
///   also kept as an ordered vector so the cycle can be printed.
#[must_use]
pub fn find_cycle(root: &PackageRecord) -> Option<Vec<String>> {
    let mut visited = HashSet::new();
    let mut on_stack = HashSet::new();
    let mut path = Vec::new();
    trace(root, &mut visited, &mut on_stack, &mut path)
}

/// Recursive step of [`find_cycle`]; `path` holds the `on_stack` names in order.
fn trace<'a>(
    node: &'a PackageRecord,
    visited: &mut HashSet<&'a str>,
    on_stack: &mut HashSet<&'a str>,
    path: &mut Vec<&'a str>,
) -> Option<Vec<String>> {
    visited.insert(node.name.as_str());
    on_stack.insert(node.name.as_str());
    path.push(node.name.as_str());
    for dep in &node.dependencies {
        let name = dep.name.as_str();
        if !visited.contains(name) {
            if let Some(cycle) = trace(dep, visited, on_stack, path) {
                return Some(cycle);
            }
        } else if on_stack.contains(name) {
            let start = path.iter().position(|n| *n == name)?;
            let mut cycle: Vec<String> = path[start..].iter().map(ToString::to_string).collect();
            cycle.push(dep.name.clone());
            return Some(cycle);
        }
    }
    path.pop();
    on_stack.remove(node.name.as_str());
    None
}

/// Outcome of the cycle check prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleDecision {
    /// No cycle found; nothing was asked.
    NoCycle,
    /// Operator chose to skip installing the package.
    Skip,
    /// Operator chose to install despite the cycle.
    Proceed,
}

impl CycleDecision {
    /// What: Map the operator's answer to "skip this package?" onto a decision.
    ///
    /// Inputs:
    /// - `answer`: Raw line typed by the operator.
    ///
    /// Output:
    /// - `Proceed` only for an explicit `n` / `no`; everything else skips.
    #[must_use]
    pub fn from_answer(answer: &str) -> Self {
        let a = answer.trim();
        if a.eq_ignore_ascii_case("n") || a.eq_ignore_ascii_case("no") {
            Self::Proceed
        } else {
            Self::Skip
        }
    }
}

/// What: Check `root` for cycles and ask the operator what to do if one exists.
///
/// Inputs:
/// - `root`: Fully materialized dependency tree.
/// - `console`: Operator channel.
///
/// Output:
/// - `NoCycle`, or the operator's `Skip` / `Proceed` choice.
///
/// Details:
/// - A read error on the console counts as an empty answer (skip).
pub fn check_cycles(root: &PackageRecord, console: &mut dyn Console) -> CycleDecision {
    tracing::info!(package = %root.name, "checking for cyclic dependencies");
    let Some(cycle) = find_cycle(root) else {
        console.show(&format!("No cyclic dependencies found for {}.", root.name));
        return CycleDecision::NoCycle;
    };
    tracing::warn!(package = %root.name, cycle = %cycle.join(" -> "), "cyclic dependency detected");
    console.show(&format!(
        "Cyclic dependency detected for package {}: {}",
        root.name,
        cycle.join(" -> ")
    ));
    let answer = console
        .ask("Do you want to skip installation of this package? (Y/n): ")
        .unwrap_or_default();
    let decision = CycleDecision::from_answer(&answer);
    match decision {
        CycleDecision::Skip => {
            console.show(&format!("Skipping {}.", root.name));
            tracing::info!(package = %root.name, "skipped installation after cycle prompt");
        }
        CycleDecision::Proceed => {
            tracing::warn!(package = %root.name, "proceeding despite cyclic dependency");
        }
        CycleDecision::NoCycle => {}
    }
    decision
}
