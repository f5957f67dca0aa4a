//! Materialize a dependency tree before cycle analysis.

use std::collections::HashSet;

use super::parse::parse_pacman_si_deps;
use crate::error::Result;
use crate::state::{PackageRecord, Source};
use crate::util::pacman::run_pacman;

/// Source of direct dependency names for a package.
pub trait DependencyProvider {
    /// What: Return the direct dependencies of `name` in declared order.
    ///
    /// # Errors
    /// - Returns `Err` when the package cannot be queried.
    fn direct_dependencies(&self, name: &str) -> Result<Vec<String>>;
}

/// Dependency provider backed by `pacman -Si`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PacmanDependencies;

impl DependencyProvider for PacmanDependencies {
    fn direct_dependencies(&self, name: &str) -> Result<Vec<String>> {
        let text = run_pacman(&["-Si", name], name)?;
        Ok(parse_pacman_si_deps(&text))
    }
}

/// A loaded dependency tree and the packages whose dependencies are unknown.
#[derive(Debug, Clone)]
pub struct LoadedGraph {
    /// Root package with its dependencies filled in.
    pub root: PackageRecord,
    /// Dependencies the provider could not answer for, in discovery order.
    /// They appear as leaves in `root`, so cycles through them are not seen.
    pub unresolved: Vec<String>,
}

impl LoadedGraph {
    /// Whether every package in the tree was resolved.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// What: Build the dependency tree rooted at `root` from `provider`.
///
/// Inputs:
/// - `root`: Package to start from; its name, source and metadata are kept.
/// - `provider`: Where direct dependencies come from.
///
/// Output:
/// - [`LoadedGraph`] with the full tree and any unresolved dependencies.
///
/// # Errors
/// - Returns the provider's error when `root` itself cannot be queried.
///
/// Details:
/// - Depth-first in declared order. Only the first occurrence of a name is
///   expanded; later occurrences become leaves with the same name, so cyclic
///   providers still yield a finite tree and name-based cycle detection sees
///   the same back-edges as on the real graph.
/// - Dependencies are tagged as official; the loader cannot tell AUR
///   dependencies apart without querying the AUR.
pub fn load_graph(
    mut root: PackageRecord,
    provider: &dyn DependencyProvider,
) -> Result<LoadedGraph> {
    let names = provider.direct_dependencies(&root.name)?;
    let mut expanded = HashSet::from([root.name.clone()]);
    let mut unresolved = Vec::new();
    root.dependencies = names
        .into_iter()
        .map(|name| expand(name, provider, &mut expanded, &mut unresolved))
        .collect();
    Ok(LoadedGraph { root, unresolved })
}

/// Recursive step of [`load_graph`].
fn expand(
    name: String,
    provider: &dyn DependencyProvider,
    expanded: &mut HashSet<String>,
    unresolved: &mut Vec<String>,
) -> PackageRecord {
    let mut node = PackageRecord::new(name, Source::official());
    if !expanded.insert(node.name.clone()) {
        return node;
    }
    let names = match provider.direct_dependencies(&node.name) {
        Ok(names) => names,
        Err(e) => {
            tracing::warn!(package = %node.name, error = %e, "could not resolve dependencies");
            unresolved.push(node.name.clone());
            return node;
        }
    };
    node.dependencies = names
        .into_iter()
        .map(|name| expand(name, provider, expanded, unresolved))
        .collect();
    node
}
