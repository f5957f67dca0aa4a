//! Loading dependency trees from a provider and analysing them.

use std::collections::HashMap;

use pk::error::{PkError, Result};
use pk::logic::deps::{DependencyProvider, load_graph};
use pk::logic::{find_cycle, has_cycle};
use pk::state::{PackageRecord, Source};

/// Provider answering from an in-memory adjacency map.
struct MapProvider(HashMap<String, Vec<String>>);

impl MapProvider {
    fn new(edges: &[(&str, &[&str])]) -> Self {
        Self(
            edges
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.iter().map(ToString::to_string).collect()))
                .collect(),
        )
    }
}

impl DependencyProvider for MapProvider {
    fn direct_dependencies(&self, name: &str) -> Result<Vec<String>> {
        self.0.get(name).cloned().ok_or_else(|| PkError::CommandFailed {
            program: "pacman".into(),
            package: name.into(),
            code: Some(1),
        })
    }
}

/// Number of nodes in the tree.
fn count(node: &PackageRecord) -> usize {
    1 + node.dependencies.iter().map(count).sum::<usize>()
}

fn root(name: &str) -> PackageRecord {
    PackageRecord::new(name, Source::official())
}

#[test]
/// What: Cyclic providers yield a finite tree that reports the cycle
///
/// Inputs:
/// - Provider graph `a -> b -> c -> a`.
///
/// Output:
/// - Loader terminates; cycle `a -> b -> c -> a` found; the closing node is a leaf.
fn graph_cyclic_provider_terminates() {
    let p = MapProvider::new(&[("a", &["b"]), ("b", &["c"]), ("c", &["a"])]);
    let tree = load_graph(root("a"), &p).expect("load").root;
    assert!(has_cycle(&tree));
    assert_eq!(
        find_cycle(&tree),
        Some(vec!["a".into(), "b".into(), "c".into(), "a".into()])
    );
    let closing = &tree.dependencies[0].dependencies[0].dependencies[0];
    assert_eq!(closing.name, "a");
    assert!(closing.dependencies.is_empty());
}

#[test]
/// What: Diamond graphs load and analyse as acyclic
///
/// Inputs:
/// - `a -> {b, c}`, `b -> d`, `c -> d`, `d -> e`.
///
/// Output:
/// - No cycle; `d` appears under both parents.
fn graph_diamond_is_acyclic() {
    let p = MapProvider::new(&[
        ("a", &["b", "c"]),
        ("b", &["d"]),
        ("c", &["d"]),
        ("d", &["e"]),
        ("e", &[]),
    ]);
    let tree = load_graph(root("a"), &p).expect("load").root;
    assert!(!has_cycle(&tree));
    assert_eq!(tree.dependencies[0].dependencies[0].name, "d");
    assert_eq!(tree.dependencies[1].dependencies[0].name, "d");
}

#[test]
/// What: Long diamond ladders stay small and fast
///
/// Inputs:
/// - 200 stacked diamonds from the provider.
///
/// Output:
/// - Tree size linear in the number of edges; no cycle.
fn graph_diamond_ladder_linear() {
    let levels = 200;
    let mut edges: HashMap<String, Vec<String>> = HashMap::new();
    for i in 0..levels {
        let next = format!("n{}", i + 1);
        edges.insert(format!("n{i}"), vec![format!("l{i}"), format!("r{i}")]);
        edges.insert(format!("l{i}"), vec![next.clone()]);
        edges.insert(format!("r{i}"), vec![next]);
    }
    edges.insert(format!("n{levels}"), Vec::new());
    let p = MapProvider(edges);

    let tree = load_graph(root("n0"), &p).expect("load").root;
    assert!(!has_cycle(&tree));
    assert_eq!(count(&tree), 4 * levels + 1);
}

#[test]
/// What: A package reached first on a long path still closes a short cycle
///
/// Inputs:
/// - `a -> {c1, x}`, `c1 -> c2 -> x`, `x -> a`.
///
/// Output:
/// - `x` is expanded where first met, so `a -> c1 -> c2 -> x -> a` is found.
fn graph_cycle_behind_long_path_found() {
    let p = MapProvider::new(&[
        ("a", &["c1", "x"]),
        ("c1", &["c2"]),
        ("c2", &["x"]),
        ("x", &["a"]),
    ]);
    let graph = load_graph(root("a"), &p).expect("load");
    assert!(graph.is_complete());
    assert!(has_cycle(&graph.root));
    assert_eq!(
        find_cycle(&graph.root),
        Some(vec![
            "a".into(),
            "c1".into(),
            "c2".into(),
            "x".into(),
            "a".into()
        ])
    );
}

#[test]
/// What: Unknown dependencies are listed, an unknown root is an error
///
/// Inputs:
/// - `a -> {b, missing}`, `b -> c -> a`; then root `nowhere`.
///
/// Output:
/// - `missing` is an unresolved leaf and the cycle is still found;
///   `nowhere` returns the provider's `CommandFailed`.
fn graph_unresolved_and_failing_root() {
    let p = MapProvider::new(&[("a", &["b", "missing"]), ("b", &["c"]), ("c", &["a"])]);
    let graph = load_graph(root("a"), &p).expect("load");
    assert_eq!(graph.unresolved, vec!["missing"]);
    assert!(graph.root.dependencies[1].dependencies.is_empty());
    assert!(has_cycle(&graph.root));

    let err = load_graph(root("nowhere"), &p).expect_err("root lookup fails");
    assert!(matches!(
        err,
        PkError::CommandFailed { ref package, .. } if package == "nowhere"
    ));
}
