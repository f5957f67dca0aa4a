//! Cycle detection over hand-built dependency trees.

use std::time::{Duration, Instant};

use pk::logic::{CycleDecision, check_cycles, find_cycle, has_cycle};
use pk::prompt::ScriptedConsole;
use pk::state::{PackageRecord, Source};

fn pkg(name: &str, deps: Vec<PackageRecord>) -> PackageRecord {
    PackageRecord::new(name, Source::official()).with_dependencies(deps)
}

fn leaf(name: &str) -> PackageRecord {
    pkg(name, Vec::new())
}

#[test]
/// What: Three-node loop is detected and reported in path order
///
/// Inputs:
/// - `a -> b -> c -> a`, the last `a` a stub naming the root.
///
/// Output:
/// - `has_cycle` true; `find_cycle` yields `a, b, c, a`.
fn cycle_three_node_loop() {
    let root = pkg("a", vec![pkg("b", vec![pkg("c", vec![leaf("a")])])]);
    assert!(has_cycle(&root));
    assert_eq!(
        find_cycle(&root),
        Some(vec!["a".into(), "b".into(), "c".into(), "a".into()])
    );
}

#[test]
/// What: Diamonds are not cycles
///
/// Inputs:
/// - `a -> {b, c}`, `b -> d`, `c -> d` with d fully repeated under c.
///
/// Output:
/// - No cycle from either entry point.
fn cycle_diamond_is_acyclic() {
    let d = pkg("d", vec![leaf("e")]);
    let root = pkg("a", vec![pkg("b", vec![d.clone()]), pkg("c", vec![d])]);
    assert!(!has_cycle(&root));
    assert!(find_cycle(&root).is_none());
}

#[test]
/// What: A cycle below a diamond is still found
///
/// Inputs:
/// - Diamond via d where d -> e -> b and b is an ancestor on the first path.
///
/// Output:
/// - Cycle `b -> d -> e -> b`.
fn cycle_below_diamond_found() {
    let d = pkg("d", vec![pkg("e", vec![leaf("b")])]);
    let root = pkg("a", vec![pkg("b", vec![d.clone()]), pkg("c", vec![d])]);
    assert!(has_cycle(&root));
    assert_eq!(
        find_cycle(&root),
        Some(vec!["b".into(), "d".into(), "e".into(), "b".into()])
    );
}

#[test]
/// What: Self-loops are cycles; lone leaves are not
///
/// Inputs:
/// - `a -> a`; `z` with no dependencies.
///
/// Output:
/// - true; false.
fn cycle_self_loop_and_leaf() {
    assert!(has_cycle(&pkg("a", vec![leaf("a")])));
    assert!(!has_cycle(&leaf("z")));
}

#[test]
/// What: Sibling revisits after the stack pops are not back-edges
///
/// Inputs:
/// - `a -> {b, c}`, `b -> x`, `c -> x`, `x -> y`; x finished before c runs.
///
/// Output:
/// - No cycle.
fn cycle_pop_on_return() {
    let x = pkg("x", vec![leaf("y")]);
    let root = pkg("a", vec![pkg("b", vec![x.clone()]), pkg("c", vec![x, leaf("b")])]);
    assert!(!has_cycle(&root));
}

/// Ladder of `levels` stacked diamonds with every shared subtree copied in full.
fn diamond_ladder(levels: usize) -> PackageRecord {
    let mut below = leaf("bottom");
    for i in (0..levels).rev() {
        let left = pkg(&format!("l{i}"), vec![below.clone()]);
        let right = pkg(&format!("r{i}"), vec![below]);
        below = pkg(&format!("n{i}"), vec![left, right]);
    }
    below
}

#[test]
/// What: Shared subtrees are explored once
///
/// Inputs:
/// - 16-level diamond ladder (tens of thousands of copied nodes, 2^16 paths).
///
/// Output:
/// - No cycle, well under a second.
fn cycle_diamond_ladder_is_linear() {
    let root = diamond_ladder(16);
    let started = Instant::now();
    assert!(!has_cycle(&root));
    assert!(find_cycle(&root).is_none());
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[test]
/// What: Operator decisions after a detected cycle
///
/// Inputs:
/// - Cyclic tree answered with "", "n", "maybe"; acyclic tree with no answers.
///
/// Output:
/// - Skip, Proceed, Skip; NoCycle without a prompt.
fn cycle_prompt_decisions() {
    let cyclic = pkg("a", vec![pkg("b", vec![leaf("a")])]);
    let mut c = ScriptedConsole::new(["", "n", "maybe"]);
    assert_eq!(check_cycles(&cyclic, &mut c), CycleDecision::Skip);
    assert!(c.saw("a -> b -> a"));
    assert_eq!(check_cycles(&cyclic, &mut c), CycleDecision::Proceed);
    assert_eq!(check_cycles(&cyclic, &mut c), CycleDecision::Skip);

    let mut quiet = ScriptedConsole::new(Vec::<String>::new());
    assert_eq!(check_cycles(&leaf("z"), &mut quiet), CycleDecision::NoCycle);
    assert!(!quiet.saw("skip installation"));
}
