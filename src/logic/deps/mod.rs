//! Dependency data for cycle analysis.
//!
//! Everything here runs before analysis starts; the cycle detector only ever
//! sees the finished tree.

mod graph;
mod parse;

pub use graph::{DependencyProvider, LoadedGraph, PacmanDependencies, load_graph};
pub use parse::{parse_dep_spec, parse_pacman_si_deps, parse_si_list};
