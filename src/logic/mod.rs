//! Core non-I/O logic: cycle detection, conflict decisions, suggestions and
//! selection parsing.
//!
//! Every function here either is pure or talks to the operator through a
//! [`Console`](crate::prompt::Console) it is handed; none of them run external
//! programs except through the collaborators passed in.

pub mod conflict;
pub mod cycle;
pub mod deps;
pub mod selection;
pub mod suggest;

pub use conflict::{Decision, ReplaceOutcome, apply_decision, decide, resolve_conflict};
pub use cycle::{CycleDecision, check_cycles, find_cycle, has_cycle};
pub use selection::{SelectionError, parse_selection};
pub use suggest::{SuggestionOutcome, offer_suggestions, suggest};
