//! Companion package suggestions.

use crate::logic::selection::{SelectionError, parse_selection};
use crate::prompt::Console;

/// Static recommendations keyed by package name.
const RECOMMENDED: &[(&str, &[&str])] = &[
    ("vim", &["vim-plugin", "vim-airline"]),
    ("python", &["python-pip", "python-virtualenv"]),
];

/// What: Look up companion packages recommended alongside `pkg_name`.
///
/// Inputs:
/// - `pkg_name`: Package the operator installed or asked about.
///
/// Output:
/// - Recommended names in display order; empty for unknown packages.
#[must_use]
pub fn suggest(pkg_name: &str) -> Vec<String> {
    RECOMMENDED
        .iter()
        .find(|(name, _)| *name == pkg_name)
        .map(|(_, recs)| recs.iter().map(ToString::to_string).collect())
        .unwrap_or_default()
}

/// What the operator did with a list of suggestions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionOutcome {
    /// Nothing to suggest for this package.
    NoSuggestions,
    /// Operator left the prompt empty.
    Skipped,
    /// Names picked for installation, in selection order.
    Selected(Vec<String>),
    /// Operator typed something unusable; nothing is installed.
    Invalid(SelectionError),
}

/// What: List suggestions for `pkg_name` and read the operator's picks.
///
/// Inputs:
/// - `pkg_name`: Package to suggest companions for.
/// - `console`: Operator channel.
///
/// Output:
/// - [`SuggestionOutcome`]; installation is left to the caller.
///
/// Details:
/// - Uses the same numbering and selection syntax as the search prompt.
pub fn offer_suggestions(pkg_name: &str, console: &mut dyn Console) -> SuggestionOutcome {
    tracing::info!(package = %pkg_name, "fetching suggestions");
    let recommended = suggest(pkg_name);
    if recommended.is_empty() {
        console.show(&format!("No additional packages suggested for {pkg_name}."));
        return SuggestionOutcome::NoSuggestions;
    }
    console.show(&format!("Suggested additional packages for {pkg_name}:"));
    for (idx, name) in recommended.iter().enumerate() {
        console.show(&format!("{}. {name}", idx + 1));
    }
    let answer = console
        .ask("Select packages to install (e.g., 1 2 or leave blank to skip): ")
        .unwrap_or_default();
    match parse_selection(&answer, recommended.len()) {
        Ok(picked) if picked.is_empty() => SuggestionOutcome::Skipped,
        Ok(picked) => SuggestionOutcome::Selected(
            picked.into_iter().map(|i| recommended[i].clone()).collect(),
        ),
        Err(e) => {
            console.show(&format!("Error suggesting packages: {e}"));
            tracing::warn!(package = %pkg_name, error = %e, "invalid suggestion selection");
            SuggestionOutcome::Invalid(e)
        }
    }
}
