//! Combined search over both providers.

use super::SearchProvider;
use crate::error::PkError;
use crate::state::PackageRecord;

/// Merged results of one search.
#[derive(Debug, Default)]
pub struct SearchOutcome {
    /// Official results followed by AUR results.
    pub items: Vec<PackageRecord>,
    /// Providers that failed, with their label.
    pub errors: Vec<(&'static str, PkError)>,
}

/// What: Query the official and the community provider and concatenate results.
///
/// Inputs:
/// - `official`: Official repository provider.
/// - `community`: AUR provider.
/// - `query`: Search text.
///
/// Output:
/// - [`SearchOutcome`] with official items first, then AUR items.
///
/// Details:
/// - Both providers run concurrently.
/// - No deduplication: a name found in both sources appears twice.
/// - A failing provider contributes no items and is recorded in `errors`.
pub async fn search_all<O, C>(official: &O, community: &C, query: &str) -> SearchOutcome
where
    O: SearchProvider + Sync,
    C: SearchProvider + Sync,
{
    tracing::info!(query = %query, "searching");
    let (off, com) = futures::join!(official.search(query), community.search(query));
    let mut outcome = SearchOutcome::default();
    for (label, res) in [(official.label(), off), (community.label(), com)] {
        match res {
            Ok(mut items) => {
                tracing::debug!(provider = label, count = items.len(), "search results");
                outcome.items.append(&mut items);
            }
            Err(e) => {
                tracing::warn!(provider = label, error = %e, "search provider failed");
                outcome.errors.push((label, e));
            }
        }
    }
    outcome
}
