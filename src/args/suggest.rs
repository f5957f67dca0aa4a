//! Command-line companion package suggestions.

use pk::logic::{SuggestionOutcome, offer_suggestions};
use pk::prompt::Console;
use pk::state::{PackageRecord, Source};

use crate::args::Context;
use crate::args::install::install_records;
use crate::args::utils::Outcome;

/// What: Handle `pk suggest <package>`.
///
/// Output:
/// - `Aborted` for an empty or malformed selection; `Completed` otherwise,
///   including when there is nothing to suggest.
pub async fn handle_suggest(ctx: &Context, package: &str, console: &mut dyn Console) -> Outcome {
    console.show(&format!("Fetching suggestions for {package}..."));
    match offer_suggestions(package, console) {
        SuggestionOutcome::NoSuggestions => Outcome::Completed,
        SuggestionOutcome::Skipped | SuggestionOutcome::Invalid(_) => Outcome::Aborted,
        SuggestionOutcome::Selected(names) => {
            let records = names
                .into_iter()
                .map(|n| PackageRecord::new(n, Source::official()))
                .collect();
            install_records(ctx, records, console).await
        }
    }
}
