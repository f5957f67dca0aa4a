//! Official repository search through `pacman -Ss`.

use std::future::Future;
use std::io;

use super::SearchProvider;
use crate::error::{PkError, Result};
use crate::state::{PackageRecord, Source};
use crate::util::pacman::run_pacman;

/// Search provider for the sync databases configured in pacman.
#[derive(Debug, Default, Clone, Copy)]
pub struct RepoSearch;

impl SearchProvider for RepoSearch {
    fn label(&self) -> &'static str {
        "official repositories"
    }

    fn search(&self, query: &str) -> impl Future<Output = Result<Vec<PackageRecord>>> + Send {
        let query = query.to_string();
        async move {
            tokio::task::spawn_blocking(move || search_repo(&query))
                .await
                .map_err(|e| PkError::Io(io::Error::other(e)))?
        }
    }
}

/// What: Run `pacman -Ss` and parse its output.
///
/// Details:
/// - pacman exits with status 1 and no output when nothing matches; that is
///   an empty result, not an error.
fn search_repo(query: &str) -> Result<Vec<PackageRecord>> {
    match run_pacman(&["-Ss", query], query) {
        Ok(text) => Ok(parse_pacman_ss(&text)),
        Err(PkError::CommandFailed { code: Some(1), .. }) => {
            tracing::info!(query = %query, "no package found in official repositories");
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

/// What: Parse `pacman -Ss` output into package records.
///
/// Inputs:
/// - `text`: Raw stdout, alternating `repo/name version [flags]` header lines
///   and indented description lines.
///
/// Output:
/// - One record per header line, in output order.
///
/// Details:
/// - Header lines without a `repo/` prefix are accepted with an empty repo.
/// - A header without a following description line gets an empty description.
#[must_use]
pub fn parse_pacman_ss(text: &str) -> Vec<PackageRecord> {
    let mut items: Vec<PackageRecord> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        if line.starts_with(char::is_whitespace) {
            if let Some(last) = items.last_mut()
                && last.description.is_empty()
            {
                last.description = line.trim().to_string();
            }
            continue;
        }
        let mut parts = line.split_whitespace();
        let Some(spec) = parts.next() else {
            continue;
        };
        let (repo, name) = spec.split_once('/').unwrap_or(("", spec));
        let mut rec = PackageRecord::new(
            name,
            Source::Official {
                repo: repo.to_string(),
            },
        );
        rec.version = parts.next().map(str::to_string);
        items.push(rec);
    }
    items
}
