//! Package search across the official repositories and the AUR.

use std::future::Future;

use crate::error::Result;
use crate::state::PackageRecord;

mod aur;
mod repo;
mod search;

pub use aur::{AurSearch, parse_aur_response};
pub use repo::{RepoSearch, parse_pacman_ss};
pub use search::{SearchOutcome, search_all};

/// A place packages can be searched in.
pub trait SearchProvider {
    /// Short label used in progress and error messages.
    fn label(&self) -> &'static str;

    /// What: Search for packages matching `query`.
    ///
    /// Output:
    /// - Matching records in the provider's own order.
    ///
    /// # Errors
    /// - Returns `Err` when the provider cannot be queried at all; "no
    ///   matches" is an empty `Ok`.
    fn search(&self, query: &str) -> impl Future<Output = Result<Vec<PackageRecord>>> + Send;
}
