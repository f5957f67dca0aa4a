//! AUR search through the RPC interface.

use std::future::Future;
use std::time::Duration;

use serde_json::Value;

use super::SearchProvider;
use crate::error::{PkError, Result};
use crate::state::{PackageRecord, Source};
use crate::util::{percent_encode, s};

/// Search provider backed by the AUR RPC `search` endpoint.
#[derive(Debug, Clone)]
pub struct AurSearch {
    client: reqwest::Client,
    base_url: String,
}

impl AurSearch {
    /// What: Create a provider for the RPC interface at `base_url`.
    ///
    /// Inputs:
    /// - `base_url`: e.g. `https://aur.archlinux.org/rpc/v5`.
    ///
    /// # Errors
    /// - Returns `Err` when the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(15))
            .timeout(Duration::from_secs(30))
            .user_agent(format!("pk/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Search URL for `query`.
    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/search/{}?by=name-desc",
            self.base_url,
            percent_encode(query.trim())
        )
    }
}

impl SearchProvider for AurSearch {
    fn label(&self) -> &'static str {
        "AUR"
    }

    fn search(&self, query: &str) -> impl Future<Output = Result<Vec<PackageRecord>>> + Send {
        let url = self.search_url(query);
        let client = self.client.clone();
        async move {
            tracing::debug!(url = %url, "querying AUR");
            let body: Value = client
                .get(&url)
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;
            parse_aur_response(&body)
        }
    }
}

/// What: Turn an AUR RPC search response into package records.
///
/// Inputs:
/// - `body`: Decoded JSON response.
///
/// Output:
/// - One AUR record per result with a non-empty `Name`, in response order.
///
/// # Errors
/// - `PkError::Remote` when the response has `"type": "error"`.
///
/// Details:
/// - `Description` may be `null`; it becomes an empty string.
pub fn parse_aur_response(body: &Value) -> Result<Vec<PackageRecord>> {
    if body.get("type").and_then(Value::as_str) == Some("error") {
        let msg = s(body, "error");
        return Err(PkError::Remote(if msg.is_empty() {
            "unknown error".to_string()
        } else {
            msg
        }));
    }
    let Some(results) = body.get("results").and_then(Value::as_array) else {
        return Ok(Vec::new());
    };
    Ok(results
        .iter()
        .filter_map(|pkg| {
            let name = s(pkg, "Name");
            if name.is_empty() {
                return None;
            }
            let version = s(pkg, "Version");
            let mut rec = PackageRecord::new(name, Source::Aur).with_description(s(pkg, "Description"));
            rec.version = (!version.is_empty()).then_some(version);
            Some(rec)
        })
        .collect())
}
