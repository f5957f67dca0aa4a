//! Merging results from the official and AUR providers.

use std::future::Future;
use std::time::Duration;

use pk::error::{PkError, Result};
use pk::sources::{SearchProvider, parse_aur_response, parse_pacman_ss, search_all};
use pk::state::{PackageRecord, Source};

/// Provider returning canned results, optionally after a delay.
struct Canned {
    label: &'static str,
    items: Vec<PackageRecord>,
    delay_ms: u64,
    fail: bool,
}

impl SearchProvider for Canned {
    fn label(&self) -> &'static str {
        self.label
    }

    fn search(&self, _query: &str) -> impl Future<Output = Result<Vec<PackageRecord>>> + Send {
        let items = self.items.clone();
        let delay = Duration::from_millis(self.delay_ms);
        let fail = self.fail;
        async move {
            tokio::time::sleep(delay).await;
            if fail {
                return Err(PkError::Remote("service unavailable".into()));
            }
            Ok(items)
        }
    }
}

fn official(names: &[&str], delay_ms: u64) -> Canned {
    Canned {
        label: "official repositories",
        items: names
            .iter()
            .map(|n| PackageRecord::new(*n, Source::Official { repo: "extra".into() }))
            .collect(),
        delay_ms,
        fail: false,
    }
}

fn aur(names: &[&str], fail: bool) -> Canned {
    Canned {
        label: "AUR",
        items: names
            .iter()
            .map(|n| PackageRecord::new(*n, Source::Aur))
            .collect(),
        delay_ms: 0,
        fail,
    }
}

#[tokio::test]
/// What: Official results come first even when the AUR answers sooner; duplicates stay
///
/// Inputs:
/// - Official [vim, gvim] delayed; AUR [vim, vim-git] immediate.
///
/// Output:
/// - vim(extra), gvim, vim(aur), vim-git; no errors.
async fn search_official_first_with_duplicates() {
    let out = search_all(&official(&["vim", "gvim"], 20), &aur(&["vim", "vim-git"], false), "vim").await;
    assert!(out.errors.is_empty());
    let names: Vec<(&str, &str)> = out
        .items
        .iter()
        .map(|p| (p.name.as_str(), p.source.label()))
        .collect();
    assert_eq!(
        names,
        vec![("vim", "extra"), ("gvim", "extra"), ("vim", "aur"), ("vim-git", "aur")]
    );
}

#[tokio::test]
/// What: A failing provider is reported and the other one's results survive
///
/// Inputs:
/// - Official [nano]; AUR failing.
///
/// Output:
/// - One item; one error labelled AUR.
async fn search_survives_failing_provider() {
    let out = search_all(&official(&["nano"], 0), &aur(&[], true), "nano").await;
    assert_eq!(out.items.len(), 1);
    assert_eq!(out.errors.len(), 1);
    assert_eq!(out.errors[0].0, "AUR");
    assert!(matches!(out.errors[0].1, PkError::Remote(_)));
}

#[tokio::test]
/// What: No results anywhere is an empty, error-free outcome
///
/// Inputs:
/// - Both providers empty.
///
/// Output:
/// - No items, no errors.
async fn search_empty_everywhere() {
    let out = search_all(&official(&[], 0), &aur(&[], false), "zzz").await;
    assert!(out.items.is_empty());
    assert!(out.errors.is_empty());
}

#[test]
/// What: Real provider output formats parse into records
///
/// Inputs:
/// - `pacman -Ss` text and an AUR RPC search payload with a null description.
///
/// Output:
/// - Records with repo, version and description; AUR description empty.
fn search_provider_formats_parse() {
    let ss = "core/nano 8.2-1
    Pico editor clone with enhancements
extra/nano-syntax-highlighting 2020.10.10-3
    Nano editor syntax highlighting enhancements
";
    let repo = parse_pacman_ss(ss);
    assert_eq!(repo.len(), 2);
    assert_eq!(repo[0].source.label(), "core");
    assert_eq!(repo[0].version.as_deref(), Some("8.2-1"));
    assert_eq!(repo[1].description, "Nano editor syntax highlighting enhancements");

    let body = serde_json::json!({
        "resultcount": 1,
        "type": "search",
        "version": 5,
        "results": [{"Name": "nano-git", "Version": "8.2.r1-1", "Description": null}]
    });
    let aur = parse_aur_response(&body).expect("parse");
    assert_eq!(aur.len(), 1);
    assert_eq!(aur[0].name, "nano-git");
    assert!(aur[0].description.is_empty());
    assert_eq!(aur[0].source, Source::Aur);
}
