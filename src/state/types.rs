//! Core value types used across pk.

use std::fmt;

/// Package source origin.
///
/// Indicates whether a package originates from the official repositories or
/// the Arch User Repository.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Source {
    /// Official repository package.
    Official {
        /// Repository it was found in (`core`, `extra`, ...); empty when unknown.
        repo: String,
    },
    /// AUR package.
    Aur,
}

impl Source {
    /// Official source with an unknown repository.
    #[must_use]
    pub const fn official() -> Self {
        Self::Official {
            repo: String::new(),
        }
    }

    /// Short tag used in listings: the repo name, `repo`, or `aur`.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Official { repo } if !repo.is_empty() => repo,
            Self::Official { .. } => "repo",
            Self::Aur => "aur",
        }
    }

    /// Whether the package is built from an AUR build script.
    #[must_use]
    pub const fn is_aur(&self) -> bool {
        matches!(self, Self::Aur)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Immutable description of a package as seen by one command invocation.
///
/// `dependencies` is a snapshot materialized before any analysis runs; a
/// record whose name matches one of its ancestors expresses a cycle.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PackageRecord {
    /// Canonical package name, unique within one dependency traversal.
    pub name: String,
    /// One-line description suitable for list display.
    pub description: String,
    /// Origin of the package (official repo or AUR).
    pub source: Source,
    /// Version string when the caller knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Direct dependencies in declared order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<PackageRecord>,
}

impl PackageRecord {
    /// What: Create a record with no description, version or dependencies.
    ///
    /// Inputs:
    /// - `name`: Package name.
    /// - `source`: Where the package comes from.
    ///
    /// Output:
    /// - Bare `PackageRecord`.
    #[must_use]
    pub fn new(name: impl Into<String>, source: Source) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            source,
            version: None,
            dependencies: Vec::new(),
        }
    }

    /// Builder-style setter for the version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Builder-style setter for the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder-style setter for the direct dependencies.
    #[must_use]
    pub fn with_dependencies(mut self, dependencies: Vec<Self>) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// Version for display, `"unknown"` when absent.
    #[must_use]
    pub fn version_or_unknown(&self) -> &str {
        self.version.as_deref().unwrap_or("unknown")
    }
}
