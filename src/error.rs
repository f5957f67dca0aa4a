//! Error types shared by the pk library and binary.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::logic::selection::SelectionError;

/// The error type for pk operations.
#[derive(Debug, Error)]
pub enum PkError {
    /// Operator typed something that is not a valid choice.
    #[error("Invalid selection: {0}")]
    InvalidSelection(#[from] SelectionError),

    /// An external program ran but exited unsuccessfully.
    #[error("{program} failed for {package} (exit code {})", .code.map_or_else(|| "none".to_string(), |c| c.to_string()))]
    CommandFailed {
        /// Program that was executed (e.g. `pacman`).
        program: String,
        /// Package the invocation was about.
        package: String,
        /// Exit code, `None` when terminated by a signal.
        code: Option<i32>,
    },

    /// A required external program is not on `PATH`.
    #[error("'{tool}' is not installed. Install it with '{hint}'")]
    MissingTool {
        /// Program name.
        tool: String,
        /// Command the operator can run to get it.
        hint: String,
    },

    /// Another pacman process owns the package database lock.
    #[error("Another pacman process is running (lock file {}). Aborting.", .path.display())]
    LockHeld {
        /// Lock file path.
        path: PathBuf,
    },

    /// Settings file could not be parsed.
    #[error("Configuration error in {}: {message}", .path.display())]
    Config {
        /// Settings file that failed to parse.
        path: PathBuf,
        /// Description of the offending entry.
        message: String,
    },

    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// HTTP request to the AUR failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The AUR answered with an error payload.
    #[error("AUR error: {0}")]
    Remote(String),

    /// A JSON payload could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A worker task panicked or was cancelled.
    #[error("Worker task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl PkError {
    /// What: Build a [`PkError::MissingTool`] with the package that provides `tool`.
    ///
    /// Inputs:
    /// - `tool`: Program name that could not be found.
    ///
    /// Output:
    /// - `MissingTool` error carrying an install hint.
    ///
    /// Details:
    /// - Knows the providing package for the handful of tools pk shells out to;
    ///   anything else gets `sudo pacman -S <tool>`.
    #[must_use]
    pub fn missing_tool(tool: &str) -> Self {
        let provider = match tool {
            "pactree" => "pacman-contrib",
            "makepkg" => "base-devel",
            "pgrep" => "procps-ng",
            other => other,
        };
        Self::MissingTool {
            tool: tool.to_string(),
            hint: format!("sudo pacman -S {provider}"),
        }
    }

    /// What: Whether this error came from the operator rather than the system.
    ///
    /// Output:
    /// - `true` for malformed selections.
    #[must_use]
    pub const fn is_operator_error(&self) -> bool {
        matches!(self, Self::InvalidSelection(_))
    }
}

/// A specialized Result type for pk operations.
pub type Result<T> = std::result::Result<T, PkError>;
