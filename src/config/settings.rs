//! `settings.conf` parsing.
//!
//! The file is a flat list of `key = value` lines. Blank lines and lines
//! starting with `#`, `//` or `;` are ignored, as is anything after an inline
//! ` #`. Unknown keys are logged and skipped; malformed values are errors.

use std::path::{Path, PathBuf};

use crate::error::{PkError, Result};

/// How AUR packages are built and installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AurHelper {
    /// Prefer `paru`, then `yay`, then plain `makepkg`.
    Auto,
    /// Always use `paru`.
    Paru,
    /// Always use `yay`.
    Yay,
    /// Clone the build repository and run `makepkg -si`.
    Makepkg,
}

impl AurHelper {
    /// Parse a settings value (case-insensitive).
    #[must_use]
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "" => Some(Self::Auto),
            "paru" => Some(Self::Paru),
            "yay" => Some(Self::Yay),
            "makepkg" | "none" => Some(Self::Makepkg),
            _ => None,
        }
    }
}

/// Runtime settings resolved from `settings.conf` and command-line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Print commands instead of running them.
    pub dry_run: bool,
    /// Maximum number of batches processed at once.
    pub workers: usize,
    /// AUR build strategy.
    pub aur_helper: AurHelper,
    /// Base URL of the AUR RPC interface (without trailing slash).
    pub aur_rpc_url: String,
    /// Base URL build repositories are cloned from.
    pub aur_clone_url: String,
    /// pacman database lock file.
    pub db_lock_path: PathBuf,
    /// Offer companion packages after a successful install.
    pub offer_suggestions: bool,
    /// Colored terminal output.
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dry_run: false,
            workers: 4,
            aur_helper: AurHelper::Auto,
            aur_rpc_url: "https://aur.archlinux.org/rpc/v5".to_string(),
            aur_clone_url: "https://aur.archlinux.org".to_string(),
            db_lock_path: PathBuf::from("/var/lib/pacman/db.lck"),
            offer_suggestions: true,
            color: true,
        }
    }
}

/// Whether a line carries no setting.
fn skip_comment_or_empty(line: &str) -> bool {
    line.is_empty() || line.starts_with('#') || line.starts_with("//") || line.starts_with(';')
}

/// Parse `true/1/yes/on` and `false/0/no/off`.
fn parse_bool(val: &str) -> Option<bool> {
    match val.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// What: Parse settings file content on top of the defaults.
///
/// Inputs:
/// - `content`: File content.
/// - `path`: Where it came from, for error messages.
///
/// Output:
/// - Fully populated [`Settings`].
///
/// # Errors
/// - `PkError::Config` for a line without `=` or a value that does not parse.
///
/// Details:
/// - Keys are case-insensitive and `-`/`.` are treated as `_`.
pub fn parse_settings(content: &str, path: &Path) -> Result<Settings> {
    let mut settings = Settings::default();
    for (idx, line) in content.lines().enumerate() {
        let line = line.split(" #").next().unwrap_or_default().trim();
        if skip_comment_or_empty(line) {
            continue;
        }
        let bad = |message: String| PkError::Config {
            path: path.to_path_buf(),
            message: format!("line {}: {message}", idx + 1),
        };
        let Some((raw_key, val)) = line.split_once('=') else {
            return Err(bad(format!("expected key = value, got '{line}'")));
        };
        let key = raw_key.trim().to_lowercase().replace(['.', '-'], "_");
        let val = val.trim();
        let invalid = || bad(format!("invalid value '{val}' for {key}"));
        match key.as_str() {
            "dry_run" => settings.dry_run = parse_bool(val).ok_or_else(invalid)?,
            "workers" => {
                settings.workers = val
                    .parse::<usize>()
                    .ok()
                    .filter(|w| *w > 0)
                    .ok_or_else(invalid)?;
            }
            "aur_helper" => {
                settings.aur_helper = AurHelper::from_config_key(val).ok_or_else(invalid)?;
            }
            "aur_rpc_url" => settings.aur_rpc_url = val.trim_end_matches('/').to_string(),
            "aur_clone_url" => settings.aur_clone_url = val.trim_end_matches('/').to_string(),
            "db_lock_path" => settings.db_lock_path = PathBuf::from(val),
            "offer_suggestions" => {
                settings.offer_suggestions = parse_bool(val).ok_or_else(invalid)?;
            }
            "color" => settings.color = parse_bool(val).ok_or_else(invalid)?,
            other => {
                tracing::warn!(key = %other, file = %path.display(), "unknown setting ignored");
            }
        }
    }
    Ok(settings)
}

/// What: Load settings from `path`, falling back to defaults when it does not exist.
///
/// # Errors
/// - `PkError::Io` when the file exists but cannot be read.
/// - `PkError::Config` when it cannot be parsed.
pub fn load_settings(path: &Path) -> Result<Settings> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            tracing::debug!(path = %path.display(), "loading settings");
            parse_settings(&content, path)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no settings file; using defaults");
            Ok(Settings::default())
        }
        Err(e) => Err(e.into()),
    }
}
