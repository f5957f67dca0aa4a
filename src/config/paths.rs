//! Locations of pk's configuration and log files.

use std::env;
use std::path::{Path, PathBuf};

/// Resolve an XDG base directory from environment or default to `$HOME` + segments.
///
/// Inputs:
/// - `var`: Environment variable to check (e.g., `XDG_CONFIG_HOME`).
/// - `home_default`: Fallback path segments relative to `$HOME` if `var` is unset/empty.
///
/// Output: Resolved base directory path.
fn xdg_base_dir(var: &str, home_default: &[&str]) -> PathBuf {
    if let Ok(p) = env::var(var)
        && !p.trim().is_empty()
    {
        return PathBuf::from(p);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    home_default
        .iter()
        .fold(PathBuf::from(home), |base, seg| base.join(seg))
}

/// Configuration directory: `$XDG_CONFIG_HOME/pk` or `$HOME/.config/pk`.
///
/// Not created; callers that write below it create what they need.
#[must_use]
pub fn config_dir() -> PathBuf {
    xdg_base_dir("XDG_CONFIG_HOME", &[".config"]).join("pk")
}

/// Default settings file: `<config_dir>/settings.conf`.
#[must_use]
pub fn settings_path() -> PathBuf {
    config_dir().join("settings.conf")
}

/// Logs directory under config: `<config_dir>/logs` (ensured to exist when possible).
#[must_use]
pub fn logs_dir() -> PathBuf {
    let dir = config_dir().join("logs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Return `explicit` if given, otherwise the default settings path.
#[must_use]
pub fn resolve_settings_path(explicit: Option<&Path>) -> PathBuf {
    explicit.map_or_else(settings_path, Path::to_path_buf)
}
