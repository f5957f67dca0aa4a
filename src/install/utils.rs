use crate::config::AurHelper;
use crate::error::{PkError, Result};

/// Return `true` if an executable named `cmd` can be found in the current `PATH`.
///
/// Inputs: `cmd` program name or absolute/relative path.
///
/// Output: `true` when an executable file is found.
#[must_use]
pub fn command_on_path(cmd: &str) -> bool {
    which::which(cmd).is_ok()
}

/// What: Fail with [`PkError::MissingTool`] unless `cmd` is on `PATH`.
///
/// # Errors
/// - `MissingTool` naming the package that provides `cmd`.
pub fn ensure_tool(cmd: &str) -> Result<()> {
    if command_on_path(cmd) {
        Ok(())
    } else {
        Err(PkError::missing_tool(cmd))
    }
}

/// What: Pick the AUR helper binary to use.
///
/// Inputs:
/// - `preference`: Configured strategy.
/// - `on_path`: Availability check, [`command_on_path`] outside tests.
///
/// Output:
/// - `Some("paru" | "yay")`, or `None` to fall back to `git` + `makepkg`.
///
/// Details:
/// - `Auto` prefers `paru`, then `yay`.
/// - An explicitly configured helper is returned even when missing so the
///   run fails with a clear missing-tool error instead of silently switching.
#[must_use]
pub fn resolve_aur_helper(
    preference: AurHelper,
    on_path: impl Fn(&str) -> bool,
) -> Option<&'static str> {
    match preference {
        AurHelper::Paru => Some("paru"),
        AurHelper::Yay => Some("yay"),
        AurHelper::Makepkg => None,
        AurHelper::Auto => ["paru", "yay"].into_iter().find(|h| on_path(h)),
    }
}
