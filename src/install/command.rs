//! Argument vectors for the external programs the executor runs.
//!
//! Kept free of side effects so the exact command lines can be tested and
//! printed in dry-run mode.

/// Prefix `argv` with `sudo` unless already running as root.
fn privileged(use_sudo: bool, argv: &[&str]) -> Vec<String> {
    let mut out = Vec::with_capacity(argv.len() + 1);
    if use_sudo {
        out.push("sudo".to_string());
    }
    out.extend(argv.iter().map(ToString::to_string));
    out
}

/// `sudo pacman -S --noconfirm <name>`.
#[must_use]
pub fn pacman_install(name: &str, use_sudo: bool) -> Vec<String> {
    privileged(use_sudo, &["pacman", "-S", "--noconfirm", name])
}

/// `sudo pacman -R --noconfirm <name>`.
#[must_use]
pub fn pacman_remove(name: &str, use_sudo: bool) -> Vec<String> {
    privileged(use_sudo, &["pacman", "-R", "--noconfirm", name])
}

/// `sudo pacman -Syu`.
#[must_use]
pub fn pacman_update(use_sudo: bool) -> Vec<String> {
    privileged(use_sudo, &["pacman", "-Syu"])
}

/// `<helper> -S --noconfirm <name>`; helpers escalate on their own.
#[must_use]
pub fn helper_install(helper: &str, name: &str) -> Vec<String> {
    vec![
        helper.to_string(),
        "-S".to_string(),
        "--noconfirm".to_string(),
        name.to_string(),
    ]
}

/// `<helper> -Sua`: upgrade AUR packages only, pacman already did the rest.
#[must_use]
pub fn helper_update(helper: &str) -> Vec<String> {
    vec![helper.to_string(), "-Sua".to_string()]
}

/// `git clone <base>/<name>.git <dir>`.
#[must_use]
pub fn git_clone(clone_base: &str, name: &str, dir: &str) -> Vec<String> {
    vec![
        "git".to_string(),
        "clone".to_string(),
        format!("{}/{name}.git", clone_base.trim_end_matches('/')),
        dir.to_string(),
    ]
}

/// `makepkg -si --noconfirm`, run inside the cloned directory.
#[must_use]
pub fn makepkg_install() -> Vec<String> {
    vec![
        "makepkg".to_string(),
        "-si".to_string(),
        "--noconfirm".to_string(),
    ]
}
