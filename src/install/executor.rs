//! The side-effecting collaborator: install, remove and update packages.

use std::path::Path;
use std::process::Command;

use super::command;
use super::utils::{command_on_path, ensure_tool, resolve_aur_helper};
use crate::config::{AurHelper, Settings};
use crate::error::Result;
use crate::logic::deps::{parse_dep_spec, parse_si_list};
use crate::state::{PackageRecord, Source};
use crate::util::is_root;
use crate::util::pacman::{run_pacman, run_status};

/// Performs installs and removals. Every call is all-or-nothing from pk's
/// point of view: it either succeeds or reports an error.
pub trait Executor: Send + Sync {
    /// What: Install one package from its source.
    ///
    /// # Errors
    /// - Returns `Err` when the package could not be installed.
    fn install(&self, pkg: &PackageRecord) -> Result<()>;

    /// What: Remove one installed package.
    ///
    /// # Errors
    /// - Returns `Err` when the package could not be removed.
    fn remove(&self, pkg: &PackageRecord) -> Result<()>;

    /// What: Upgrade the whole system, official packages first, then AUR.
    ///
    /// # Errors
    /// - Returns `Err` when the official upgrade fails.
    fn update(&self) -> Result<()>;
}

/// Read-only queries used to detect conflicts before installing.
pub trait ConflictProbe {
    /// Installed package called `name`, if any.
    fn installed(&self, name: &str) -> Option<PackageRecord>;

    /// Names `pkg` declares it conflicts with.
    fn conflicts_of(&self, pkg: &PackageRecord) -> Vec<String>;
}

/// Executor that shells out to pacman, an AUR helper, or git + makepkg.
#[derive(Debug, Clone)]
pub struct SystemExecutor {
    dry_run: bool,
    use_sudo: bool,
    aur_helper: AurHelper,
    clone_base: String,
}

impl SystemExecutor {
    /// Build an executor from resolved settings.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            dry_run: settings.dry_run,
            use_sudo: !is_root(),
            aur_helper: settings.aur_helper,
            clone_base: settings.aur_clone_url.clone(),
        }
    }

    /// What: Run `argv`, or print it in dry-run mode.
    ///
    /// Inputs:
    /// - `argv`: Program followed by its arguments.
    /// - `package`: Package name for error reports.
    /// - `dir`: Working directory, if any.
    fn run(&self, argv: &[String], package: &str, dir: Option<&Path>) -> Result<()> {
        if self.dry_run {
            println!("DRY RUN: {}", argv.join(" "));
            return Ok(());
        }
        let Some((program, args)) = argv.split_first() else {
            return Ok(());
        };
        let mut cmd = Command::new(program);
        cmd.args(args);
        if let Some(dir) = dir {
            cmd.current_dir(dir);
        }
        run_status(&mut cmd, package)
    }

    /// Clone the build repository and run `makepkg -si` in it.
    fn build_from_aur(&self, name: &str) -> Result<()> {
        if !self.dry_run {
            ensure_tool("git")?;
            ensure_tool("makepkg")?;
        }
        let clone_dir = std::env::temp_dir().join(format!("pk-build-{name}"));
        if clone_dir.exists() && !self.dry_run {
            std::fs::remove_dir_all(&clone_dir)?;
        }
        println!("Cloning {name} from AUR...");
        let dir_str = clone_dir.to_string_lossy();
        let result = self
            .run(&command::git_clone(&self.clone_base, name, &dir_str), name, None)
            .and_then(|()| {
                println!("Building package...");
                self.run(&command::makepkg_install(), name, Some(clone_dir.as_path()))
            });
        if !self.dry_run
            && clone_dir.exists()
            && let Err(e) = std::fs::remove_dir_all(&clone_dir)
        {
            tracing::warn!(dir = %clone_dir.display(), error = %e, "failed to clean build directory");
        }
        result
    }
}

impl Executor for SystemExecutor {
    fn install(&self, pkg: &PackageRecord) -> Result<()> {
        tracing::info!(package = %pkg.name, source = %pkg.source, dry_run = self.dry_run, "installing");
        match pkg.source {
            Source::Official { .. } => {
                self.run(&command::pacman_install(&pkg.name, self.use_sudo), &pkg.name, None)
            }
            Source::Aur => match resolve_aur_helper(self.aur_helper, command_on_path) {
                Some(helper) => {
                    if !self.dry_run {
                        ensure_tool(helper)?;
                    }
                    self.run(&command::helper_install(helper, &pkg.name), &pkg.name, None)
                }
                None => self.build_from_aur(&pkg.name),
            },
        }
    }

    fn remove(&self, pkg: &PackageRecord) -> Result<()> {
        tracing::info!(package = %pkg.name, dry_run = self.dry_run, "removing");
        self.run(&command::pacman_remove(&pkg.name, self.use_sudo), &pkg.name, None)
    }

    fn update(&self) -> Result<()> {
        tracing::info!(dry_run = self.dry_run, "updating system");
        self.run(&command::pacman_update(self.use_sudo), "system", None)?;
        match resolve_aur_helper(self.aur_helper, command_on_path) {
            Some(helper) if self.dry_run || command_on_path(helper) => {
                self.run(&command::helper_update(helper), "aur", None)
            }
            _ => {
                tracing::info!("no AUR helper available; AUR packages not updated");
                Ok(())
            }
        }
    }
}

/// Conflict probe backed by the local and sync pacman databases.
#[derive(Debug, Default, Clone, Copy)]
pub struct PacmanProbe;

impl ConflictProbe for PacmanProbe {
    fn installed(&self, name: &str) -> Option<PackageRecord> {
        let out = run_pacman(&["-Q", name], name).ok()?;
        let mut parts = out.split_whitespace();
        let installed_name = parts.next()?;
        let source = if run_pacman(&["-Qm", name], name).is_ok() {
            Source::Aur
        } else {
            Source::official()
        };
        let mut rec = PackageRecord::new(installed_name, source);
        rec.version = parts.next().map(str::to_string);
        Some(rec)
    }

    fn conflicts_of(&self, pkg: &PackageRecord) -> Vec<String> {
        if pkg.source.is_aur() {
            return Vec::new();
        }
        match run_pacman(&["-Si", &pkg.name], &pkg.name) {
            Ok(text) => parse_si_list(&text, "Conflicts With")
                .iter()
                .map(|spec| parse_dep_spec(spec).0)
                .collect(),
            Err(e) => {
                tracing::debug!(package = %pkg.name, error = %e, "no conflict data");
                Vec::new()
            }
        }
    }
}
