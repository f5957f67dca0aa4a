//! External command execution helpers.
//!
//! Every program pk shells out to goes through here so that a missing binary
//! always surfaces as [`PkError::MissingTool`] and a non-zero exit as
//! [`PkError::CommandFailed`].

use std::io;
use std::process::Command;

use crate::error::{PkError, Result};

/// What: Translate a spawn error into a pk error.
///
/// Details:
/// - `NotFound` means the binary is not installed.
fn spawn_error(e: io::Error, program: &str) -> PkError {
    if e.kind() == io::ErrorKind::NotFound {
        PkError::missing_tool(program)
    } else {
        PkError::Io(e)
    }
}

/// What: Run `program` with `args` and capture stdout.
///
/// Inputs:
/// - `program`: Binary name.
/// - `args`: Arguments passed verbatim.
/// - `package`: Package the call is about, used in error reports.
///
/// Output:
/// - Stdout as a (lossily decoded) string.
///
/// # Errors
/// - `MissingTool` when the binary is not on `PATH`.
/// - `CommandFailed` when it exits non-zero.
pub fn run_capture(program: &str, args: &[&str], package: &str) -> Result<String> {
    tracing::debug!(program, ?args, "running");
    let out = Command::new(program)
        .args(args)
        .env("LC_ALL", "C")
        .output()
        .map_err(|e| spawn_error(e, program))?;
    if !out.status.success() {
        return Err(PkError::CommandFailed {
            program: program.to_string(),
            package: package.to_string(),
            code: out.status.code(),
        });
    }
    Ok(String::from_utf8_lossy(&out.stdout).into_owned())
}

/// What: Execute `pacman` with the provided arguments and capture stdout.
///
/// # Errors
/// - Same as [`run_capture`].
pub fn run_pacman(args: &[&str], package: &str) -> Result<String> {
    run_capture("pacman", args, package)
}

/// What: Run a prepared command with inherited stdio and wait for it.
///
/// Inputs:
/// - `cmd`: Fully configured command.
/// - `package`: Package the call is about, used in error reports.
///
/// Output:
/// - `Ok(())` when the command exits successfully.
///
/// # Errors
/// - `MissingTool` when the program is not on `PATH`.
/// - `CommandFailed` on a non-zero exit.
pub fn run_status(cmd: &mut Command, package: &str) -> Result<()> {
    let program = cmd.get_program().to_string_lossy().into_owned();
    tracing::debug!(program = %program, args = ?cmd.get_args().collect::<Vec<_>>(), "running");
    let status = cmd.status().map_err(|e| spawn_error(e, &program))?;
    if status.success() {
        Ok(())
    } else {
        Err(PkError::CommandFailed {
            program,
            package: package.to_string(),
            code: status.code(),
        })
    }
}
