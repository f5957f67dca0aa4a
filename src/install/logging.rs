use std::io::Write;
use std::path::Path;

/// What: Append installed package names to the install audit log.
///
/// Input: `dir` logs directory; `names` package names, one line each with a local timestamp.
///
/// Output: `Ok(())` on success; otherwise an I/O error.
///
/// Details: Writes to `dir/install_log.log`.
pub fn log_installed(dir: &Path, names: &[String]) -> std::io::Result<()> {
    if names.is_empty() {
        return Ok(());
    }
    let mut f = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("install_log.log"))?;
    let when = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    for n in names {
        writeln!(f, "{when} {n}")?;
    }
    Ok(())
}

/// What: Append removed package names to the remove audit log.
///
/// Input:
/// - `dir` logs directory.
/// - `names` slice of package names to append (one per line).
///
/// Output:
/// - `Ok(())` on success; otherwise an I/O error.
///
/// # Errors
/// - Returns `Err` when the log file cannot be opened or written to
///
/// Details:
/// - Appends to `dir/remove_log.log` without timestamps.
pub fn log_removed(dir: &Path, names: &[String]) -> std::io::Result<()> {
    if names.is_empty() {
        return Ok(());
    }
    let mut f = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("remove_log.log"))?;
    for n in names {
        writeln!(f, "{n}")?;
    }
    Ok(())
}
