//! pk binary entrypoint. Commands live in `args`, everything else in the library.

mod args;

use std::fmt;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;

use pk::config::{load_settings, logs_dir, resolve_settings_path};
use pk::install::{Orchestrator, SystemExecutor};
use pk::prompt::StdConsole;

/// Local-time log timestamps.
struct PkTimer;

impl tracing_subscriber::fmt::time::FormatTime for PkTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let ts = chrono::Local::now().format("%Y-%m-%d-T %H:%M:%S");
        write!(w, "{ts}")
    }
}

/// What: Install the global tracing subscriber.
///
/// Inputs:
/// - `level`: Default filter directive when `RUST_LOG` is unset.
///
/// Output:
/// - Guard that flushes the non-blocking file writer on drop; `None` when
///   logging fell back to stderr.
///
/// Details:
/// - Logs go to `<config_dir>/logs/pk.log`.
fn init_logging(level: &str) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
    };
    let log_path = logs_dir().join("pk.log");
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(PkTimer)
                .init();
            tracing::info!(path = %log_path.display(), "logging initialized");
            Some(guard)
        }
        Err(e) => {
            // Fallback: stderr logger so startup is not blocked
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(PkTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
            None
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = args::Args::parse();
    let _log_guard = init_logging(&args::determine_log_level(&args));

    let settings_path = resolve_settings_path(args.config.as_deref());
    let mut settings = match load_settings(&settings_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", format!("Error: {e}").red());
            tracing::error!(error = %e, "failed to load settings");
            return ExitCode::from(2);
        }
    };
    settings.dry_run |= args.dry_run;
    if args.no_color || !settings.color {
        colored::control::set_override(false);
    }
    tracing::info!(dry_run = settings.dry_run, workers = settings.workers, "pk starting");

    let executor = Arc::new(SystemExecutor::from_settings(&settings));
    let orchestrator = Orchestrator::new(executor, &settings).with_audit_dir(logs_dir());
    let ctx = args::Context {
        settings,
        orchestrator,
    };
    let mut console = StdConsole;
    let code = match args::run_command(args.command, &ctx, &mut console).await {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            eprintln!("{}", format!("Error: {e}").red());
            tracing::error!(error = %e, "command failed");
            1
        }
    };
    tracing::info!(exit_code = code, "pk exited");
    ExitCode::from(code)
}
