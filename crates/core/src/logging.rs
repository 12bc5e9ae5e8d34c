//! Tracing setup for svcwire binaries.
//!
//! Every event lands in a daily file under [`log_dir`]. Commands that print
//! to a terminal also get a compact stderr layer. `RUST_LOG` sets the level
//! for both, defaulting to [`DEFAULT_FILTER`]; e.g. `RUST_LOG=svcwire_core=trace`
//! shows every cache hit and closure step.

use std::ffi::OsString;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Overrides the log directory, e.g. for CI sandboxes without a home.
pub const LOG_DIR_ENV: &str = "SVCWIRE_LOG_DIR";

pub const DEFAULT_FILTER: &str = "info";

/// `$SVCWIRE_LOG_DIR` when set and non-empty, else `~/.svcwire/logs`.
pub fn log_dir() -> PathBuf {
    resolve_log_dir(std::env::var_os(LOG_DIR_ENV), dirs::home_dir())
}

fn resolve_log_dir(overridden: Option<OsString>, home: Option<PathBuf>) -> PathBuf {
    match overridden.filter(|dir| !dir.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => home
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".svcwire")
            .join("logs"),
    }
}

/// Installs the global subscriber. Files are prefixed with `component`,
/// e.g. `cli.2026-10-19`. Keep the guard alive until exit or buffered
/// lines are lost.
pub fn init_logging(component: &str, to_stderr: bool) -> WorkerGuard {
    let dir = log_dir();
    let _ = std::fs::create_dir_all(&dir);

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(
        &dir, component,
    ));

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    // Terminal output sits next to tables and JSON on stdout; keep it short.
    let stderr_layer = to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .without_time()
            .with_target(false)
            .compact()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    guard
}
