//! Tracing initialization.
//! Builds a subscriber with EnvFilter, supports compact or JSON formats, and optional file logging.
//!
//! Behavior:
//! - Log level is driven by LogLevel (no RUST_LOG override here).
//! - At `normal`, per-file progress (INFO) is shown; `info` adds DEBUG detail.
//! - If `log_file` is provided and passes safety checks, a non-blocking file layer is added.
//! - File logging is refused if any ancestor of the file path is a symlink.

use anyhow::Result;
use chrono::Local;
use pkgfix::output as out;
use pkgfix::platform::open_log_file_secure_append;
use pkgfix::{LogLevel, path_has_symlink_ancestor};
use std::fmt as stdfmt;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt as tsfmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry;
use tracing_subscriber::util::SubscriberInitExt;

/// Human-friendly timestamp formatter (DD/MM/YY HH:MM:SS)
struct LocalHumanTime;
impl FormatTime for LocalHumanTime {
    fn format_time(&self, w: &mut tsfmt::format::Writer<'_>) -> stdfmt::Result {
        write!(w, "{}", Local::now().format("%d/%m/%y %H:%M:%S"))
    }
}

#[inline]
fn to_level_filter(lvl: LogLevel) -> LevelFilter {
    match lvl {
        LogLevel::Quiet => LevelFilter::ERROR,
        LogLevel::Normal => LevelFilter::INFO,
        LogLevel::Info => LevelFilter::DEBUG,
        LogLevel::Debug => LevelFilter::TRACE,
    }
}

/// Only our own crate logs below WARN; dependencies stay at WARN.
fn env_filter_for(level_filter: LevelFilter) -> EnvFilter {
    let level = match level_filter {
        LevelFilter::ERROR => "error",
        LevelFilter::WARN => "warn",
        LevelFilter::INFO => "info",
        LevelFilter::DEBUG => "debug",
        LevelFilter::TRACE => "trace",
        _ => "info",
    };
    EnvFilter::new(format!("warn,pkgfix={level}"))
}

/// Open a non-blocking file writer, or explain on stderr why not.
fn maybe_open_non_blocking_writer(path: &Path) -> Option<(NonBlocking, WorkerGuard)> {
    match path_has_symlink_ancestor(path) {
        Ok(true) => {
            eprintln!(
                "Refusing to enable file logging: ancestor of {} is a symlink; proceeding without file logging.",
                path.display()
            );
            return None;
        }
        Err(e) => {
            eprintln!(
                "Error checking log path {} for symlinks: {}; proceeding without file logging.",
                path.display(),
                e
            );
            return None;
        }
        Ok(false) => {}
    }

    match open_log_file_secure_append(path) {
        Ok(file) => Some(tracing_appender::non_blocking(file)),
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", path.display(), e);
            None
        }
    }
}

/// Initialize tracing. Returns the WorkerGuard of the file appender, if one
/// was created; it must be held until exit to flush buffered lines.
pub fn init_tracing(lvl: LogLevel, log_file: Option<&Path>, json: bool) -> Result<Option<WorkerGuard>> {
    let env_filter = env_filter_for(to_level_filter(lvl));
    let ansi = atty::is(atty::Stream::Stdout);

    let file_writer = match log_file {
        Some(path) => {
            let writer = maybe_open_non_blocking_writer(path);
            if writer.is_none() {
                out::print_warn(&format!(
                    "Requested file logging to '{}' was not enabled. Check that the parent directory is writable and that no ancestor is a symlink. Logs will continue to stdout.",
                    path.display()
                ));
            }
            writer
        }
        None => None,
    };

    // Layers are built per branch: json/compact formatters have distinct types.
    let guard = match (json, file_writer) {
        (true, Some((writer, guard))) => {
            registry()
                .with(env_filter)
                .with(tsfmt::layer().json().with_timer(LocalHumanTime).with_target(true))
                .with(
                    tsfmt::layer()
                        .json()
                        .with_timer(LocalHumanTime)
                        .with_target(true)
                        .with_writer(writer),
                )
                .try_init()?;
            Some(guard)
        }
        (false, Some((writer, guard))) => {
            registry()
                .with(env_filter)
                .with(
                    tsfmt::layer()
                        .compact()
                        .with_timer(LocalHumanTime)
                        .with_target(false)
                        .with_ansi(ansi),
                )
                .with(
                    tsfmt::layer()
                        .compact()
                        .with_timer(LocalHumanTime)
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(writer),
                )
                .try_init()?;
            Some(guard)
        }
        (true, None) => {
            registry()
                .with(env_filter)
                .with(tsfmt::layer().json().with_timer(LocalHumanTime).with_target(true))
                .try_init()?;
            None
        }
        (false, None) => {
            registry()
                .with(env_filter)
                .with(
                    tsfmt::layer()
                        .compact()
                        .with_timer(LocalHumanTime)
                        .with_target(false)
                        .with_ansi(ansi),
                )
                .try_init()?;
            None
        }
    };
    Ok(guard)
}
