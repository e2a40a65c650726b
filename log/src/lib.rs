//! Logging setup for replot with file output and optional stderr.
//!
//! Logs always go to a file at `warn` level (or higher if `REPLOT_LOG` is set).
//! Stderr logging is enabled when `REPLOT_LOG` or `RUST_LOG` is set, or in debug
//! builds. Stdout is left alone; it carries the rendered commands.
//!
//! ## Environment Variables
//!
//! 1. **`REPLOT_LOG`** (highest priority) - replot-specific logging control
//! 2. **`RUST_LOG`** - Standard tracing environment variable
//! 3. **Default** - `warn` globally, `info` for replot crates
//!
//! ## Log File Location
//!
//! Default: `<data_local_dir>/replot/logs/replot-<pid>.log`
//! - macOS: `~/Library/Application Support/replot/logs/replot-12345.log`
//! - Linux: `~/.local/share/replot/logs/replot-12345.log`
//!
//! Override with `--log-file <path>` or `REPLOT_LOG_FILE`.

use std::{
    env, io,
    path::{Path, PathBuf},
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

const CRATES: &[&str] = &["replot", "replot_core", "replot_cmdline", "replot_bin"];

/// Returned from [`init`]; must be held alive to ensure log file flushing.
pub struct LogGuard {
    _file_guard: WorkerGuard,
    pub log_file: PathBuf,
}

#[derive(Debug, Default)]
pub struct LogConfig {
    pub log_file_path: Option<PathBuf>,
}

/// Initialize logging.
///
/// Filters follow the priority described in the module docs:
/// `REPLOT_LOG` > `RUST_LOG` > default settings.
///
/// The returned [`LogGuard`] must be held for the lifetime of the program;
/// dropping it flushes and stops the background file writer.
pub fn init(config: LogConfig) -> Result<LogGuard, Box<dyn std::error::Error + Send + Sync>> {
    let (log_dir, filename) = resolve_log_path(config.log_file_path);

    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, &filename);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_filter = create_file_filter();
    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_filter(file_filter);

    let stderr_enabled = env::var("REPLOT_LOG").is_ok()
        || env::var("RUST_LOG").is_ok()
        || cfg!(debug_assertions);

    let stderr_layer = if stderr_enabled {
        Some(
            fmt::layer()
                .with_writer(io::stderr)
                .with_filter(create_filter()),
        )
    } else {
        None
    };

    Registry::default()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()?;

    Ok(LogGuard {
        _file_guard: file_guard,
        log_file: log_dir.join(filename),
    })
}

/// Initialize logging for tests.
///
/// Stderr-only (no file output). Will not crash if called multiple times or
/// if logging is already initialized by another test.
pub fn test() {
    let _ = fmt()
        .with_env_filter(create_filter())
        .with_test_writer()
        .try_init();
}

/// Splits the log location into a directory and a file name.
///
/// A path with an extension names the file itself; any other path is a
/// directory receiving the default per-process file name.
pub fn resolve_log_path(override_path: Option<PathBuf>) -> (PathBuf, String) {
    let filename = format!("replot-{}.log", std::process::id());

    if let Some(path) = override_path {
        if path.extension().is_some() {
            let dir = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or(filename);
            return (dir.to_path_buf(), name);
        }
        return (path, filename);
    }

    let dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("replot")
        .join("logs");

    (dir, filename)
}

/// File filter: uses user-specified level if set, otherwise defaults to `warn`.
fn create_file_filter() -> EnvFilter {
    if env::var("REPLOT_LOG").is_ok() || env::var("RUST_LOG").is_ok() {
        return create_filter();
    }
    EnvFilter::new("warn")
}

fn create_filter() -> EnvFilter {
    EnvFilter::new(filter_directives(
        env::var("REPLOT_LOG").ok().as_deref(),
        env::var("RUST_LOG").ok().as_deref(),
    ))
}

/// Picks the filter directives: `REPLOT_LOG`, then `RUST_LOG`, then `warn`
/// globally with `info` for replot crates.
pub fn filter_directives(replot_log: Option<&str>, rust_log: Option<&str>) -> String {
    if let Some(replot_log) = replot_log {
        return expand_log_directives(replot_log);
    }
    if let Some(rust_log) = rust_log {
        return rust_log.to_owned();
    }
    expand_log_directives("info")
}

/// Expands a bare level such as `debug` to every replot crate.
///
/// Values with module-specific syntax (`=`, `:` or `,`) are used as-is,
/// allowing e.g. `REPLOT_LOG=replot_core=trace`.
pub fn expand_log_directives(level: &str) -> String {
    if level.contains(['=', ':', ',']) {
        return level.to_owned();
    }
    let mut directives = vec!["warn".to_owned()];
    directives.extend(CRATES.iter().map(|krate| format!("{krate}={level}")));
    directives.join(",")
}
