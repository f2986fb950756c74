//! Tracing setup.
//!
//! The interactive page owns the terminal, so it logs to a file through a
//! non-blocking writer.
//! Headless commands log warnings to stderr.
//! The filter comes from `PAGE_DEMO_LOG` when set.

use std::fs;
use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "PAGE_DEMO_LOG";

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default))
}

/// Append log lines to `path`, creating its directory if needed.
///
/// Keep the returned guard alive until exit so buffered lines are flushed.
pub fn init_file_logging(path: &Path) -> io::Result<WorkerGuard> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "log path has no file name"))?;
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter("info"))
        .with_ansi(false)
        .with_target(true)
        .with_writer(writer)
        .try_init();

    Ok(guard)
}

/// Log warnings and errors to stderr.
pub fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter("warn"))
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_logging_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("page.log");

        let guard = init_file_logging(&path).unwrap();
        assert!(path.parent().unwrap().is_dir());
        drop(guard);
    }

    #[test]
    fn log_path_without_file_name_is_rejected() {
        let err = init_file_logging(Path::new("/")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
