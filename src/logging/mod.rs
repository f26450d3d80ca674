//! Tracing subscriber initialization.
//!
//! The preview owns the terminal, so logs go to a file. Follow them with
//! `tail -f` in a separate terminal.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info";

/// Why the log file could not be set up.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The log directory could not be created.
    #[error("cannot create log directory {path:?}: {source}")]
    CreateDir {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The path does not name a file.
    #[error("log path {0:?} does not name a file")]
    InvalidPath(PathBuf),

    /// Another global subscriber is already installed.
    #[error("tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Split a log path into the directory and file name the appender wants.
/// A bare file name logs to the current directory.
fn appender_parts(log_path: &Path) -> Result<(&Path, &str), LoggingError> {
    let invalid = || LoggingError::InvalidPath(log_path.to_path_buf());
    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(invalid)?;
    let directory = log_path.parent().ok_or_else(invalid)?;
    Ok((directory, file_name))
}

/// Initialize the tracing subscriber with file-based logging.
///
/// Respects `RUST_LOG`, defaults to `info`. Creates the log directory if it
/// doesn't exist.
///
/// # Errors
///
/// See [`LoggingError`].
pub fn init(log_path: &Path) -> Result<(), LoggingError> {
    use tracing_subscriber::EnvFilter;

    let (directory, file_name) = appender_parts(log_path)?;

    if !directory.as_os_str().is_empty() {
        std::fs::create_dir_all(directory).map_err(|source| LoggingError::CreateDir {
            path: directory.to_path_buf(),
            source,
        })?;
    }

    let file_appender = tracing_appender::rolling::never(directory, file_name);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    #[test]
    #[serial(tracing_init)]
    fn init_creates_log_directory_if_missing() {
        let test_dir = std::env::temp_dir().join("folio_test_logs_create");
        let log_file = test_dir.join("test.log");
        let _ = fs::remove_dir_all(&test_dir);

        // May fail with SubscriberAlreadySet; the directory is created first.
        let _ = init(&log_file);

        assert!(test_dir.exists(), "Log directory should be created: {:?}", test_dir);

        let _ = fs::remove_dir_all(&test_dir);
    }

    #[test]
    #[serial(tracing_init)]
    fn second_init_reports_subscriber_already_set() {
        let test_dir = std::env::temp_dir().join("folio_test_logs_twice");
        let log_file = test_dir.join("twice.log");

        let _ = init(&log_file);
        let second = init(&log_file);

        assert!(matches!(second, Err(LoggingError::SubscriberAlreadySet)));

        let _ = fs::remove_dir_all(&test_dir);
    }

    #[test]
    fn path_without_file_name_is_invalid() {
        let result = appender_parts(Path::new("/"));
        assert!(matches!(result, Err(LoggingError::InvalidPath(_))));
    }

    #[test]
    fn bare_file_name_logs_to_current_directory() {
        let (dir, name) = appender_parts(Path::new("folio.log")).unwrap();
        assert_eq!(dir, Path::new(""));
        assert_eq!(name, "folio.log");
    }
}
