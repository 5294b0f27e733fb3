//! File logging for ScoopView
//!
//! The terminal UI owns stdout and stderr, so log output goes to a file that
//! starts fresh each run. The level filter comes from `SCOOPVIEW_LOG` and
//! defaults to `info`.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SCOOPVIEW_LOG";
const LOG_FILE_NAME: &str = "scoopview.log";

static LOG_PATH: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Default log file path (same directory as executable)
pub fn default_log_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(LOG_FILE_NAME)
}

/// Install the global subscriber writing to `path` (or the default path).
///
/// Returns the file in use, or `None` when it could not be opened, in which
/// case logging stays off. Later calls return the first result.
pub fn init(path: Option<&Path>) -> Option<PathBuf> {
    LOG_PATH
        .get_or_init(|| {
            let path = path.map(Path::to_path_buf).unwrap_or_else(default_log_path);
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&path)
                .ok()?;

            let filter = EnvFilter::try_from_env(LOG_ENV)
                .unwrap_or_else(|_| EnvFilter::new("info"))
                .add_directive("hyper=warn".parse().ok()?)
                .add_directive("reqwest=warn".parse().ok()?);

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true)
                .try_init()
                .ok()?;

            Some(path)
        })
        .clone()
}

/// Path of the active log file, if logging is on
pub fn log_path() -> Option<PathBuf> {
    LOG_PATH.get().cloned().flatten()
}
