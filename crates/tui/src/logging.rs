//! Logging setup for the interactive UI.
//!
//! The alternate screen owns stdout, so logs go to a file instead. The level
//! is read from `MEDIDOC_LOG` and defaults to `info`.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "MEDIDOC_LOG";

/// Filter from `MEDIDOC_LOG`, falling back to `info`.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Where logs are written for a project rooted at `root`.
///
/// Uses `.medidoc/medidoc.log` when the project has been initialized, and
/// the system temp directory otherwise so that logging never creates the
/// config directory as a side effect.
pub fn log_path(root: &Path) -> PathBuf {
    let config_dir = root.join(mdc_core::config::loader::CONFIG_DIR);
    if config_dir.is_dir() {
        config_dir.join("medidoc.log")
    } else {
        std::env::temp_dir().join("medidoc.log")
    }
}

/// Send all logs to the file chosen by [`log_path`].
///
/// Returns the log file path.
pub fn init_file_logging(root: &Path) -> Result<PathBuf> {
    let log_path = log_path(root);

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {e}"))?;

    Ok(log_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_path_inside_initialized_project() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".medidoc")).unwrap();
        assert_eq!(
            log_path(dir.path()),
            dir.path().join(".medidoc").join("medidoc.log")
        );
    }

    #[test]
    fn test_log_path_without_project() {
        let dir = tempfile::tempdir().unwrap();
        let path = log_path(dir.path());
        assert!(path.starts_with(std::env::temp_dir()));
        assert!(!dir.path().join(".medidoc").exists());
    }
}
