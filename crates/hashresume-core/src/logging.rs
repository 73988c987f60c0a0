//! Tracing setup. Diagnostics go to a log file so the demonstration's console
//! transcript stays clean; stderr is the fallback.

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,hashresume=debug,hashresume_core=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn file_subscriber(file: File) -> impl tracing::Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .finish()
}

/// Log file under the XDG state dir (`~/.local/state/hashresume/hashresume.log`).
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("hashresume")?;
    Ok(xdg_dirs.place_state_file("hashresume.log")?)
}

/// Install a subscriber that appends to [`log_file_path`].
/// Returns Err without installing anything if the file cannot be opened.
pub fn init_logging() -> Result<()> {
    let path = log_file_path()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open {}", path.display()))?;

    tracing::subscriber::set_global_default(file_subscriber(file))?;

    tracing::info!("hashresume logging initialized at {}", path.display());
    Ok(())
}

/// Stderr-only subscriber, for when [`init_logging`] fails.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_subscriber_appends_events() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hashresume.log");
        std::fs::write(&path, "earlier run\n").unwrap();
        let file = OpenOptions::new().append(true).open(&path).unwrap();

        tracing::subscriber::with_default(file_subscriber(file), || {
            tracing::warn!(offset = 5, "digest stopped by cancellation");
        });

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("earlier run\n"));
        assert!(text.contains("digest stopped by cancellation"));
        assert!(text.contains("offset=5"));
    }
}
