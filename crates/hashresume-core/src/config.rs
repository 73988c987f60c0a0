use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::demo::DemoOptions;
use crate::worker::WorkerOptions;

/// Input used by the demonstration when none is configured.
pub const DEFAULT_DEMO_INPUT: &str = "Hello World!";

/// Global configuration loaded from `~/.config/hashresume/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashResumeConfig {
    /// Delay after each absorbed unit, in milliseconds (0 = no delay).
    pub pace_ms: u64,
    /// Bytes absorbed per worker iteration. Must be at least 1.
    pub unit_size: usize,
    /// Deadline for the interrupted run of the demonstration, in milliseconds.
    pub cancel_after_ms: u64,
    /// Demonstration input; defaults to "Hello World!".
    #[serde(default)]
    pub demo_input: Option<String>,
}

impl Default for HashResumeConfig {
    fn default() -> Self {
        Self {
            pace_ms: 200,
            unit_size: 1,
            cancel_after_ms: 300,
            demo_input: None,
        }
    }
}

impl HashResumeConfig {
    pub fn worker_options(&self) -> Result<WorkerOptions> {
        let unit_size = NonZeroUsize::new(self.unit_size).context("unit_size must be at least 1")?;
        let pace = (self.pace_ms > 0).then(|| Duration::from_millis(self.pace_ms));
        Ok(WorkerOptions { unit_size, pace })
    }

    pub fn demo_options(&self) -> Result<DemoOptions> {
        Ok(DemoOptions {
            cancel_after: Duration::from_millis(self.cancel_after_ms),
            worker: self.worker_options()?,
        })
    }

    pub fn demo_input(&self) -> &str {
        self.demo_input.as_deref().unwrap_or(DEFAULT_DEMO_INPUT)
    }
}

/// Existing config file under the XDG config dir, if any. Never creates directories.
pub fn config_path() -> Option<PathBuf> {
    match xdg::BaseDirectories::with_prefix("hashresume") {
        Ok(dirs) => dirs.find_config_file("config.toml"),
        Err(err) => {
            tracing::warn!("cannot locate XDG config dir: {}", err);
            None
        }
    }
}

/// Load configuration from `~/.config/hashresume/config.toml` if present.
///
/// Read-only: a missing file is never created. Missing, unreadable, or invalid
/// configuration falls back to the defaults so the demonstration always runs.
pub fn load() -> HashResumeConfig {
    match config_path() {
        Some(path) => load_at(&path),
        None => HashResumeConfig::default(),
    }
}

/// Load configuration from `path`, falling back to defaults (with a warning) on any problem.
pub fn load_at(path: &Path) -> HashResumeConfig {
    if !path.exists() {
        return HashResumeConfig::default();
    }
    match read_at(path) {
        Ok(cfg) => cfg,
        Err(err) => {
            tracing::warn!("ignoring config {}: {:#}", path.display(), err);
            HashResumeConfig::default()
        }
    }
}

fn read_at(path: &Path) -> Result<HashResumeConfig> {
    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: HashResumeConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    cfg.worker_options()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = HashResumeConfig::default();
        assert_eq!(cfg.pace_ms, 200);
        assert_eq!(cfg.unit_size, 1);
        assert_eq!(cfg.cancel_after_ms, 300);
        assert_eq!(cfg.demo_input(), "Hello World!");
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = HashResumeConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: HashResumeConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.pace_ms, cfg.pace_ms);
        assert_eq!(parsed.unit_size, cfg.unit_size);
        assert_eq!(parsed.cancel_after_ms, cfg.cancel_after_ms);
        assert!(parsed.demo_input.is_none());
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            pace_ms = 0
            unit_size = 64
            cancel_after_ms = 1500
            demo_input = "The quick brown fox"
        "#;
        let cfg: HashResumeConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.demo_input(), "The quick brown fox");
        let opts = cfg.demo_options().unwrap();
        assert_eq!(opts.cancel_after, Duration::from_millis(1500));
        assert_eq!(opts.worker.unit_size.get(), 64);
        assert!(opts.worker.pace.is_none());
    }

    #[test]
    fn zero_unit_size_is_rejected() {
        let cfg = HashResumeConfig {
            unit_size: 0,
            ..HashResumeConfig::default()
        };
        assert!(cfg.worker_options().is_err());
    }

    #[test]
    fn load_missing_file_uses_defaults_without_creating_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let cfg = load_at(&path);
        assert_eq!(cfg.pace_ms, 200);
        assert!(!path.exists());
        assert!(!dir.path().join("nested").exists());
    }

    #[test]
    fn load_reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "pace_ms = 5\nunit_size = 2\ncancel_after_ms = 7\n").unwrap();
        let loaded = load_at(&path);
        assert_eq!(loaded.pace_ms, 5);
        assert_eq!(loaded.unit_size, 2);
        assert_eq!(loaded.cancel_after_ms, 7);
    }

    #[test]
    fn load_malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "pace_ms = \"x\"").unwrap();
        let cfg = load_at(&path);
        assert_eq!(cfg.pace_ms, 200);
        assert_eq!(cfg.unit_size, 1);
        assert_eq!(cfg.cancel_after_ms, 300);
        assert!(cfg.demo_options().is_ok());
        assert_eq!(fs::read_to_string(&path).unwrap(), "pace_ms = \"x\"");
    }

    #[test]
    fn load_zero_unit_size_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "pace_ms = 5\nunit_size = 0\ncancel_after_ms = 7\n").unwrap();
        let cfg = load_at(&path);
        assert_eq!(cfg.unit_size, 1);
        assert_eq!(cfg.pace_ms, 200);
    }
}
