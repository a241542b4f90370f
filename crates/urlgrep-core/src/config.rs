use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Global configuration loaded from `~/.config/urlgrep/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlgrepConfig {
    /// Maximum number of concurrent fetch workers. Also the capacity of the
    /// work queue, so at most this many tasks are buffered ahead of the pool.
    pub worker_limit: usize,
    /// Per-page fetch timeout in seconds (connect + transfer).
    pub fetch_timeout_secs: u64,
    /// Regular expression counted in each fetched page.
    pub pattern: String,
}

impl Default for UrlgrepConfig {
    fn default() -> Self {
        Self {
            worker_limit: 5,
            fetch_timeout_secs: 20,
            pattern: r"\bGo\b".to_string(),
        }
    }
}

impl UrlgrepConfig {
    /// The fetch timeout as a `Duration`.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("urlgrep")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<UrlgrepConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = UrlgrepConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from_path(&path)
}

/// Load configuration from an explicit path (no default-file creation).
pub fn load_from_path(path: &Path) -> Result<UrlgrepConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config at {}", path.display()))?;
    let cfg: UrlgrepConfig = toml::from_str(&data)
        .with_context(|| format!("failed to parse config at {}", path.display()))?;
    Ok(cfg)
}
