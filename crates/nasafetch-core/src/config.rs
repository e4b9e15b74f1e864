use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::http::HttpOptions;
use crate::output::DEFAULT_OUTPUT;
use crate::request::{CmrParams, EonetParams};

/// Global configuration loaded from `~/.config/nasafetch/config.toml`.
///
/// Every field has a default, so a partial file is fine. Tokens are never read from here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NasafetchConfig {
    /// Where the response is written (relative paths resolve against the working directory).
    pub output: PathBuf,
    /// Optional connect timeout in seconds (None = libcurl default).
    pub connect_timeout_secs: Option<u64>,
    /// Optional whole-transfer timeout in seconds (None = no limit).
    pub timeout_secs: Option<u64>,
    /// Query parameters for `nasafetch eonet`.
    pub eonet: EonetParams,
    /// Query parameters for `nasafetch cmr`.
    pub cmr: CmrParams,
}

impl Default for NasafetchConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            connect_timeout_secs: None,
            timeout_secs: None,
            eonet: EonetParams::default(),
            cmr: CmrParams::default(),
        }
    }
}

impl NasafetchConfig {
    pub fn http_options(&self) -> HttpOptions {
        HttpOptions {
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("nasafetch")
        .context("failed to locate XDG config directory")?;
    xdg_dirs
        .place_config_file("config.toml")
        .context("failed to create nasafetch config directory")
}

/// Load configuration from disk, creating a default file if none exists.
///
/// Missing and unwritable config falls back to built-in defaults; an existing
/// file that cannot be read or parsed is an error.
pub fn load_or_init() -> Result<NasafetchConfig> {
    let path = match config_path() {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!("no config location ({:#}), using built-in defaults", e);
            return Ok(NasafetchConfig::default());
        }
    };
    load_or_init_at(&path)
}

/// Like `load_or_init` but for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<NasafetchConfig> {
    if !path.exists() {
        let default_cfg = NasafetchConfig::default();
        match write_default(path, &default_cfg) {
            Ok(()) => tracing::info!("created default config at {}", path.display()),
            Err(e) => tracing::warn!("{:#}; using built-in defaults", e),
        }
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: NasafetchConfig =
        toml::from_str(&data).with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

fn write_default(path: &Path, cfg: &NasafetchConfig) -> Result<()> {
    let toml = toml::to_string_pretty(cfg)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    fs::write(path, toml)
        .with_context(|| format!("failed to write default config {}", path.display()))?;
    Ok(())
}
