use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::backend::{DownloadOptions, YtDlp};
use crate::error::SyncError;

/// Global configuration loaded from `~/.config/plsync/config.toml`.
///
/// Every key is optional; a missing key takes its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Explicit downloader executable. When unset, `yt-dlp` then `youtube-dl` are looked up on PATH.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downloader: Option<PathBuf>,
    /// Audio quality passed to the downloader ("0" = best VBR).
    pub audio_quality: String,
    /// Network timeout handed to the downloader, in seconds (None = its default).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub socket_timeout_secs: Option<u64>,
    /// List playlists without resolving each entry (faster for large playlists).
    pub flat_playlist: bool,
    /// Extra arguments passed to every downloader invocation (e.g. cookies).
    pub extra_args: Vec<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            downloader: None,
            audio_quality: "0".to_string(),
            socket_timeout_secs: None,
            flat_playlist: false,
            extra_args: Vec::new(),
        }
    }
}

impl SyncConfig {
    pub fn download_options(&self) -> DownloadOptions {
        DownloadOptions {
            audio_quality: self.audio_quality.clone(),
            ..DownloadOptions::default()
        }
    }

    /// Build the yt-dlp backend described by this config.
    pub fn backend(&self) -> Result<YtDlp, SyncError> {
        Ok(YtDlp::discover(self.downloader.as_deref())?
            .with_socket_timeout(self.socket_timeout_secs.map(Duration::from_secs))
            .with_flat_playlist(self.flat_playlist)
            .with_extra_args(self.extra_args.clone()))
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("plsync")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SyncConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<SyncConfig> {
    if !path.exists() {
        let default_cfg = SyncConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: SyncConfig =
        toml::from_str(&data).with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
