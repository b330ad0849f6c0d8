//! `yt-dlp` driven as a child process.
//!
//! Listing uses `--dump-single-json` (metadata only, nothing is downloaded).
//! Downloading extracts audio with the download options' codec and naming.
//! `youtube-dl` accepts the same flags and is used when `yt-dlp` is absent.

mod process;

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;

use super::{DownloadOptions, MediaBackend};
use crate::catalog::{parse_catalog, Catalog};
use crate::error::SyncError;
use crate::logger::SyncLogger;

/// Executables searched on PATH, in order, when none is configured.
pub const DOWNLOADER_CANDIDATES: &[&str] = &["yt-dlp", "youtube-dl"];

#[derive(Debug, Clone)]
pub struct YtDlp {
    program: PathBuf,
    socket_timeout: Option<Duration>,
    flat_playlist: bool,
    extra_args: Vec<String>,
}

impl YtDlp {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            socket_timeout: None,
            flat_playlist: false,
            extra_args: Vec::new(),
        }
    }

    /// Use `configured` if given, otherwise the first of
    /// [`DOWNLOADER_CANDIDATES`] found on PATH.
    pub fn discover(configured: Option<&Path>) -> Result<Self, SyncError> {
        if let Some(path) = configured {
            return Ok(Self::new(path));
        }
        DOWNLOADER_CANDIDATES
            .iter()
            .find_map(|name| which::which(name).ok())
            .map(Self::new)
            .ok_or_else(|| SyncError::ToolMissing {
                searched: DOWNLOADER_CANDIDATES.join(", "),
            })
    }

    pub fn with_socket_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.socket_timeout = timeout;
        self
    }

    /// List playlists without resolving each entry (much faster, but entries
    /// carry `url` rather than `webpage_url`).
    pub fn with_flat_playlist(mut self, flat: bool) -> Self {
        self.flat_playlist = flat;
        self
    }

    /// Arguments appended to every invocation, before the locators.
    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }

    fn catalog_args(&self, locator: &str) -> Vec<String> {
        let mut args: Vec<String> = ["--dump-single-json", "--simulate", "--quiet"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        if self.flat_playlist {
            args.push("--flat-playlist".to_string());
        }
        self.push_common(&mut args);
        args.push("--".to_string());
        args.push(locator.to_string());
        args
    }

    fn download_args(&self, urls: &[String], options: &DownloadOptions) -> Vec<String> {
        let mut args = vec![
            "--extract-audio".to_string(),
            "--audio-format".to_string(),
            options.audio_codec.clone(),
            "--audio-quality".to_string(),
            options.audio_quality.clone(),
            "--output".to_string(),
            options.output_template.clone(),
            "--newline".to_string(),
        ];
        if !options.overwrite_post_processed {
            args.push("--no-post-overwrites".to_string());
        }
        self.push_common(&mut args);
        args.push("--".to_string());
        args.extend(urls.iter().cloned());
        args
    }

    fn push_common(&self, args: &mut Vec<String>) {
        if let Some(t) = self.socket_timeout {
            args.push("--socket-timeout".to_string());
            args.push(t.as_secs().max(1).to_string());
        }
        args.extend(self.extra_args.iter().cloned());
    }
}

impl MediaBackend for YtDlp {
    fn fetch_catalog(
        &self,
        locator: &str,
        logger: &dyn SyncLogger,
    ) -> Result<Catalog, SyncError> {
        let args = self.catalog_args(locator);
        logger.debug(&format!("running {} {}", self.program_name(), args.join(" ")));

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| SyncError::Launch {
                program: self.program_name(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        for line in stderr.lines() {
            process::forward_line(line, logger);
        }

        if !output.status.success() {
            let detail = process::last_error_line(&stderr).unwrap_or_else(|| {
                format!("{} exited with {}", self.program_name(), output.status)
            });
            return Err(SyncError::Network {
                locator: locator.to_string(),
                detail,
            });
        }

        parse_catalog(&output.stdout)
    }

    fn download(
        &self,
        urls: &[String],
        options: &DownloadOptions,
        logger: &dyn SyncLogger,
    ) -> Result<(), SyncError> {
        let args = self.download_args(urls, options);
        logger.debug(&format!("running {} {}", self.program_name(), args.join(" ")));

        let mut cmd = Command::new(&self.program);
        cmd.args(&args);
        let finished = process::run_streaming(cmd, &self.program_name(), logger)?;

        if !finished.status.success() {
            let detail = finished.last_error.unwrap_or_else(|| {
                format!("{} exited with {}", self.program_name(), finished.status)
            });
            return Err(SyncError::Download(detail));
        }
        Ok(())
    }
}
