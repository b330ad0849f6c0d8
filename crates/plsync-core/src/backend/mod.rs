//! External media service: catalog listing and audio download.
//!
//! The engine only sees the [`MediaBackend`] trait. [`YtDlp`] drives the
//! `yt-dlp` executable; tests substitute a recording fake.

mod ytdlp;

pub use ytdlp::{YtDlp, DOWNLOADER_CANDIDATES};

use crate::catalog::{Catalog, AUDIO_EXTENSION};
use crate::error::SyncError;
use crate::logger::SyncLogger;

/// How the downloader should name and encode what it writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOptions {
    /// Downloader output template; must yield `{title}.{ext}`.
    pub output_template: String,
    /// Target audio codec; also the file extension the presence check expects.
    pub audio_codec: String,
    /// Codec quality passed through verbatim ("0" = best VBR).
    pub audio_quality: String,
    /// Re-run post-processing even if the converted file already exists.
    pub overwrite_post_processed: bool,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            output_template: "%(title)s.%(ext)s".to_string(),
            audio_codec: AUDIO_EXTENSION.to_string(),
            audio_quality: "0".to_string(),
            overwrite_post_processed: true,
        }
    }
}

/// Remote catalog service plus downloader. Both calls block until done.
pub trait MediaBackend: Send + Sync {
    /// List a playlist's entries without transferring any media.
    fn fetch_catalog(&self, locator: &str, logger: &dyn SyncLogger)
        -> Result<Catalog, SyncError>;

    /// Download and transcode every locator in one batch.
    fn download(
        &self,
        urls: &[String],
        options: &DownloadOptions,
        logger: &dyn SyncLogger,
    ) -> Result<(), SyncError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_match_presence_naming() {
        let o = DownloadOptions::default();
        assert_eq!(o.output_template, "%(title)s.%(ext)s");
        assert_eq!(o.audio_codec, "mp3");
        assert_eq!(o.audio_quality, "0");
        assert!(o.overwrite_post_processed);
    }
}
