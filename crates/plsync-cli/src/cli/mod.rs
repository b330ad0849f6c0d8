//! CLI for plsync.

use anyhow::Result;
use clap::Parser;
use plsync_core::config;
use plsync_core::logger::TracingLogger;
use plsync_core::sync::{PlaylistSync, SyncRequest};
use std::path::PathBuf;

/// Sync mp3s from a remote playlist into a directory.
///
/// Checks the directory for existing `<title>.mp3` files from the playlist
/// before downloading, to save bandwidth and time.
#[derive(Debug, Parser)]
#[command(name = "plsync", version)]
pub struct Cli {
    /// Url of the playlist.
    pub url: String,

    /// Directory to compare against and store results in (default: current directory).
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Log at debug level instead of info.
    #[arg(long)]
    pub verbose: bool,
}

impl Cli {
    pub fn request(&self) -> SyncRequest {
        let request = SyncRequest::new(self.url.clone());
        match &self.path {
            Some(path) => request.in_dir(path.clone()),
            None => request,
        }
    }

    pub fn run(&self) -> Result<()> {
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let backend = cfg.backend()?;
        tracing::debug!("using downloader {}", backend.program().display());

        let logger = TracingLogger;
        let mut engine = PlaylistSync::new(&backend, &logger, cfg.download_options());
        let report = engine.run(&self.request())?;
        tracing::debug!(
            "{} listed, {} already present, {} requested",
            report.catalog_len,
            report.skipped,
            report.requested.len()
        );
        Ok(())
    }
}
