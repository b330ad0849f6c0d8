//! DownloadOrchestrator: hand the missing locators to the downloader in one batch.

use crate::backend::{DownloadOptions, MediaBackend};
use crate::error::SyncError;
use crate::logger::SyncLogger;

pub struct DownloadOrchestrator<'a> {
    backend: &'a dyn MediaBackend,
    logger: &'a dyn SyncLogger,
    options: &'a DownloadOptions,
}

impl<'a> DownloadOrchestrator<'a> {
    pub fn new(
        backend: &'a dyn MediaBackend,
        logger: &'a dyn SyncLogger,
        options: &'a DownloadOptions,
    ) -> Self {
        Self {
            backend,
            logger,
            options,
        }
    }

    /// Download `urls` (skipped entirely when empty). Returns how many
    /// locators were handed to the downloader.
    ///
    /// A failure leaves whatever was already written on disk and is returned
    /// as [`SyncError::Download`].
    pub fn download(&self, urls: &[String]) -> Result<usize, SyncError> {
        if urls.is_empty() {
            self.logger.info("There were no new entries found.");
            return Ok(0);
        }

        self.logger
            .info(&format!("Starting download of {} entries", urls.len()));
        self.backend
            .download(urls, self.options, self.logger)
            .map_err(|e| match e {
                SyncError::Download(_) => e,
                other => SyncError::Download(other.to_string()),
            })?;
        self.logger.info("Ended download");
        Ok(urls.len())
    }
}
