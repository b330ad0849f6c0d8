//! The reconciliation engine: fetch, filter, download, in one blocking pass.
//!
//! ```text
//! Idle -> Fetching -> Filtering -> Downloading -> Done
//!   \________\___________\____________\------> Failed
//! ```
//!
//! There is no retry edge and no rollback: the first error ends the run and
//! files written before it stay on disk. The working directory is restored
//! on every path out of [`PlaylistSync::run`].

use std::fmt;
use std::path::PathBuf;

use crate::backend::{DownloadOptions, MediaBackend};
use crate::error::SyncError;
use crate::fetcher::CatalogFetcher;
use crate::logger::SyncLogger;
use crate::orchestrator::DownloadOrchestrator;
use crate::presence::missing_entries;
use crate::workdir::ScopedDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    Fetching,
    Filtering,
    Downloading,
    Done,
    Failed,
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SyncState::Idle => "idle",
            SyncState::Fetching => "fetching",
            SyncState::Filtering => "filtering",
            SyncState::Downloading => "downloading",
            SyncState::Done => "done",
            SyncState::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// What to sync and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRequest {
    /// Playlist locator passed to the catalog service.
    pub locator: String,
    /// Target directory; `None` or empty means the current directory.
    pub path: Option<PathBuf>,
}

impl SyncRequest {
    pub fn new(locator: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            path: None,
        }
    }

    pub fn in_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Entries listed by the remote playlist.
    pub catalog_len: usize,
    /// Entries skipped because their file was already present.
    pub skipped: usize,
    /// Locators handed to the downloader, in catalog order.
    pub requested: Vec<String>,
}

pub struct PlaylistSync<'a> {
    backend: &'a dyn MediaBackend,
    logger: &'a dyn SyncLogger,
    options: DownloadOptions,
    state: SyncState,
}

impl<'a> PlaylistSync<'a> {
    pub fn new(
        backend: &'a dyn MediaBackend,
        logger: &'a dyn SyncLogger,
        options: DownloadOptions,
    ) -> Self {
        Self {
            backend,
            logger,
            options,
            state: SyncState::Idle,
        }
    }

    /// State reached by the last run (`Idle` before any run).
    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Run one reconciliation pass. Ends in `Done` or `Failed`.
    pub fn run(&mut self, request: &SyncRequest) -> Result<SyncReport, SyncError> {
        self.state = SyncState::Idle;
        let result = self.drive(request);
        match &result {
            Ok(_) => self.transition(SyncState::Done),
            Err(e) => {
                self.logger
                    .debug(&format!("sync failed while {}: {}", self.state, e));
                self.transition(SyncState::Failed);
            }
        }
        result
    }

    fn drive(&mut self, request: &SyncRequest) -> Result<SyncReport, SyncError> {
        self.logger.info("Downloading playlist json.");
        let _cwd = match &request.path {
            Some(path) => ScopedDir::enter(path)?,
            None => ScopedDir::enter("")?,
        };

        self.transition(SyncState::Fetching);
        let catalog = CatalogFetcher::new(self.backend, self.logger).fetch(&request.locator)?;

        self.transition(SyncState::Filtering);
        let requested: Vec<String> = missing_entries(&catalog, self.logger)
            .map(|entry| entry.webpage_url.clone())
            .collect();

        self.transition(SyncState::Downloading);
        DownloadOrchestrator::new(self.backend, self.logger, &self.options).download(&requested)?;

        Ok(SyncReport {
            catalog_len: catalog.len(),
            skipped: catalog.len() - requested.len(),
            requested,
        })
    }

    fn transition(&mut self, next: SyncState) {
        self.logger.debug(&format!("state {} -> {}", self.state, next));
        self.state = next;
    }
}
