//! CatalogFetcher: one metadata-only listing of the remote playlist.

use crate::backend::MediaBackend;
use crate::catalog::Catalog;
use crate::error::SyncError;
use crate::logger::SyncLogger;

pub struct CatalogFetcher<'a> {
    backend: &'a dyn MediaBackend,
    logger: &'a dyn SyncLogger,
}

impl<'a> CatalogFetcher<'a> {
    pub fn new(backend: &'a dyn MediaBackend, logger: &'a dyn SyncLogger) -> Self {
        Self { backend, logger }
    }

    /// Fetch the catalog for `locator`. Errors are returned as-is; no retry.
    pub fn fetch(&self, locator: &str) -> Result<Catalog, SyncError> {
        self.logger.debug(&format!("fetching catalog for {locator}"));
        let catalog = self.backend.fetch_catalog(locator, self.logger)?;
        self.logger
            .info(&format!("Playlist lists {} entries", catalog.len()));
        Ok(catalog)
    }
}
