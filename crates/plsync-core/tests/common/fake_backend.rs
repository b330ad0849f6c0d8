//! In-process stand-in for the media service.
//!
//! Records every call and, on download, writes `"{title}.mp3"` into the
//! current directory the way the real downloader's output template does.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use plsync_core::backend::{DownloadOptions, MediaBackend};
use plsync_core::catalog::{Catalog, Entry};
use plsync_core::logger::SyncLogger;
use plsync_core::SyncError;

#[derive(Debug, Clone)]
pub enum Fetch {
    Entries(Vec<Entry>),
    NetworkDown,
    Malformed,
}

#[derive(Debug, Clone, Copy)]
pub enum DownloadFailure {
    /// Write this many files, then fail.
    AfterFiles(usize),
    /// Fail before writing anything, as if the program could not start.
    Launch,
}

pub struct FakeBackend {
    fetch: Fetch,
    failure: Option<DownloadFailure>,
    pub fetch_calls: Mutex<Vec<String>>,
    pub fetch_dirs: Mutex<Vec<PathBuf>>,
    pub download_calls: Mutex<Vec<Vec<String>>>,
}

impl FakeBackend {
    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        Self::new(Fetch::Entries(
            entries.iter().map(|(t, u)| Entry::new(*t, *u)).collect(),
        ))
    }

    pub fn new(fetch: Fetch) -> Self {
        Self {
            fetch,
            failure: None,
            fetch_calls: Mutex::new(Vec::new()),
            fetch_dirs: Mutex::new(Vec::new()),
            download_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_download(mut self, failure: DownloadFailure) -> Self {
        self.failure = Some(failure);
        self
    }

    pub fn downloads(&self) -> Vec<Vec<String>> {
        self.download_calls.lock().unwrap().clone()
    }

    pub fn fetches(&self) -> Vec<String> {
        self.fetch_calls.lock().unwrap().clone()
    }

    fn titles(&self) -> HashMap<String, String> {
        match &self.fetch {
            Fetch::Entries(entries) => entries
                .iter()
                .map(|e| (e.webpage_url.clone(), e.title.clone()))
                .collect(),
            _ => HashMap::new(),
        }
    }
}

impl MediaBackend for FakeBackend {
    fn fetch_catalog(
        &self,
        locator: &str,
        logger: &dyn SyncLogger,
    ) -> Result<Catalog, SyncError> {
        self.fetch_calls.lock().unwrap().push(locator.to_string());
        self.fetch_dirs
            .lock()
            .unwrap()
            .push(env::current_dir().unwrap());
        match &self.fetch {
            Fetch::Entries(entries) => {
                logger.debug(&format!("[fake] listed {}", locator));
                Ok(Catalog::new(entries.clone()))
            }
            Fetch::NetworkDown => {
                logger.error("ERROR: Unable to download webpage: timed out");
                Err(SyncError::Network {
                    locator: locator.to_string(),
                    detail: "timed out".to_string(),
                })
            }
            Fetch::Malformed => plsync_core::catalog::parse_catalog(br#"{"entries": [{}]}"#),
        }
    }

    fn download(
        &self,
        urls: &[String],
        options: &DownloadOptions,
        logger: &dyn SyncLogger,
    ) -> Result<(), SyncError> {
        self.download_calls.lock().unwrap().push(urls.to_vec());
        let limit = match self.failure {
            Some(DownloadFailure::Launch) => {
                return Err(SyncError::Launch {
                    program: "fake-dl".to_string(),
                    source: io::Error::new(io::ErrorKind::NotFound, "not found"),
                })
            }
            Some(DownloadFailure::AfterFiles(n)) => n,
            None => usize::MAX,
        };

        let titles = self.titles();
        for (written, url) in urls.iter().enumerate() {
            if written == limit {
                logger.error(&format!("ERROR: [fake] {url}: HTTP Error 403"));
                return Err(SyncError::Download(format!("{url}: HTTP Error 403")));
            }
            let title = titles.get(url).cloned().unwrap_or_else(|| url.clone());
            let name = format!("{}.{}", title, options.audio_codec);
            fs::write(&name, b"ID3").unwrap();
            logger.debug(&format!("[ExtractAudio] Destination: {name}"));
        }
        Ok(())
    }
}
