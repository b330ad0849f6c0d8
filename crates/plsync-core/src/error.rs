//! Error taxonomy for a sync run.
//!
//! Every variant is fatal: the engine never retries or recovers locally, so
//! callers only need to render the error and exit non-zero.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    /// The remote catalog could not be fetched (unreachable, timed out, refused).
    #[error("could not fetch playlist {locator}: {detail}")]
    Network { locator: String, detail: String },

    /// The catalog response was structurally malformed.
    #[error("malformed catalog response: {0}")]
    Parse(String),

    /// Target directory missing/unwritable or the directory change failed.
    #[error("{path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The batch download/transcode reported failure.
    #[error("download failed: {0}")]
    Download(String),

    /// The downloader executable exists but could not be started.
    #[error("could not launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    /// No downloader executable was configured or found on PATH.
    #[error("no downloader found (looked for {searched}); install yt-dlp or set `downloader` in config.toml")]
    ToolMissing { searched: String },
}

impl SyncError {
    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SyncError::Filesystem {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_error_names_locator() {
        let e = SyncError::Network {
            locator: "https://example.com/list".into(),
            detail: "timed out".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("https://example.com/list"));
        assert!(msg.contains("timed out"));
    }

    #[test]
    fn filesystem_error_keeps_source() {
        let e = SyncError::filesystem(
            "/no/such/dir",
            io::Error::new(io::ErrorKind::NotFound, "not found"),
        );
        assert!(e.to_string().starts_with("/no/such/dir"));
        assert!(std::error::Error::source(&e).is_some());
    }
}
