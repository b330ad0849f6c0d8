//! Scoped change of the process working directory.
//!
//! The working directory is process-global: only one [`ScopedDir`] may be
//! live at a time, and nothing else in the process should `chdir` meanwhile.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::SyncError;

/// Restores the saved directory when dropped. Inert for an empty path.
#[derive(Debug)]
#[must_use = "the previous directory is restored as soon as the guard is dropped"]
pub struct ScopedDir {
    saved: Option<PathBuf>,
}

impl ScopedDir {
    /// Change into `path` (after `~` expansion). An empty path keeps the
    /// current directory and restores nothing.
    pub fn enter(path: impl AsRef<Path>) -> Result<Self, SyncError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Ok(Self { saved: None });
        }

        let target = expand_home(path);
        let saved = env::current_dir().map_err(|e| SyncError::filesystem(".", e))?;
        env::set_current_dir(&target).map_err(|e| SyncError::filesystem(&target, e))?;
        tracing::debug!("entered {}", target.display());

        Ok(Self { saved: Some(saved) })
    }

    /// Directory that will be restored on drop, if any.
    pub fn saved(&self) -> Option<&Path> {
        self.saved.as_deref()
    }
}

impl Drop for ScopedDir {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            if let Err(e) = env::set_current_dir(&saved) {
                tracing::warn!("could not return to {}: {}", saved.display(), e);
            }
        }
    }
}

/// Replace a leading `~` component with the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    let mut components = path.components();
    match components.next() {
        Some(first) if first.as_os_str() == "~" => match dirs::home_dir() {
            Some(home) => home.join(components.as_path()),
            None => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}
