//! Remote catalog model and parsing of the downloader's JSON document.
//!
//! The downloader prints one JSON object for the whole playlist with an
//! `entries` array. Only `title` and the page locator are kept; everything
//! else in the document is ignored.

use serde_json::Value;

use crate::error::SyncError;

/// Extension of the audio files the orchestrator produces.
pub const AUDIO_EXTENSION: &str = "mp3";

/// One remote playlist item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Used verbatim as the filename stem.
    pub title: String,
    /// Opaque locator handed to the downloader.
    pub webpage_url: String,
}

impl Entry {
    pub fn new(title: impl Into<String>, webpage_url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            webpage_url: webpage_url.into(),
        }
    }

    /// `"{title}.mp3"`, with no escaping of the title.
    pub fn expected_filename(&self) -> String {
        format!("{}.{}", self.title, AUDIO_EXTENSION)
    }
}

/// Entries in remote listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<Entry>,
}

impl Catalog {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

impl From<Vec<Entry>> for Catalog {
    fn from(entries: Vec<Entry>) -> Self {
        Self::new(entries)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Parse a playlist JSON document into a [`Catalog`].
///
/// Fails on the first malformed entry; nothing is skipped.
pub fn parse_catalog(data: &[u8]) -> Result<Catalog, SyncError> {
    let doc: Value = serde_json::from_slice(data)
        .map_err(|e| SyncError::Parse(format!("response is not JSON: {e}")))?;

    let entries = doc
        .get("entries")
        .ok_or_else(|| SyncError::Parse("missing `entries` field".to_string()))?
        .as_array()
        .ok_or_else(|| SyncError::Parse("`entries` is not an array".to_string()))?;

    entries
        .iter()
        .enumerate()
        .map(|(i, v)| parse_entry(i, v))
        .collect::<Result<Vec<_>, _>>()
        .map(Catalog::new)
}

fn parse_entry(index: usize, value: &Value) -> Result<Entry, SyncError> {
    let obj = value
        .as_object()
        .ok_or_else(|| SyncError::Parse(format!("entry {index} is not an object")))?;

    let title = obj
        .get("title")
        .and_then(Value::as_str)
        .ok_or_else(|| SyncError::Parse(format!("entry {index} has no `title`")))?;

    // Flat-playlist output carries `url` instead of `webpage_url`.
    let locator = obj
        .get("webpage_url")
        .and_then(Value::as_str)
        .or_else(|| obj.get("url").and_then(Value::as_str))
        .ok_or_else(|| {
            SyncError::Parse(format!("entry {index} ('{title}') has no `webpage_url`"))
        })?;

    Ok(Entry::new(title, locator))
}
