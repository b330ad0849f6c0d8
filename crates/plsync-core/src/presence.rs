//! PresenceFilter: which catalog entries have no `"{title}.mp3"` on disk.
//!
//! The check is a plain existence test relative to the current directory,
//! made when the iterator is advanced. Titles are not normalized or escaped.

use std::iter::FusedIterator;
use std::path::Path;

use crate::catalog::Entry;
use crate::logger::SyncLogger;

/// Lazy, single-pass filter over catalog entries. Created by
/// [`missing_entries`].
pub struct MissingEntries<'l, I> {
    entries: I,
    logger: &'l dyn SyncLogger,
}

/// Entries from `entries` whose expected file is absent, in input order.
pub fn missing_entries<'c, 'l, I>(
    entries: I,
    logger: &'l dyn SyncLogger,
) -> MissingEntries<'l, I::IntoIter>
where
    I: IntoIterator<Item = &'c Entry>,
{
    MissingEntries {
        entries: entries.into_iter(),
        logger,
    }
}

impl<'c, 'l, I> Iterator for MissingEntries<'l, I>
where
    I: Iterator<Item = &'c Entry>,
{
    type Item = &'c Entry;

    fn next(&mut self) -> Option<Self::Item> {
        for entry in self.entries.by_ref() {
            if !Path::new(&entry.expected_filename()).exists() {
                return Some(entry);
            }
            self.logger.debug(&format!("'{}' already exists", entry.title));
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.entries.size_hint().1)
    }
}

impl<'c, 'l, I> FusedIterator for MissingEntries<'l, I> where I: FusedIterator<Item = &'c Entry> {}
