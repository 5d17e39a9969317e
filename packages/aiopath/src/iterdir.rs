use std::fmt;
use std::iter::FusedIterator;
use std::vec;

use aiopath_offload::Offloader;
use aiopath_pure::PurePosixPath;

use crate::AsyncPath;

/// Directory members returned by [`PathIo::iterdir`](crate::PathIo::iterdir).
///
/// The listing is taken once, on a worker, when `iterdir` is awaited. Each
/// item is named by the bare entry name and shares the offloader of the
/// directory it came from. Iterating is forward-only; list again to restart.
pub struct IterDir {
    entries: vec::IntoIter<PurePosixPath>,
    offloader: Offloader,
}

impl IterDir {
    pub(crate) fn new(entries: Vec<PurePosixPath>, offloader: Offloader) -> Self {
        Self {
            entries: entries.into_iter(),
            offloader,
        }
    }
}

impl Iterator for IterDir {
    type Item = AsyncPath;

    fn next(&mut self) -> Option<AsyncPath> {
        let pure = self.entries.next()?;
        Some(AsyncPath::from_pure(pure).with_offloader(self.offloader.clone()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl ExactSizeIterator for IterDir {}

impl FusedIterator for IterDir {}

impl fmt::Debug for IterDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterDir")
            .field("remaining", &self.entries.len())
            .finish()
    }
}
