//! Fixed-size chained hash tables accumulating word counts.
//!
//! [`SequentialTable`] backs the single-threaded baseline, [`ConcurrentTable`]
//! is shared between worker threads. Both keep the same layout (a fixed array
//! of buckets, each a chain with the newest entry at its head) so their
//! outputs can be compared entry for entry.

use alloc::vec::Vec;
use compact_str::CompactString;
use core::borrow::Borrow;
use serde::Serialize;

pub mod concurrent;
pub mod sequential;

pub use concurrent::{ConcurrentTable, WordEntry};
pub use sequential::SequentialTable;

/// Prime table size used when none is configured
pub const DEFAULT_BUCKETS: usize = 10_007;

/// One distinct word and the number of times it was seen
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct WordCount {
    pub word: CompactString,
    pub count: u64,
}

/// Read side shared by both tables
pub trait WordTable {
    /// Count recorded for `word`, if it was ever seen
    fn get(&self, word: impl Borrow<str>) -> Option<u64>;

    /// Number of distinct words
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of buckets
    fn buckets(&self) -> usize;

    /// Every entry in bucket order, each chain walked from its head
    fn entries(&self) -> Vec<WordCount>;

    /// Sum of all counts
    fn total(&self) -> u64 {
        self.entries().iter().map(|e| e.count).sum()
    }

    /// Entries ordered by word, for order-independent comparison
    fn sorted_entries(&self) -> Vec<WordCount> {
        let mut entries = self.entries();
        entries.sort_unstable();
        entries
    }
}

/// Table sizes are reduced to a `u32` modulus; zero is bumped to one
pub(crate) fn modulus_for(buckets: usize) -> u32 {
    u32::try_from(buckets.max(1)).unwrap_or(u32::MAX)
}
