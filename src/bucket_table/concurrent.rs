use alloc::sync::Arc;
use alloc::vec::Vec;
use compact_str::CompactString;
use core::borrow::Borrow;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{WordCount, WordTable, modulus_for};
use crate::hasher::{BucketHasher, MixHasher};

/// Count cell for one distinct word.
///
/// The word never changes after creation. The count has its own lock so that
/// increments of an already known word do not hold the bucket lock.
#[derive(Debug)]
pub struct WordEntry {
    word: CompactString,
    count: Mutex<u64>,
}

impl WordEntry {
    fn new(word: &str) -> Self {
        Self {
            word: CompactString::from(word),
            count: Mutex::new(1),
        }
    }

    pub fn count(&self) -> u64 {
        *lock(&self.count)
    }
}

#[derive(Debug, Default)]
struct Bucket {
    // Chain head is the last element: inserting at the head is a push
    chain: Mutex<Vec<Arc<WordEntry>>>,
}

/// Striped-lock word table shared by all workers.
///
/// Two lock tiers:
/// - a bucket lock covers the chain scan and the insertion of new entries,
///   which makes scan-then-insert atomic per bucket;
/// - an entry lock covers the count of a word that is already in a chain.
///
/// A worker holds at most one bucket lock, and only ever nests the lock of an
/// entry of that same bucket inside it.
#[derive(Debug)]
pub struct ConcurrentTable<H = MixHasher> {
    buckets: Vec<Bucket>,
    modulus: u32,
    hasher: H,
}

impl<H: BucketHasher> ConcurrentTable<H> {
    pub fn with_hasher(buckets: usize, hasher: H) -> Self {
        let modulus = modulus_for(buckets);
        let mut table = Vec::with_capacity(modulus as usize);
        table.resize_with(modulus as usize, Bucket::default);
        Self {
            buckets: table,
            modulus,
            hasher,
        }
    }

    /// Records one occurrence of `word`, creating its entry on first sight
    pub fn count_word(&self, word: &str) {
        let bucket = &self.buckets[self.bucket_index(word)];
        let mut chain = lock(&bucket.chain);

        let existing = chain.iter().rev().find(|e| e.word == word).cloned();
        match existing {
            Some(entry) => {
                let mut count = lock(&entry.count);
                drop(chain);
                *count += 1;
            }
            // Not visible to anyone else until the bucket lock is released
            None => chain.push(Arc::new(WordEntry::new(word))),
        }
    }

    pub fn bucket_index(&self, word: &str) -> usize {
        self.hasher.bucket(word, self.modulus) as usize
    }

    /// Words of one bucket, head first
    pub fn chain(&self, index: usize) -> Vec<CompactString> {
        self.buckets.get(index).map_or_else(Vec::new, |bucket| {
            lock(&bucket.chain).iter().rev().map(|e| e.word.clone()).collect()
        })
    }

    fn find(&self, word: &str) -> Option<Arc<WordEntry>> {
        let chain = lock(&self.buckets[self.bucket_index(word)].chain);
        chain.iter().find(|e| e.word == word).cloned()
    }
}

impl<H: BucketHasher + Default> ConcurrentTable<H> {
    pub fn with_buckets(buckets: usize) -> Self {
        Self::with_hasher(buckets, H::default())
    }
}

impl<H: BucketHasher> WordTable for ConcurrentTable<H> {
    fn get(&self, word: impl Borrow<str>) -> Option<u64> {
        self.find(word.borrow()).map(|entry| entry.count())
    }

    fn len(&self) -> usize {
        self.buckets.iter().map(|b| lock(&b.chain).len()).sum()
    }

    fn buckets(&self) -> usize {
        self.buckets.len()
    }

    fn entries(&self) -> Vec<WordCount> {
        let mut out = Vec::new();
        for bucket in &self.buckets {
            let chain = lock(&bucket.chain);
            out.extend(chain.iter().rev().map(|e| WordCount {
                word: e.word.clone(),
                count: e.count(),
            }));
        }
        out
    }
}

// A panicking worker cannot leave a count half-written, so poisoned guards
// are taken over instead of propagating the panic.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
