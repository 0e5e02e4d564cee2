use alloc::vec::Vec;
use compact_str::CompactString;
use core::borrow::Borrow;

use super::{WordCount, WordTable, modulus_for};
use crate::hasher::{BucketHasher, MixHasher};

/// Single-threaded twin of [`super::ConcurrentTable`], used as the baseline
#[derive(Debug)]
pub struct SequentialTable<H = MixHasher> {
    // Each chain holds (word, count) with the head at the end
    buckets: Vec<Vec<(CompactString, u64)>>,
    modulus: u32,
    hasher: H,
    // Number of distinct words (cache)
    size: usize,
}

impl<H: BucketHasher> SequentialTable<H> {
    pub fn with_hasher(buckets: usize, hasher: H) -> Self {
        let modulus = modulus_for(buckets);
        let mut table = Vec::with_capacity(modulus as usize);
        table.resize_with(modulus as usize, Vec::new);
        Self {
            buckets: table,
            modulus,
            hasher,
            size: 0,
        }
    }

    pub fn count_word(&mut self, word: &str) {
        let bucket_i = self.hasher.bucket(word, self.modulus) as usize;
        let chain = &mut self.buckets[bucket_i];
        if let Some((_, count)) = chain.iter_mut().rev().find(|(w, _)| w == word) {
            *count += 1;
        } else {
            chain.push((CompactString::from(word), 1));
            self.size += 1;
        }
    }
}

impl<H: BucketHasher + Default> SequentialTable<H> {
    /// Initializes an empty table with a fixed number of buckets (at least one)
    pub fn with_buckets(buckets: usize) -> Self {
        Self::with_hasher(buckets, H::default())
    }
}

impl<H: BucketHasher> WordTable for SequentialTable<H> {
    fn get(&self, word: impl Borrow<str>) -> Option<u64> {
        let word = word.borrow();
        let bucket_i = self.hasher.bucket(word, self.modulus) as usize;
        self.buckets[bucket_i]
            .iter()
            .find(|(w, _)| w == word)
            .map(|(_, count)| *count)
    }

    fn len(&self) -> usize {
        self.size
    }

    fn buckets(&self) -> usize {
        self.buckets.len()
    }

    fn entries(&self) -> Vec<WordCount> {
        self.buckets
            .iter()
            .flat_map(|chain| chain.iter().rev())
            .map(|(word, count)| WordCount {
                word: word.clone(),
                count: *count,
            })
            .collect()
    }
}
