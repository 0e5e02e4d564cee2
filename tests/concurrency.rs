//! Stress tests for the shared table and the worker pool.

use std::fs;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;
use wordfreq::baseline::count_sequential;
use wordfreq::{
    ConcurrentTable, Coordinator, CountConfig, FxBucketHasher, MixHasher, WordTable,
    check_agreement,
};

#[test]
fn test_same_new_word_from_many_threads() {
    const THREADS: u64 = 32;
    const PER_THREAD: u64 = 5_000;

    let table: Arc<ConcurrentTable> = Arc::new(ConcurrentTable::with_buckets(10_007));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let table = Arc::clone(&table);
            thread::spawn(move || {
                for _ in 0..PER_THREAD {
                    table.count_word("contended");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(table.len(), 1);
    assert_eq!(table.get("contended"), Some(THREADS * PER_THREAD));
}

#[test]
fn test_many_words_few_buckets_conserve_counts() {
    let table: ConcurrentTable = ConcurrentTable::with_buckets(3);
    let vocabulary: Vec<String> = (0..200).map(|i| format!("word{i}")).collect();

    thread::scope(|s| {
        for t in 0..8 {
            let table = &table;
            let vocabulary = &vocabulary;
            s.spawn(move || {
                for i in 0..vocabulary.len() {
                    table.count_word(&vocabulary[(i + t * 7) % vocabulary.len()]);
                }
            });
        }
    });

    assert_eq!(table.total(), 8 * vocabulary.len() as u64);
    assert_eq!(table.len(), vocabulary.len());
    let sum: usize = (0..table.buckets()).map(|i| table.chain(i).len()).sum();
    assert_eq!(sum, table.len());
}

#[test]
fn test_pool_matches_baseline_on_generated_tree() {
    let dir = TempDir::new().unwrap();
    let words = ["lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit"];
    for d in 0..5 {
        let sub = dir.path().join(format!("dir{d}"));
        fs::create_dir(&sub).unwrap();
        for f in 0..20 {
            let text: Vec<&str> = (0..(d * 20 + f) % 37 + 1).map(|i| words[(i * 3 + f) % words.len()]).collect();
            fs::write(sub.join(format!("file{f}.txt")), text.join(" ")).unwrap();
        }
    }

    for workers in [1, 2, 8] {
        let config = CountConfig {
            workers,
            queue_size: 4,
            ..CountConfig::new(dir.path())
        };
        let baseline = count_sequential(&config, MixHasher).unwrap();
        let concurrent = Coordinator::<MixHasher>::new(config).unwrap().run().unwrap();

        check_agreement(&baseline.table, &concurrent.table).unwrap();
        assert_eq!(baseline.totals, concurrent.totals);
        assert_eq!(concurrent.totals.files, 100);
        assert_eq!(concurrent.table.total(), concurrent.totals.words);
    }
}

#[test]
fn test_hashers_agree_on_counts() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a"), "one two three two three three").unwrap();
    fs::write(dir.path().join("b"), "Three TWO one").unwrap();

    let mix = Coordinator::<MixHasher>::new(CountConfig::new(dir.path())).unwrap().run().unwrap();
    let fx = Coordinator::<FxBucketHasher>::new(CountConfig::new(dir.path())).unwrap().run().unwrap();

    check_agreement(&mix.table, &fx.table).unwrap();
    assert_eq!(fx.table.get("three"), Some(4));
    assert_eq!(fx.table.get("two"), Some(3));
    assert_eq!(fx.table.get("one"), Some(2));
}
