//! wordfreq - word frequencies over a directory tree
//!
//! Two engines count the same thing:
//! - [`baseline::count_sequential`] walks, tokenizes and counts on one thread
//!   into a [`SequentialTable`];
//! - [`Coordinator`] feeds a pool of [`worker::Worker`] threads that share a
//!   [`ConcurrentTable`], a fixed array of buckets with one lock per bucket
//!   and one lock per word.
//!
//! [`compare_engines`] runs both and checks that they agree.

extern crate alloc;

pub mod baseline;
pub mod bucket_table;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod hasher;
pub mod report;
pub mod tokenizer;
pub mod walk;
pub mod worker;

pub use bucket_table::{ConcurrentTable, SequentialTable, WordCount, WordTable};
pub use config::{CountConfig, Engine, HasherKind};
pub use coordinator::Coordinator;
pub use error::{Result, WordCountError};
pub use hasher::{BucketHasher, FxBucketHasher, MixHasher};
pub use report::{RunReport, RunTotals};

use tracing::info;

/// Runs the baseline and the concurrent engine on the same tree.
///
/// # Errors
///
/// Fails if either run fails, or with [`WordCountError::EngineMismatch`] when
/// the two tables differ in any word or count.
pub fn compare_engines<H>(
    config: &CountConfig,
) -> Result<(RunReport<SequentialTable<H>>, RunReport<ConcurrentTable<H>>)>
where
    H: BucketHasher + Default + 'static,
{
    let baseline = baseline::count_sequential(config, H::default())?;
    let concurrent = Coordinator::<H>::new(config.clone())?.run()?;

    check_agreement(&baseline.table, &concurrent.table)?;
    info!(
        baseline_ms = baseline.elapsed.as_secs_f64() * 1000.0,
        concurrent_ms = concurrent.elapsed.as_secs_f64() * 1000.0,
        distinct = concurrent.table.len(),
        "engines agree"
    );
    Ok((baseline, concurrent))
}

/// Checks that two tables hold the same (word, count) pairs, in any order
pub fn check_agreement(baseline: &impl WordTable, concurrent: &impl WordTable) -> Result<()> {
    match first_difference(&baseline.sorted_entries(), &concurrent.sorted_entries()) {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn first_difference(baseline: &[WordCount], concurrent: &[WordCount]) -> Option<WordCountError> {
    let mismatch = |word: &str, baseline, concurrent| WordCountError::EngineMismatch {
        word: word.to_string(),
        baseline,
        concurrent,
    };

    let mut b = baseline.iter().peekable();
    let mut c = concurrent.iter().peekable();
    loop {
        match (b.peek(), c.peek()) {
            (None, None) => return None,
            (Some(x), Some(y)) if x.word == y.word => {
                if x.count != y.count {
                    return Some(mismatch(&x.word, Some(x.count), Some(y.count)));
                }
                b.next();
                c.next();
            }
            (Some(x), Some(y)) if x.word < y.word => return Some(mismatch(&x.word, Some(x.count), None)),
            (Some(x), None) => return Some(mismatch(&x.word, Some(x.count), None)),
            (_, Some(y)) => return Some(mismatch(&y.word, None, Some(y.count))),
        }
    }
}
