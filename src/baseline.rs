//! Single-threaded reference run: same walk, same tokenizer, no locks.

use crate::bucket_table::{SequentialTable, WordTable};
use crate::config::CountConfig;
use crate::error::Result;
use crate::hasher::BucketHasher;
use crate::report::{RunReport, RunTotals};
use crate::tokenizer::Tokenizer;
use crate::walk;
use crate::worker::{WorkerStats, process_file};
use measure_time::info_time;
use std::time::Instant;
use tracing::info;

/// Count every file under the configured root on the calling thread
pub fn count_sequential<H: BucketHasher>(
    config: &CountConfig,
    hasher: H,
) -> Result<RunReport<SequentialTable<H>>> {
    config.validate()?;
    let started = Instant::now();

    let mut table = SequentialTable::with_hasher(config.buckets, hasher);
    let mut tokenizer = Tokenizer::new(config.tokenizer);
    let mut stats = WorkerStats::default();

    let files = {
        info_time!("sequential count");
        walk::walk_files(&config.root, config.follow_links, |path| {
            process_file(&path, &mut tokenizer, &mut stats, |word| table.count_word(word));
            Ok(())
        })?
    };

    let totals = RunTotals {
        files,
        files_failed: stats.files_failed,
        words: stats.words,
    };
    info!(
        files = totals.files,
        failed = totals.files_failed,
        words = totals.words,
        distinct = table.len(),
        "sequential count finished"
    );

    Ok(RunReport {
        table,
        totals,
        elapsed: started.elapsed(),
    })
}
