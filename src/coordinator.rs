//! Walk coordinator for the concurrent engine
//!
//! Manages:
//! - Worker thread pool and the bounded path queue
//! - Directory walk feeding the queue
//! - The join barrier before the table is handed out
//! - Abort on fatal walk errors

use crate::bucket_table::{ConcurrentTable, WordTable};
use crate::config::CountConfig;
use crate::error::{Result, WordCountError};
use crate::hasher::{BucketHasher, MixHasher};
use crate::report::{RunReport, RunTotals};
use crate::walk;
use crate::worker::{Worker, WorkerStats};
use measure_time::info_time;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{debug, error, info};

/// Owns the shared table for one run of the concurrent engine
pub struct Coordinator<H = MixHasher> {
    config: CountConfig,
    table: Arc<ConcurrentTable<H>>,
    abort: Arc<AtomicBool>,
}

impl<H: BucketHasher + Default + 'static> Coordinator<H> {
    pub fn new(config: CountConfig) -> Result<Self> {
        Self::with_hasher(config, H::default())
    }
}

impl<H: BucketHasher + 'static> Coordinator<H> {
    pub fn with_hasher(config: CountConfig, hasher: H) -> Result<Self> {
        config.validate()?;
        let table = Arc::new(ConcurrentTable::with_hasher(config.buckets, hasher));
        Ok(Self {
            config,
            table,
            abort: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Count every file under the configured root.
    ///
    /// Returns only after every worker has exited, so the table in the report
    /// is final.
    pub fn run(self) -> Result<RunReport<ConcurrentTable<H>>> {
        let started = Instant::now();
        walk::check_root(&self.config.root)?;

        let (tx, rx) = crossbeam_channel::bounded(self.config.queue_size);
        let mut workers = Vec::with_capacity(self.config.workers);
        for id in 0..self.config.workers {
            let spawned = Worker::spawn(
                id,
                Arc::clone(&self.table),
                self.config.tokenizer,
                rx.clone(),
                Arc::clone(&self.abort),
            );
            match spawned {
                Ok(worker) => workers.push(worker),
                Err(e) => {
                    error!(worker = id, "{e}");
                    self.abort.store(true, Ordering::Relaxed);
                    drop(tx);
                    // Already failing; the spawn error is the one reported
                    let _ = join_all(workers);
                    return Err(e);
                }
            }
        }
        drop(rx);
        debug!(workers = workers.len(), queue = self.config.queue_size, "worker pool started");

        let walked = {
            info_time!("walking and counting");
            walk::walk_files(&self.config.root, self.config.follow_links, |path| {
                tx.send(path).map_err(|_| WordCountError::QueueClosed)
            })
        };
        if let Err(e) = &walked {
            error!("{e}, aborting run");
            self.abort.store(true, Ordering::Relaxed);
        }

        // Closing the queue lets workers exit once it is drained
        drop(tx);
        let joined = {
            info_time!("joining workers");
            join_all(workers)
        };

        let files = walked?;
        let stats = joined?;

        let table = Arc::into_inner(self.table).ok_or(WordCountError::TableInUse)?;
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
            "concurrent count finished"
        );

        Ok(RunReport {
            table,
            totals,
            elapsed: started.elapsed(),
        })
    }
}

/// Joins every worker, even after a failure, and sums their totals
fn join_all(workers: Vec<Worker>) -> Result<WorkerStats> {
    let mut total = WorkerStats::default();
    let mut first_err = None;
    for worker in workers {
        match worker.join() {
            Ok(stats) => total += stats,
            Err(e) => {
                error!("{e}");
                first_err.get_or_insert(e);
            }
        }
    }
    match first_err {
        Some(e) => Err(e),
        None => Ok(total),
    }
}
