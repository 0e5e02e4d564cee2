//! Worker thread logic for parallel counting
//!
//! Each worker:
//! - Pulls file paths from the bounded work queue
//! - Tokenizes the file with its own reusable tokenizer
//! - Records every word in the shared table
//! - Keeps its own totals and hands them back when joined

use crate::bucket_table::ConcurrentTable;
use crate::error::{Result, WordCountError};
use crate::hasher::BucketHasher;
use crate::tokenizer::{Tokenizer, TokenizerConfig};
use crossbeam_channel::Receiver;
use std::fs::File;
use std::io::BufReader;
use std::ops::AddAssign;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

/// Totals collected while counting files
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WorkerStats {
    /// Files tokenized to the end
    pub files_read: u64,

    /// Files that could not be opened or read
    pub files_failed: u64,

    /// Words recorded, including those of files that failed mid-read
    pub words: u64,
}

impl AddAssign for WorkerStats {
    fn add_assign(&mut self, other: Self) {
        self.files_read += other.files_read;
        self.files_failed += other.files_failed;
        self.words += other.words;
    }
}

/// A pool thread counting the files it receives
pub struct Worker {
    id: usize,
    handle: Option<JoinHandle<WorkerStats>>,
}

impl Worker {
    /// Spawn a new worker thread
    pub fn spawn<H>(
        id: usize,
        table: Arc<ConcurrentTable<H>>,
        tokenizer: TokenizerConfig,
        queue: Receiver<PathBuf>,
        abort: Arc<AtomicBool>,
    ) -> Result<Self>
    where
        H: BucketHasher + 'static,
    {
        let handle = thread::Builder::new()
            .name(format!("wordfreq-worker-{id}"))
            .spawn(move || worker_loop(id, &table, tokenizer, &queue, &abort))
            .map_err(|source| WordCountError::WorkerSpawn { id, source })?;

        Ok(Self {
            id,
            handle: Some(handle),
        })
    }

    /// Wait for the worker to drain the queue and exit
    pub fn join(mut self) -> Result<WorkerStats> {
        match self.handle.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| WordCountError::WorkerPanicked { id: self.id }),
            None => Ok(WorkerStats::default()),
        }
    }
}

fn worker_loop<H: BucketHasher>(
    id: usize,
    table: &ConcurrentTable<H>,
    tokenizer: TokenizerConfig,
    queue: &Receiver<PathBuf>,
    abort: &AtomicBool,
) -> WorkerStats {
    let mut tokenizer = Tokenizer::new(tokenizer);
    let mut stats = WorkerStats::default();

    // Ends once the coordinator drops the sender and the queue is drained
    for path in queue.iter() {
        if abort.load(Ordering::Relaxed) {
            debug!(worker = id, "abort requested, leaving queue");
            break;
        }
        process_file(&path, &mut tokenizer, &mut stats, |word| table.count_word(word));
    }

    debug!(
        worker = id,
        files = stats.files_read,
        failed = stats.files_failed,
        words = stats.words,
        "worker finished"
    );
    stats
}

/// Counts one file into `stats`, feeding each word to `count`.
///
/// Open and read failures are logged and recorded as a failed file; they
/// never stop the caller.
pub fn process_file<F>(path: &Path, tokenizer: &mut Tokenizer, stats: &mut WorkerStats, mut count: F)
where
    F: FnMut(&str),
{
    let mut words = 0;
    let result = count_file(path, tokenizer, |word| {
        count(word);
        words += 1;
    });
    stats.words += words;

    match result {
        Ok(_) => stats.files_read += 1,
        Err(e) => {
            warn!("{e}");
            stats.files_failed += 1;
        }
    }
}

/// Opens `path` and feeds its words to `emit`, returning the word count
pub fn count_file<F>(path: &Path, tokenizer: &mut Tokenizer, emit: F) -> Result<u64>
where
    F: FnMut(&str),
{
    let file = File::open(path).map_err(|source| WordCountError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(file);

    tokenizer
        .for_each_word(&mut reader, emit)
        .map_err(|source| WordCountError::FileRead {
            path: path.to_path_buf(),
            source,
        })
}
