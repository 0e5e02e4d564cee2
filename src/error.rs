//! Error types for wordfreq
//!
//! Only file-level failures inside a worker are recovered locally (logged and
//! counted). Everything else bubbles up as a [`WordCountError`] and ends the
//! run.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for a counting run
#[derive(Error, Debug)]
pub enum WordCountError {
    #[error("Root path '{0}' does not exist")]
    RootNotFound(PathBuf),

    #[error("'{0}' is not a directory")]
    NotADirectory(PathBuf),

    /// Directory that cannot be read or entry whose metadata cannot be read
    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    #[error("Failed to open file '{path}': {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to spawn worker {id}: {source}")]
    WorkerSpawn {
        id: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("Worker {id} panicked")]
    WorkerPanicked { id: usize },

    /// Every worker is gone while files are still being queued
    #[error("Work queue closed unexpectedly")]
    QueueClosed,

    /// Workers are joined but the counting table is still referenced
    #[error("Counting table still shared after all workers exited")]
    TableInUse,

    #[error("Engines disagree on '{word}': baseline {baseline:?}, concurrent {concurrent:?}")]
    EngineMismatch {
        word: String,
        baseline: Option<u64>,
        concurrent: Option<u64>,
    },
}

/// Invalid command line or library configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Worker count must be between 1 and {max}, got {value}")]
    InvalidWorkerCount { value: usize, max: usize },

    #[error("Queue size must be at least 1")]
    InvalidQueueSize,

    #[error("Bucket count must be between 1 and {max}, got {value}")]
    InvalidBucketCount { value: usize, max: usize },

    #[error("Maximum word length must be at least 1")]
    InvalidMaxWordLen,
}

pub type Result<T> = std::result::Result<T, WordCountError>;
