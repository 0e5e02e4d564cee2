//! Configuration types for wordfreq
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Runtime configuration with validation

use crate::bucket_table::DEFAULT_BUCKETS;
use crate::error::ConfigError;
use crate::tokenizer::{DEFAULT_MAX_WORD_LEN, LongWordPolicy, TokenizerConfig};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

/// Maximum reasonable worker count
pub const MAX_WORKERS: usize = 512;

/// Default capacity of the path queue between the walker and the workers
pub const DEFAULT_QUEUE_SIZE: usize = 1024;

/// Largest table accepted on the command line
pub const MAX_BUCKETS: usize = 1 << 24;

/// Which counting engine runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// Worker pool sharing one striped-lock table
    #[default]
    Concurrent,
    /// Everything on the calling thread
    Sequential,
    /// Run both and check that they agree
    Compare,
}

/// Function distributing words over buckets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HasherKind {
    /// Position-mixing hash of neighbouring characters
    #[default]
    Mix,
    /// fxhash
    Fx,
}

/// Count word frequencies across every file of a directory tree
#[derive(Parser, Debug, Clone)]
#[command(
    name = "wordfreq",
    version,
    about = "Count word frequencies across every file of a directory tree",
    after_help = "EXAMPLES:\n    \
        wordfreq ./corpus\n    \
        wordfreq ./corpus -w 16 --buckets 65521\n    \
        wordfreq ./corpus --engine compare -v\n    \
        wordfreq ./corpus --json > counts.json"
)]
pub struct CliArgs {
    /// Root directory to scan
    #[arg(value_name = "DIR")]
    pub root: PathBuf,

    /// Counting engine
    #[arg(short, long, value_enum, default_value_t = Engine::Concurrent)]
    pub engine: Engine,

    /// Number of worker threads
    #[arg(short = 'w', long, default_value_t = default_workers(), value_name = "NUM")]
    pub workers: usize,

    /// Capacity of the queue feeding file paths to the workers
    #[arg(long, default_value_t = DEFAULT_QUEUE_SIZE, value_name = "NUM")]
    pub queue_size: usize,

    /// Number of hash table buckets
    #[arg(long, default_value_t = DEFAULT_BUCKETS, value_name = "NUM")]
    pub buckets: usize,

    /// Bucket hash function
    #[arg(long, value_enum, default_value_t = HasherKind::Mix)]
    pub hasher: HasherKind,

    /// Longest word kept whole
    #[arg(long, default_value_t = DEFAULT_MAX_WORD_LEN, value_name = "NUM")]
    pub max_word_len: usize,

    /// What to do with longer words
    #[arg(long, value_enum, default_value_t = LongWordPolicy::Truncate)]
    pub long_words: LongWordPolicy,

    /// Skip symbolic links instead of counting what they point to
    #[arg(long)]
    pub no_follow_links: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Verbose output (timings and per-worker summaries)
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

fn default_workers() -> usize {
    num_cpus::get().clamp(1, MAX_WORKERS)
}

/// Validated run configuration
#[derive(Debug, Clone, Serialize)]
pub struct CountConfig {
    pub root: PathBuf,
    pub engine: Engine,
    pub workers: usize,
    pub queue_size: usize,
    pub buckets: usize,
    pub hasher: HasherKind,
    pub tokenizer: TokenizerConfig,
    /// Count what symbolic links point to; a dangling link ends the walk
    pub follow_links: bool,
}

impl CountConfig {
    /// Defaults for library use
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            engine: Engine::default(),
            workers: default_workers(),
            queue_size: DEFAULT_QUEUE_SIZE,
            buckets: DEFAULT_BUCKETS,
            hasher: HasherKind::default(),
            tokenizer: TokenizerConfig::default(),
            follow_links: true,
        }
    }

    /// Create validated config from CLI args
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        let config = Self {
            root: args.root,
            engine: args.engine,
            workers: args.workers,
            queue_size: args.queue_size,
            buckets: args.buckets,
            hasher: args.hasher,
            tokenizer: TokenizerConfig {
                max_word_len: args.max_word_len,
                long_words: args.long_words,
            },
            follow_links: !args.no_follow_links,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 || self.workers > MAX_WORKERS {
            return Err(ConfigError::InvalidWorkerCount {
                value: self.workers,
                max: MAX_WORKERS,
            });
        }
        if self.queue_size == 0 {
            return Err(ConfigError::InvalidQueueSize);
        }
        if self.buckets == 0 || self.buckets > MAX_BUCKETS {
            return Err(ConfigError::InvalidBucketCount {
                value: self.buckets,
                max: MAX_BUCKETS,
            });
        }
        if self.tokenizer.max_word_len == 0 {
            return Err(ConfigError::InvalidMaxWordLen);
        }
        Ok(())
    }
}
