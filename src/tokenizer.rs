//! Splits a byte stream into lowercase ASCII words.
//!
//! A word is a maximal run of ASCII letters. Every other byte, including
//! non-ASCII UTF-8 sequences, separates words.

use clap::ValueEnum;
use serde::Serialize;
use std::io::{self, BufRead};

/// Longest word kept whole
pub const DEFAULT_MAX_WORD_LEN: usize = 128;

/// What happens to a run of letters longer than the maximum
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LongWordPolicy {
    /// Keep the first `max_word_len` letters
    #[default]
    Truncate,
    /// Drop the whole run
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TokenizerConfig {
    pub max_word_len: usize,
    pub long_words: LongWordPolicy,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            max_word_len: DEFAULT_MAX_WORD_LEN,
            long_words: LongWordPolicy::Truncate,
        }
    }
}

/// Streaming word splitter with a reusable word buffer
#[derive(Debug)]
pub struct Tokenizer {
    config: TokenizerConfig,
    word: String,
    overflowed: bool,
}

impl Tokenizer {
    pub fn new(config: TokenizerConfig) -> Self {
        Self {
            config,
            word: String::with_capacity(config.max_word_len),
            overflowed: false,
        }
    }

    /// Feeds every word of `reader` to `emit` and returns how many were emitted.
    ///
    /// On a read error the words emitted so far stay emitted.
    pub fn for_each_word<R, F>(&mut self, reader: &mut R, mut emit: F) -> io::Result<u64>
    where
        R: BufRead,
        F: FnMut(&str),
    {
        self.reset();
        let mut emitted = 0;

        loop {
            let buf = match reader.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if buf.is_empty() {
                break;
            }

            for &byte in buf {
                if byte.is_ascii_alphabetic() {
                    if self.word.len() < self.config.max_word_len {
                        self.word.push(char::from(byte.to_ascii_lowercase()));
                    } else {
                        self.overflowed = true;
                    }
                } else if self.flush(&mut emit) {
                    emitted += 1;
                }
            }

            let len = buf.len();
            reader.consume(len);
        }

        // Last word of a file without trailing separator
        if self.flush(&mut emit) {
            emitted += 1;
        }

        Ok(emitted)
    }

    fn flush<F: FnMut(&str)>(&mut self, emit: &mut F) -> bool {
        if self.word.is_empty() {
            return false;
        }
        let keep = !(self.overflowed && self.config.long_words == LongWordPolicy::Skip);
        if keep {
            emit(&self.word);
        }
        self.reset();
        keep
    }

    fn reset(&mut self) {
        self.word.clear();
        self.overflowed = false;
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(TokenizerConfig::default())
    }
}
