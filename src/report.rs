//! Run results and their text / JSON rendering.

use crate::bucket_table::WordTable;
use crate::config::CountConfig;
use compact_str::CompactString;
use serde::Serialize;
use std::io::{self, Write};
use std::time::Duration;

/// Run-wide totals, exact once every worker has been joined
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunTotals {
    /// Regular files discovered by the walk
    pub files: u64,
    /// Discovered files that could not be opened or read
    pub files_failed: u64,
    /// Words recorded in the table
    pub words: u64,
}

/// Final table of a run together with its totals
#[derive(Debug)]
pub struct RunReport<T> {
    pub table: T,
    pub totals: RunTotals,
    pub elapsed: Duration,
}

/// One output line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub idx: usize,
    pub word: CompactString,
    pub count: u64,
    #[serde(serialize_with = "serialize_f64_2dp")]
    pub percent: f64,
}

/// Share of `count` in `total` as a percentage, 0 when nothing was counted
pub fn percent(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}

fn round_to_2_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn serialize_f64_2dp<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_f64(round_to_2_decimals(*value))
}

#[derive(Serialize)]
struct JsonResults {
    files: u64,
    files_failed: u64,
    total_words: u64,
    distinct_words: usize,
    elapsed_ms: f64,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    config: &'a CountConfig,
    results: JsonResults,
    words: Vec<ReportRow>,
}

impl<T: WordTable> RunReport<T> {
    /// Rows in table order (bucket by bucket, newest entry first)
    pub fn rows(&self) -> Vec<ReportRow> {
        self.table
            .entries()
            .into_iter()
            .enumerate()
            .map(|(idx, entry)| ReportRow {
                idx,
                percent: percent(entry.count, self.totals.words),
                word: entry.word,
                count: entry.count,
            })
            .collect()
    }

    pub fn write_table<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{:>10} {:<20} {:<10} PERCENT(%)", "IDX", "WORD", "NUM")?;
        for row in self.rows() {
            writeln!(
                out,
                "{:>10} {:<20} {:<10} {:.2}",
                row.idx,
                row.word.as_str(),
                row.count,
                row.percent
            )?;
        }
        writeln!(out, "Total {} files processed.", self.totals.files)
    }

    pub fn write_json<W: Write>(&self, config: &CountConfig, out: &mut W) -> serde_json::Result<()> {
        let report = JsonReport {
            config,
            results: JsonResults {
                files: self.totals.files,
                files_failed: self.totals.files_failed,
                total_words: self.totals.words,
                distinct_words: self.table.len(),
                elapsed_ms: self.elapsed.as_secs_f64() * 1000.0,
            },
            words: self.rows(),
        };
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out).map_err(serde_json::Error::io)
    }
}
