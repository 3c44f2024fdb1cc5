//! Append-only CSV result sink
//!
//! The header goes out once per sweep, before the first grid point, and a row
//! follows each successful run. Existing content is never rewritten, so
//! repeated sweeps against one file accumulate (header included).

use crate::error::{SweepError, SweepResult};
use crate::run::RunResult;
use crate::types::{BenchmarkSpec, HarnessMode};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// One CSV line, in header column order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    pub tree_type: String,
    pub arity: u64,
    pub num_leaves: u64,
    pub batch_size: u64,
    pub upds_per_sec: Option<u64>,
    pub hashes_per_sec: Option<u64>,
    pub num_hashes: Option<u64>,
}

impl CsvRow {
    pub fn new(spec: &BenchmarkSpec, result: &RunResult) -> Self {
        Self {
            tree_type: spec.tree_type.to_string(),
            arity: spec.arity,
            num_leaves: spec.num_leaves,
            batch_size: spec.batch_size,
            upds_per_sec: result.upds_per_sec,
            hashes_per_sec: result.hashes_per_sec,
            num_hashes: result.num_hashes,
        }
    }

    /// Cell values; absent metrics become empty cells
    pub fn cells(&self) -> [String; 7] {
        let cell = |value: Option<u64>| value.map(|v| v.to_string()).unwrap_or_default();
        [
            self.tree_type.clone(),
            self.arity.to_string(),
            self.num_leaves.to_string(),
            self.batch_size.to_string(),
            cell(self.upds_per_sec),
            cell(self.hashes_per_sec),
            cell(self.num_hashes),
        ]
    }
}

/// Destination for sweep results.
pub trait ResultSink {
    /// Write the header line for `mode`
    fn write_header(&mut self, mode: HarnessMode) -> SweepResult<()>;

    /// Append one row for a successful run
    fn write_row(&mut self, spec: &BenchmarkSpec, result: &RunResult) -> SweepResult<()>;
}

/// CSV writer over any byte sink, flushed after every line.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    rows_written: usize,
}

impl CsvSink<File> {
    /// Open `path` for append, creating it if absent.
    pub fn append_to(path: impl AsRef<Path>) -> SweepResult<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| SweepError::OutputUnavailable {
                path: PathBuf::from(path),
                source,
            })?;
        Ok(Self::new(file))
    }
}

impl<W: Write> CsvSink<W> {
    pub fn new(inner: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(inner);
        Self {
            writer,
            rows_written: 0,
        }
    }

    /// Data rows written so far (header excluded)
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush and hand back the underlying writer
    pub fn into_inner(self) -> SweepResult<W> {
        self.writer
            .into_inner()
            .map_err(|e| SweepError::Io(e.into_error()))
    }
}

impl<W: Write> ResultSink for CsvSink<W> {
    fn write_header(&mut self, mode: HarnessMode) -> SweepResult<()> {
        self.writer.write_record(mode.csv_header())?;
        self.writer.flush()?;
        Ok(())
    }

    fn write_row(&mut self, spec: &BenchmarkSpec, result: &RunResult) -> SweepResult<()> {
        self.writer.write_record(CsvRow::new(spec, result).cells())?;
        self.writer.flush()?;
        self.rows_written += 1;
        Ok(())
    }
}
