//! Sweep orchestration
//!
//! Runs a prepared grid strictly one point at a time: invoke, extract,
//! persist, then move on. Runs are never parallelised; concurrent benchmarks
//! would contend for CPU, cache and memory bandwidth and skew throughput.
//!
//! ```text
//! GridEntry ─┬─ Skip ──────────────────────────────→ status notice
//!            └─ Run → Invoker → RunResult ─┬─ ok ──→ status echo → ResultSink
//!                                          └─ fail → status block
//! ```

use crate::error::SweepResult;
use crate::extract::{MetricExtractor, Metrics};
use crate::grid::GridEntry;
use crate::invoker::BenchmarkInvoker;
use crate::run::RunResult;
use crate::sink::ResultSink;
use crate::types::{BenchmarkSpec, HarnessMode};
use serde::{Deserialize, Serialize};
use std::io::Write;
use tracing::{info, warn};

/// Counts for one sweep, returned to the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepReport {
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl SweepReport {
    /// Grid points that reached the executable
    pub fn invoked(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Drives one sweep over a grid.
pub struct SweepOrchestrator<'a, I: BenchmarkInvoker> {
    mode: HarnessMode,
    invoker: &'a I,
    extractor: MetricExtractor,
}

impl<'a, I: BenchmarkInvoker> SweepOrchestrator<'a, I> {
    pub fn new(mode: HarnessMode, invoker: &'a I) -> Self {
        Self {
            mode,
            invoker,
            extractor: MetricExtractor::new(),
        }
    }

    /// Run every grid entry in order.
    ///
    /// The header is written before the first entry even if the grid is empty.
    /// Failed runs are reported on `status` and never stop the sweep; only a
    /// sink or status write error does.
    pub fn run<S, W>(
        &self,
        grid: &[GridEntry],
        sink: &mut S,
        status: &mut W,
    ) -> SweepResult<SweepReport>
    where
        S: ResultSink,
        W: Write,
    {
        info!(mode = %self.mode, points = grid.len(), "Sweep starting");
        sink.write_header(self.mode)?;

        let mut report = SweepReport::default();
        for entry in grid {
            match entry {
                GridEntry::Skip(directive) => {
                    info!(axis = %directive.axis, value = %directive.value, "Grid value skipped");
                    writeln!(status, "{directive}")?;
                    report.skipped += 1;
                }
                GridEntry::Run(spec) => {
                    if self.run_point(spec, sink, status)? {
                        report.succeeded += 1;
                    } else {
                        report.failed += 1;
                    }
                }
            }
        }

        info!(
            succeeded = report.succeeded,
            failed = report.failed,
            skipped = report.skipped,
            "Sweep finished"
        );
        Ok(report)
    }

    /// Returns whether the run succeeded
    fn run_point<S, W>(
        &self,
        spec: &BenchmarkSpec,
        sink: &mut S,
        status: &mut W,
    ) -> SweepResult<bool>
    where
        S: ResultSink,
        W: Write,
    {
        writeln!(
            status,
            "Benchmarking {}: arity={} leaves={} {}={}",
            spec.tree_type,
            spec.arity,
            spec.num_leaves,
            self.mode.batch_column(),
            spec.batch_size
        )?;
        status.flush()?;

        let output = self.invoker.invoke(spec);
        let reason = output.failure_reason();
        let result = RunResult::from_output(output, &self.extractor);

        if !result.success {
            warn!(
                tree = %spec.tree_type,
                arity = spec.arity,
                num_leaves = spec.num_leaves,
                batch_size = spec.batch_size,
                %reason,
                "Benchmark run failed"
            );
            writeln!(status, "===== run failed ({reason}) =====")?;
            write!(status, "{}", result.raw_output)?;
            if !result.raw_output.is_empty() && !result.raw_output.ends_with('\n') {
                writeln!(status)?;
            }
            writeln!(status, "===== end of output =====")?;
            return Ok(false);
        }

        writeln!(status, "  {}", format_metrics(&result.metrics()))?;
        sink.write_row(spec, &result)?;
        Ok(true)
    }
}

/// One-line echo of extracted figures, `-` for anything missing
pub fn format_metrics(metrics: &Metrics) -> String {
    let int = |value: Option<u64>| value.map_or_else(|| "-".to_string(), |v| v.to_string());
    format!(
        "upds/s={} hashes/s={} hashes={} exp={}",
        int(metrics.upds_per_sec),
        int(metrics.hashes_per_sec),
        int(metrics.num_hashes),
        metrics.exponentiation_time.as_deref().unwrap_or("-")
    )
}
