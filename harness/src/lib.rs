//! Benchmark sweep harness for Merkle/Verkle tree implementations
//!
//! This library drives an external, pre-built tree benchmark executable over
//! a grid of parameters and records the throughput figures it prints:
//! - Grid construction with a skip-marker convention (`#4` stays in the
//!   configuration but is never run)
//! - Blocking, one-at-a-time invocation of the executable
//! - Marker-based extraction of figures from its textual output
//! - Append-only CSV persistence
//!
//! # Architecture
//!
//! ```text
//! ParameterGridBuilder → GridEntry → SweepOrchestrator → BenchmarkInvoker
//!                                            ↓
//!                                     MetricExtractor → ResultSink (CSV)
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use sweep_harness::*;
//!
//! let mode = HarnessMode::SweepGridFile;
//! let shape = GridShape::default_leaf_grid(DEFAULT_NUM_UPDATES);
//! let grid = ParameterGridBuilder::new("merkle_sha3".parse()?, shape).build();
//!
//! let invoker = ProcessInvoker::new("target/release/merkle-race", mode.flag_style());
//! let mut sink = CsvSink::append_to("results.csv")?;
//! SweepOrchestrator::new(mode, &invoker).run(&grid, &mut sink, &mut std::io::stdout())?;
//! ```

pub mod error;
pub mod extract;
pub mod grid;
pub mod invoker;
pub mod orchestrator;
pub mod run;
pub mod sink;
pub mod types;

pub use error::{SweepError, SweepResult};
pub use extract::{MetricExtractor, Metrics};
pub use grid::{
    batch_series, AxisEntry, GridEntry, GridShape, ParameterGridBuilder, SkipDirective,
    DEFAULT_BATCH_NUM_LEAVES, DEFAULT_NUM_UPDATES, DEFAULT_SKIP_MARKER,
};
pub use invoker::{BenchmarkInvoker, FlagStyle, ProcessInvoker};
pub use orchestrator::{SweepOrchestrator, SweepReport};
pub use run::{RunOutput, RunResult};
pub use sink::{CsvRow, CsvSink, ResultSink};
pub use types::{Axis, BenchmarkSpec, HarnessMode, TreeType};
