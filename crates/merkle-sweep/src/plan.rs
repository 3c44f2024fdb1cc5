//! A validated sweep, ready to run.

use std::io::{self, Write};
use std::path::PathBuf;
use sweep_harness::{
    CsvSink, GridShape, HarnessMode, ParameterGridBuilder, ProcessInvoker, SweepOrchestrator,
    SweepReport, SweepResult, TreeType,
};
use tracing::info;

/// Everything needed to run one sweep, resolved from CLI arguments and config
#[derive(Debug, Clone)]
pub struct SweepPlan {
    pub mode: HarnessMode,
    pub tree_type: TreeType,
    pub shape: GridShape,
    /// Destination file; `None` prints rows to stdout
    pub output: Option<PathBuf>,
    pub bench_bin: PathBuf,
    pub marker: char,
}

impl SweepPlan {
    /// Run the sweep, writing progress to `status`.
    ///
    /// The output file is opened (and created) before the first grid point;
    /// failure to do so is a configuration error.
    pub fn execute<W: Write>(&self, status: &mut W) -> SweepResult<SweepReport> {
        let grid = ParameterGridBuilder::new(self.tree_type.clone(), self.shape.clone())
            .with_marker(self.marker)
            .build();
        let invoker = ProcessInvoker::new(&self.bench_bin, self.mode.flag_style());
        let orchestrator = SweepOrchestrator::new(self.mode, &invoker);

        info!(
            mode = %self.mode,
            tree = %self.tree_type,
            bench_bin = %self.bench_bin.display(),
            output = %self.output.as_ref().map_or_else(|| "<stdout>".to_string(), |p| p.display().to_string()),
            "Sweep plan ready"
        );

        match &self.output {
            Some(path) => {
                let mut sink = CsvSink::append_to(path)?;
                orchestrator.run(&grid, &mut sink, status)
            }
            None => {
                let mut sink = CsvSink::new(io::stdout());
                orchestrator.run(&grid, &mut sink, status)
            }
        }
    }
}
