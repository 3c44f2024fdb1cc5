//! Command-line surface: three harness modes with positional arguments.

use crate::config::SweepConfig;
use crate::plan::SweepPlan;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use sweep_harness::grid::{parse_count, parse_entries, parse_list};
use sweep_harness::{Axis, GridShape, HarnessMode, SweepError, SweepResult, TreeType};
use tracing::warn;

/// Benchmark sweeps for Merkle/Verkle trees: runs the tree benchmark
/// executable once per grid point and records its throughput figures as CSV.
#[derive(Parser, Debug)]
#[command(name = "merkle-sweep", author, version, about, long_about = None)]
pub struct Cli {
    /// Benchmark executable (overrides MERKLE_SWEEP_BIN and the config file)
    #[arg(long, global = true)]
    pub bench_bin: Option<PathBuf>,

    /// TOML file with grid axes and defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: SweepCommand,
}

#[derive(Subcommand, Debug)]
pub enum SweepCommand {
    /// Sweep batch sizes 1, 2, 4, .., 2^20 for each arity; append rows to a file
    SweepBatch {
        /// Tree type passed to the executable (e.g. merkle_sha3)
        tree_type: String,
        /// Space-separated arities, e.g. "2 #4 8" ('#' skips a value)
        arities: String,
        /// CSV file to append to
        output: PathBuf,
    },
    /// Sweep the leaf-count x arity grid; print rows to stdout
    SweepGrid {
        /// Tree type passed to the executable
        tree_type: String,
    },
    /// Sweep the leaf-count x arity grid; append rows to a file
    SweepGridFile {
        /// Tree type passed to the executable
        tree_type: String,
        /// CSV file to append to
        output: PathBuf,
        /// Number of updates per run [default: 200000]
        #[arg(value_parser = parse_positive)]
        num_updates: Option<u64>,
    },
}

/// Classify a clap failure. Help and version requests are not errors and
/// yield `None`; everything else is a configuration error carrying clap's
/// rendered message and usage line.
pub fn usage_error(err: &clap::Error) -> Option<SweepError> {
    if !err.use_stderr() {
        return None;
    }
    let usage = err.render().to_string();
    Some(match err.kind() {
        ErrorKind::MissingRequiredArgument
        | ErrorKind::MissingSubcommand
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            SweepError::MissingArguments { usage }
        }
        _ => SweepError::InvalidArguments { usage },
    })
}

fn parse_positive(raw: &str) -> Result<u64, String> {
    match parse_count(raw)? {
        0 => Err("must be a positive integer".to_string()),
        n => Ok(n),
    }
}

impl SweepCommand {
    pub fn mode(&self) -> HarnessMode {
        match self {
            Self::SweepBatch { .. } => HarnessMode::SweepBatch,
            Self::SweepGrid { .. } => HarnessMode::SweepGrid,
            Self::SweepGridFile { .. } => HarnessMode::SweepGridFile,
        }
    }

    fn tree_type(&self) -> &str {
        match self {
            Self::SweepBatch { tree_type, .. }
            | Self::SweepGrid { tree_type }
            | Self::SweepGridFile { tree_type, .. } => tree_type,
        }
    }

    /// Validate arguments against the config and produce a typed plan.
    /// Nothing is opened or spawned here.
    pub fn plan(&self, config: &SweepConfig) -> SweepResult<SweepPlan> {
        let tree_type: TreeType = self.tree_type().parse()?;
        if !tree_type.is_known() {
            warn!(tree = %tree_type, "Tree type not known to this harness; passing it through");
        }

        let marker = config.skip_marker;
        let (shape, output) = match self {
            Self::SweepBatch {
                arities, output, ..
            } => {
                let arities = parse_list(arities, Axis::Arity, marker)?;
                if arities.is_empty() {
                    return Err(SweepError::invalid_axis("arity", "", "no arities given"));
                }
                let shape = GridShape::BatchSweep {
                    arities,
                    num_leaves: config.batch_num_leaves,
                };
                (shape, Some(output.clone()))
            }
            Self::SweepGrid { .. } => (leaf_grid(config, config.grid_num_updates)?, None),
            Self::SweepGridFile {
                output,
                num_updates,
                ..
            } => {
                let num_updates = num_updates.unwrap_or(config.grid_num_updates);
                (leaf_grid(config, num_updates)?, Some(output.clone()))
            }
        };

        Ok(SweepPlan {
            mode: self.mode(),
            tree_type,
            shape,
            output,
            bench_bin: config.bench_bin.clone(),
            marker,
        })
    }
}

fn leaf_grid(config: &SweepConfig, num_updates: u64) -> SweepResult<GridShape> {
    let marker = config.skip_marker;
    Ok(GridShape::LeafGrid {
        leaf_counts: parse_entries(
            config.grid_leaf_counts.iter().map(String::as_str),
            Axis::NumLeaves,
            marker,
        )?,
        arities: parse_entries(
            config.grid_arities.iter().map(String::as_str),
            Axis::Arity,
            marker,
        )?,
        num_updates,
    })
}
