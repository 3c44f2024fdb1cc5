//! Grid enumeration for both sweep shapes.

use crate::grid::axis::{AxisEntry, SkipDirective, DEFAULT_SKIP_MARKER};
use crate::types::{Axis, BenchmarkSpec, TreeType};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The batch series runs 2^0 ..= 2^20
pub const BATCH_SERIES_MAX_EXPONENT: u32 = 20;

/// Leaf count for batch sweeps: an arity-2 tree of height 30
pub const DEFAULT_BATCH_NUM_LEAVES: u64 = 1 << 30;

/// Batch size for leaf-count grids when none is given
pub const DEFAULT_NUM_UPDATES: u64 = 200_000;

pub const DEFAULT_LEAF_COUNTS: [u64; 5] = [
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
    2_000_000_000,
];

pub const DEFAULT_GRID_ARITIES: [u64; 10] = [2, 4, 8, 16, 32, 64, 128, 256, 512, 1024];

/// Powers of two from 1 to 2^20 inclusive.
pub fn batch_series() -> Vec<u64> {
    (0..=BATCH_SERIES_MAX_EXPONENT).map(|exp| 1u64 << exp).collect()
}

pub fn default_leaf_counts() -> Vec<AxisEntry> {
    DEFAULT_LEAF_COUNTS.iter().copied().map(AxisEntry::Active).collect()
}

pub fn default_grid_arities() -> Vec<AxisEntry> {
    DEFAULT_GRID_ARITIES.iter().copied().map(AxisEntry::Active).collect()
}

/// Shape of the grid, one per family of harness modes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridShape {
    /// Outer axis arity, inner axis the power-of-two batch series
    BatchSweep {
        arities: Vec<AxisEntry>,
        num_leaves: u64,
    },
    /// Outer axis leaf count, inner axis arity
    LeafGrid {
        leaf_counts: Vec<AxisEntry>,
        arities: Vec<AxisEntry>,
        num_updates: u64,
    },
}

impl GridShape {
    /// Leaf-count grid over the fixed default axes
    pub fn default_leaf_grid(num_updates: u64) -> Self {
        Self::LeafGrid {
            leaf_counts: default_leaf_counts(),
            arities: default_grid_arities(),
            num_updates,
        }
    }
}

/// One step of a sweep
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridEntry {
    Run(BenchmarkSpec),
    Skip(SkipDirective),
}

/// Produces the ordered sequence of grid points for a sweep.
#[derive(Debug, Clone)]
pub struct ParameterGridBuilder {
    tree_type: TreeType,
    shape: GridShape,
    marker: char,
}

impl ParameterGridBuilder {
    pub fn new(tree_type: TreeType, shape: GridShape) -> Self {
        Self {
            tree_type,
            shape,
            marker: DEFAULT_SKIP_MARKER,
        }
    }

    /// Marker reported in skip notices; must match the one axes were parsed with
    pub fn with_marker(mut self, marker: char) -> Self {
        self.marker = marker;
        self
    }

    /// Enumerate the grid. Outer axis first, inner axis nested.
    pub fn build(&self) -> Vec<GridEntry> {
        let entries = match &self.shape {
            GridShape::BatchSweep {
                arities,
                num_leaves,
            } => self.build_batch_sweep(arities, *num_leaves),
            GridShape::LeafGrid {
                leaf_counts,
                arities,
                num_updates,
            } => self.build_leaf_grid(leaf_counts, arities, *num_updates),
        };
        debug!(
            points = entries.len(),
            runs = entries
                .iter()
                .filter(|e| matches!(e, GridEntry::Run(_)))
                .count(),
            "Grid built"
        );
        entries
    }

    fn build_batch_sweep(&self, arities: &[AxisEntry], num_leaves: u64) -> Vec<GridEntry> {
        let series = batch_series();
        let mut entries = Vec::with_capacity(arities.len() * series.len());
        for arity in arities {
            match arity {
                AxisEntry::Skipped(value) => entries.push(self.skip(Axis::Arity, value)),
                AxisEntry::Active(arity) => {
                    for &batch_size in &series {
                        entries.push(GridEntry::Run(self.spec(*arity, num_leaves, batch_size)));
                    }
                }
            }
        }
        entries
    }

    fn build_leaf_grid(
        &self,
        leaf_counts: &[AxisEntry],
        arities: &[AxisEntry],
        num_updates: u64,
    ) -> Vec<GridEntry> {
        let mut entries = Vec::with_capacity(leaf_counts.len() * arities.len());
        for leaves in leaf_counts {
            let num_leaves = match leaves {
                AxisEntry::Skipped(value) => {
                    entries.push(self.skip(Axis::NumLeaves, value));
                    continue;
                }
                AxisEntry::Active(n) => *n,
            };
            for arity in arities {
                entries.push(match arity {
                    AxisEntry::Skipped(value) => self.skip(Axis::Arity, value),
                    AxisEntry::Active(arity) => {
                        GridEntry::Run(self.spec(*arity, num_leaves, num_updates))
                    }
                });
            }
        }
        entries
    }

    fn spec(&self, arity: u64, num_leaves: u64, batch_size: u64) -> BenchmarkSpec {
        BenchmarkSpec {
            tree_type: self.tree_type.clone(),
            arity,
            num_leaves,
            batch_size,
        }
    }

    fn skip(&self, axis: Axis, value: &str) -> GridEntry {
        GridEntry::Skip(SkipDirective {
            axis,
            value: value.to_string(),
            marker: self.marker,
        })
    }
}
