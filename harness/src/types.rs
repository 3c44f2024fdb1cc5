//! Core sweep types: tree type, grid point, grid axes and harness modes.

use crate::error::{SweepError, SweepResult};
use crate::invoker::FlagStyle;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tree engine names the benchmark executable is known to accept
pub const KNOWN_TREE_TYPES: &[&str] = &["merkle_sha3", "merkle++", "verkle"];

/// Name of the tree implementation passed through to the executable's `-t` flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TreeType(String);

impl TreeType {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the executable is known to implement this tree type
    pub fn is_known(&self) -> bool {
        KNOWN_TREE_TYPES.contains(&self.0.as_str())
    }
}

impl FromStr for TreeType {
    type Err = SweepError;

    fn from_str(s: &str) -> SweepResult<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return Err(SweepError::InvalidTreeType {
                value: s.to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl TryFrom<String> for TreeType {
    type Error = SweepError;

    fn try_from(value: String) -> SweepResult<Self> {
        value.parse()
    }
}

impl From<TreeType> for String {
    fn from(value: TreeType) -> Self {
        value.0
    }
}

impl fmt::Display for TreeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One grid point to benchmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkSpec {
    pub tree_type: TreeType,
    /// Children per internal node
    pub arity: u64,
    pub num_leaves: u64,
    /// Leaf updates applied in the measured operation (a.k.a. num_updates)
    pub batch_size: u64,
}

/// A grid axis, used to label skip notices and parse errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Arity,
    NumLeaves,
    BatchSize,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arity => write!(f, "arity"),
            Self::NumLeaves => write!(f, "num_leaves"),
            Self::BatchSize => write!(f, "batch_size"),
        }
    }
}

/// The three command surfaces. They share semantics but differ in CSV header
/// naming and in how flags are spelled for the executable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HarnessMode {
    /// Powers-of-two batch sizes per arity, written to a file
    SweepBatch,
    /// Leaf-count x arity grid, rows on stdout
    SweepGrid,
    /// Leaf-count x arity grid, rows appended to a file
    SweepGridFile,
}

impl HarnessMode {
    /// Verbatim CSV header line for this mode
    pub fn csv_header(&self) -> [&'static str; 7] {
        [
            "type",
            "arity",
            "num_leaves",
            self.batch_column(),
            "upds_per_sec",
            "hashes_per_sec",
            "num_hashes",
        ]
    }

    /// Column name for the batch-size field
    pub fn batch_column(&self) -> &'static str {
        match self {
            Self::SweepBatch => "batch_size",
            Self::SweepGrid | Self::SweepGridFile => "num_updates",
        }
    }

    /// Flag spelling expected by the executable in this mode
    pub fn flag_style(&self) -> FlagStyle {
        match self {
            Self::SweepBatch => FlagStyle::Equals,
            Self::SweepGrid | Self::SweepGridFile => FlagStyle::Spaced,
        }
    }
}

impl fmt::Display for HarnessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SweepBatch => write!(f, "sweep-batch"),
            Self::SweepGrid => write!(f, "sweep-grid"),
            Self::SweepGridFile => write!(f, "sweep-grid-file"),
        }
    }
}
