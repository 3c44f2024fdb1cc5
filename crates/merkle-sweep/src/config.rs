//! Sweep configuration: built-in defaults, environment, optional TOML file.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use sweep_harness::grid::{DEFAULT_GRID_ARITIES, DEFAULT_LEAF_COUNTS};
use sweep_harness::{
    SweepError, SweepResult, DEFAULT_BATCH_NUM_LEAVES, DEFAULT_NUM_UPDATES, DEFAULT_SKIP_MARKER,
};
use tracing::warn;

/// Benchmark executable used when nothing else is configured.
pub const DEFAULT_BENCH_BIN: &str = "target/release/merkle-race";

/// Sweep settings shared by every harness mode.
///
/// Defaults come from the environment (`MERKLE_SWEEP_BIN`,
/// `MERKLE_SWEEP_SKIP_MARKER`); a TOML file and CLI flags override them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
    /// Path of the tree benchmark executable
    pub bench_bin: PathBuf,
    /// Leading character that disables an axis value
    pub skip_marker: char,
    /// Fixed leaf count for `sweep-batch`
    pub batch_num_leaves: u64,
    /// Batch size for `sweep-grid` and the default for `sweep-grid-file`
    pub grid_num_updates: u64,
    /// Outer axis of the leaf-count grid; entries may carry the skip marker
    pub grid_leaf_counts: Vec<String>,
    /// Inner axis of the leaf-count grid
    pub grid_arities: Vec<String>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            bench_bin: std::env::var_os("MERKLE_SWEEP_BIN")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_BENCH_BIN)),
            skip_marker: Self::marker_from_env(),
            batch_num_leaves: DEFAULT_BATCH_NUM_LEAVES,
            grid_num_updates: DEFAULT_NUM_UPDATES,
            grid_leaf_counts: DEFAULT_LEAF_COUNTS.iter().map(u64::to_string).collect(),
            grid_arities: DEFAULT_GRID_ARITIES.iter().map(u64::to_string).collect(),
        }
    }
}

impl SweepConfig {
    fn marker_from_env() -> char {
        let Ok(raw) = std::env::var("MERKLE_SWEEP_SKIP_MARKER") else {
            return DEFAULT_SKIP_MARKER;
        };
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(marker), None) if check_marker(marker).is_ok() => marker,
            _ => {
                warn!(
                    value = %raw,
                    "MERKLE_SWEEP_SKIP_MARKER must be one non-digit, non-space character, using '#'"
                );
                DEFAULT_SKIP_MARKER
            }
        }
    }

    /// Defaults, overlaid with the TOML file at `path` when given.
    /// Both sources go through the same validation.
    pub fn load(path: Option<&Path>) -> SweepResult<Self> {
        let Some(path) = path else {
            let config = Self::default();
            config.validate().map_err(|message| SweepError::ConfigFile {
                path: PathBuf::from("<environment>"),
                message,
            })?;
            return Ok(config);
        };
        let text = std::fs::read_to_string(path).map_err(|e| SweepError::ConfigFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text).map_err(|message| SweepError::ConfigFile {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn from_toml_str(text: &str) -> Result<Self, String> {
        let config: Self = toml::from_str(text).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        check_marker(self.skip_marker)?;
        if self.batch_num_leaves == 0 {
            return Err("batch_num_leaves must be positive".to_string());
        }
        if self.grid_num_updates == 0 {
            return Err("grid_num_updates must be positive".to_string());
        }
        Ok(())
    }

    /// Apply the `--bench-bin` flag
    pub fn with_bench_bin(mut self, bench_bin: Option<PathBuf>) -> Self {
        if let Some(bin) = bench_bin {
            self.bench_bin = bin;
        }
        self
    }
}

/// Axis values start with digits, so a digit (or blank) marker would
/// silently skip real values.
fn check_marker(marker: char) -> Result<(), String> {
    if marker.is_whitespace() || marker.is_ascii_digit() {
        return Err(format!(
            "skip_marker '{marker}' would be ambiguous with axis values"
        ));
    }
    Ok(())
}
