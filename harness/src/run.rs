//! Per-invocation results.

use crate::extract::{MetricExtractor, Metrics};
use serde::{Deserialize, Serialize};

/// What came back from one invocation, before any parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutput {
    /// Exit status zero
    pub success: bool,
    /// Exit code if the process exited normally
    pub exit_code: Option<i32>,
    /// Stdout followed by stderr, or the spawn error text
    pub raw_output: String,
}

impl RunOutput {
    /// Short reason for a failed run, used in the failure banner
    pub fn failure_reason(&self) -> String {
        match self.exit_code {
            Some(code) => format!("exit status {code}"),
            None if self.raw_output.starts_with("failed to spawn") => "spawn error".to_string(),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Outcome of one grid point. Metrics are only populated for successful runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    pub upds_per_sec: Option<u64>,
    pub hashes_per_sec: Option<u64>,
    pub num_hashes: Option<u64>,
    pub exponentiation_time: Option<String>,
    pub raw_output: String,
    pub success: bool,
    pub exit_code: Option<i32>,
}

impl RunResult {
    /// Build the result for an invocation, extracting metrics on success.
    pub fn from_output(output: RunOutput, extractor: &MetricExtractor) -> Self {
        let metrics = if output.success {
            extractor.extract(&output.raw_output)
        } else {
            Metrics::default()
        };

        Self {
            upds_per_sec: metrics.upds_per_sec,
            hashes_per_sec: metrics.hashes_per_sec,
            num_hashes: metrics.num_hashes,
            exponentiation_time: metrics.exponentiation_time,
            raw_output: output.raw_output,
            success: output.success,
            exit_code: output.exit_code,
        }
    }

    pub fn metrics(&self) -> Metrics {
        Metrics {
            upds_per_sec: self.upds_per_sec,
            hashes_per_sec: self.hashes_per_sec,
            num_hashes: self.num_hashes,
            exponentiation_time: self.exponentiation_time.clone(),
        }
    }
}
