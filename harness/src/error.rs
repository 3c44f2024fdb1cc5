//! Sweep error types
//!
//! Only configuration problems and output failures are errors. A benchmark
//! run that exits nonzero is reported through [`crate::run::RunResult`], and a
//! metric that is missing from the output is simply `None`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for sweep operations
pub type SweepResult<T> = Result<T, SweepError>;

/// Errors that can occur while configuring or running a sweep
#[derive(Error, Debug)]
pub enum SweepError {
    /// Not enough positional arguments for the selected mode
    #[error("{usage}")]
    MissingArguments { usage: String },

    /// Arguments present but unusable (unknown flag, bad value, extra argument)
    #[error("{usage}")]
    InvalidArguments { usage: String },

    /// A grid axis value could not be parsed
    #[error("invalid {axis} value '{value}': {reason}")]
    InvalidAxisValue {
        axis: String,
        value: String,
        reason: String,
    },

    /// Tree type name rejected before any run
    #[error("invalid tree type '{value}'")]
    InvalidTreeType { value: String },

    /// Output file could not be created or opened for append
    #[error("cannot open output file {path} for append: {source}")]
    OutputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be read or parsed
    #[error("config file {path}: {message}")]
    ConfigFile { path: PathBuf, message: String },

    /// A CSV line could not be appended mid-sweep
    #[error("failed to write result row: {0}")]
    SinkWrite(#[from] csv::Error),

    /// IO error on the status stream
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SweepError {
    /// Build an invalid-axis error
    pub fn invalid_axis(
        axis: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidAxisValue {
            axis: axis.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error belongs to the fatal configuration family,
    /// raised before any grid point is processed.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::MissingArguments { .. }
                | Self::InvalidArguments { .. }
                | Self::InvalidAxisValue { .. }
                | Self::InvalidTreeType { .. }
                | Self::OutputUnavailable { .. }
                | Self::ConfigFile { .. }
        )
    }
}
