//! Benchmark executable wrapper
//!
//! Runs the external tree benchmark once per grid point and captures its
//! combined output. Nothing here is fatal: spawn failures and nonzero exits
//! come back as an unsuccessful [`RunOutput`].

use crate::run::RunOutput;
use crate::types::BenchmarkSpec;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// How grid-point fields are spelled on the executable's command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagStyle {
    /// `-t=<type> --arity=<n> -l=<n> -u=<n>`
    Equals,
    /// `-t=<type> -a <n> -l <n> -u <n>`
    Spaced,
}

impl FlagStyle {
    /// Argument list for one grid point
    pub fn args(&self, spec: &BenchmarkSpec) -> Vec<String> {
        let tree = format!("-t={}", spec.tree_type);
        match self {
            Self::Equals => vec![
                tree,
                format!("--arity={}", spec.arity),
                format!("-l={}", spec.num_leaves),
                format!("-u={}", spec.batch_size),
            ],
            Self::Spaced => vec![
                tree,
                "-a".to_string(),
                spec.arity.to_string(),
                "-l".to_string(),
                spec.num_leaves.to_string(),
                "-u".to_string(),
                spec.batch_size.to_string(),
            ],
        }
    }
}

/// Runs one grid point to completion.
pub trait BenchmarkInvoker {
    fn invoke(&self, spec: &BenchmarkSpec) -> RunOutput;
}

/// Invoker that spawns the benchmark executable as a child process.
///
/// Blocks until the child exits; there is no timeout.
#[derive(Debug, Clone)]
pub struct ProcessInvoker {
    program: PathBuf,
    style: FlagStyle,
}

impl ProcessInvoker {
    pub fn new(program: impl AsRef<Path>, style: FlagStyle) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            style,
        }
    }

    /// Human-readable command line, for logs
    pub fn command_line(&self, spec: &BenchmarkSpec) -> String {
        let mut line = self.program.display().to_string();
        for arg in self.style.args(spec) {
            line.push(' ');
            line.push_str(&arg);
        }
        line
    }
}

impl BenchmarkInvoker for ProcessInvoker {
    fn invoke(&self, spec: &BenchmarkSpec) -> RunOutput {
        debug!(command = %self.command_line(spec), "Spawning benchmark");

        let mut command = Command::new(&self.program);
        command.args(self.style.args(spec));

        match command.output() {
            Ok(output) => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                let stderr = String::from_utf8_lossy(&output.stderr);

                RunOutput {
                    success: output.status.success(),
                    exit_code: output.status.code(),
                    raw_output: format!("{stdout}{stderr}"),
                }
            }
            Err(e) => RunOutput {
                success: false,
                exit_code: None,
                raw_output: format!("failed to spawn {}: {}", self.program.display(), e),
            },
        }
    }
}
