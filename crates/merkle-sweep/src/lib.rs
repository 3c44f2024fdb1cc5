//! Command-line driver for Merkle/Verkle benchmark sweeps.
//!
//! Argument parsing and configuration live here; the sweep machinery is in
//! `sweep_harness`.

pub mod cli;
pub mod config;
pub mod plan;

pub use cli::{usage_error, Cli, SweepCommand};
pub use config::SweepConfig;
pub use plan::SweepPlan;
