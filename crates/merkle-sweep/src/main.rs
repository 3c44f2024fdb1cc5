use anyhow::{Context, Result};
use clap::Parser;
use merkle_sweep::{usage_error, Cli, SweepConfig};
use tracing::{debug, info};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Usage errors exit with 1, not clap's default of 2
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match usage_error(&e) {
            Some(err) => {
                eprint!("{err}");
                std::process::exit(1);
            }
            None => e.exit(),
        },
    };

    let config = SweepConfig::load(cli.config.as_deref())
        .context("Failed to load sweep configuration")?
        .with_bench_bin(cli.bench_bin.clone());

    let plan = cli
        .command
        .plan(&config)
        .with_context(|| format!("Invalid arguments for {}", cli.command.mode()))?;

    info!(mode = %plan.mode, tree = %plan.tree_type, "Merkle sweep starting");

    let report = plan
        .execute(&mut std::io::stdout())
        .with_context(|| format!("{} aborted", plan.mode))?;

    debug!(
        succeeded = report.succeeded,
        failed = report.failed,
        skipped = report.skipped,
        "Sweep complete"
    );

    Ok(())
}
