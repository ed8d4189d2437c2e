use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bh_cli::commands::{classify, selftest, util};
use bh_cli::{Cli, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr; stdout carries the result
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let mut stdout = std::io::stdout().lock();

    if cli.test {
        selftest::run(&mut stdout)?;
        return Ok(());
    }

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    let classifier = config
        .classifier()
        .context("invalid classifier configuration")?;

    let entries = util::read_schedule(cli.schedule.as_deref(), cli.file.as_deref())?;
    classify::run(&mut stdout, &entries, &classifier, cli.output())?;

    Ok(())
}
