use adif2cabrillo::Config;
use anyhow::{Context, Result};
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let args = cli::Args::parse();

    let cfg = Config::load(&args.config)
        .with_context(|| format!("cannot load configuration {}", args.config.display()))?;
    cli::init_tracing(&cfg.logging, args.log_level.as_deref())?;

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "adif2cabrillo starting");

    cli::run(&args, &cfg)
}
