use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use keymatch_cli::{run, Args};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("KEYMATCH_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();

    let rendered = run(&args, io::stdin().lock())?;
    io::stdout()
        .lock()
        .write_all(rendered.as_bytes())
        .context("failed to write output")?;
    Ok(())
}
