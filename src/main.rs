use std::io::{self, BufWriter, Write};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use vmsim::{cli::Args, SimulationEngine, Trace};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    tracing::debug!(?args, "Parsed arguments");

    let engine = SimulationEngine::new(args.options()?)?;
    let trace = Trace::open(&args.trace_file, engine.options().page_size)?;

    // Per-access lines stay buffered until the run has succeeded, so a
    // malformed trace leaves nothing on stdout.
    let mut lines = Vec::new();
    let report = engine.run(&trace, |_, _, outcome| {
        if !args.quiet {
            lines.push(outcome);
        }
    })?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for outcome in lines {
        writeln!(out, "{outcome}").context("failed to write access log")?;
    }
    report
        .write_to(&mut out)
        .context("failed to write summary")?;
    out.flush().context("failed to flush stdout")?;

    Ok(())
}
