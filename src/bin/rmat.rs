//! Generates an R-MAT graph and writes it as an edge list.
//!
//! Usage: `rmat <OUTPUT> <SCALE> [--edgefactor N] [-a A -b B -c C] [--seed S]
//! [--workers W] [--simple] [--summary]`. The graph has `2^SCALE` vertices and
//! `min(2^SCALE * edgefactor, 2^SCALE * (2^SCALE - 1) / 2)` edges.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;

use graph_utility::cli::{render_report, run_cli, Cli};
use graph_utility::logging::{self, LoggingError};

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let report = run_cli(&cli).context("failed to generate graph")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_report(&report, &mut writer).context("failed to render report")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let message = format!("{err:#}");
        error!(error = %message, "command execution failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
