//! Loads an edge list and prints its summary statistics.
//!
//! Usage: `edge_list_stats <FILE> [--nodes N]`. Without `--nodes` the vertex
//! count is one past the largest endpoint in the file.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use graph_utility::edge_list::GraphLoader;
use graph_utility::logging::{self, LoggingError};
use graph_utility::summary::{num_nodes_from_edge_list, GraphSummary};
use graph_utility::SubEventTimer;

#[derive(Debug, Parser)]
#[command(name = "edge_list_stats", about = "Print summary statistics of an edge list.")]
struct Args {
    /// Edge-list file, one `src dst` pair per line.
    path: PathBuf,

    /// Vertex count, e.g. 2^scale for generated graphs.
    #[arg(long)]
    nodes: Option<u64>,
}

fn try_main() -> Result<()> {
    let args = Args::parse();
    let timer = SubEventTimer::new_timer();

    let edges = timer
        .time_subevent("load", || GraphLoader::default().load_edge_list(&args.path))
        .with_context(|| format!("failed to load `{}`", args.path.display()))?;
    let nodes = args
        .nodes
        .unwrap_or_else(|| num_nodes_from_edge_list(&edges));
    info!(nodes, edges = edges.len(), "edge list loaded");

    let summary = timer
        .time_subevent("summary", || GraphSummary::from_edges(nodes, &edges))
        .context("failed to summarise graph")?;

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    writeln!(writer, "{summary}").context("failed to render summary")?;
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
