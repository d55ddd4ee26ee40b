//! Command-line interface of the `rmat` binary.
//!
//! `rmat <OUTPUT> <SCALE>` writes a Graph500-style R-MAT graph with `2^SCALE`
//! vertices to `OUTPUT`. Every parameter is validated before the output file
//! is created.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::{field, info, instrument, warn, Span};

use crate::edge_list::save_edge_list;
use crate::error::GraphError;
use crate::params::{GraphSize, RMatParams, DEFAULT_EDGE_FACTOR, GRAPH500_A, GRAPH500_B, GRAPH500_C};
use crate::random::{default_rng, RngSource};
use crate::rmat::{validate_peers, RMatGenerator};
use crate::summary::GraphSummary;
use crate::SubEventTimer;

pub const DEFAULT_SEED: u64 = 10;

/// Options accepted by `rmat`.
#[derive(Debug, Parser, Clone)]
#[command(
    name = "rmat",
    about = "Generate an R-MAT graph and write it as an edge list.",
    allow_negative_numbers = true
)]
pub struct Cli {
    /// File the edge list is written to.
    pub output: PathBuf,

    /// The graph has 2^SCALE vertices.
    pub scale: u32,

    /// Edges per vertex before the cap of nnodes * (nnodes - 1) / 2.
    #[arg(long, default_value_t = DEFAULT_EDGE_FACTOR)]
    pub edgefactor: u64,

    /// Probability of the top-left quadrant.
    #[arg(short = 'a', default_value_t = GRAPH500_A)]
    pub a: f64,

    /// Probability of the top-right quadrant.
    #[arg(short = 'b', default_value_t = GRAPH500_B)]
    pub b: f64,

    /// Probability of the bottom-left quadrant; the bottom-right one gets the rest.
    #[arg(short = 'c', default_value_t = GRAPH500_C)]
    pub c: f64,

    /// Seed of the ChaCha8 random stream.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Partitions, each drawn from its own sub-stream of the seed (at most 1024).
    #[arg(long, default_value_t = 1)]
    pub workers: usize,

    /// Reject self-loops and duplicate edges.
    #[arg(long)]
    pub simple: bool,

    /// Log summary statistics of the generated graph.
    #[arg(long)]
    pub summary: bool,
}

/// Outcome of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub output: PathBuf,
    pub nnodes: u64,
    pub nedges: u64,
    pub summary: Option<GraphSummary>,
}

/// Generates the graph described by `cli` and writes it to `cli.output`.
///
/// # Errors
/// Returns [`GraphError::InvalidParameter`] for rejected parameters (before
/// anything is written), [`GraphError::Io`] when the output cannot be written
/// and any generation error of the selected mode.
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(output = %cli.output.display(), scale = cli.scale, mode = field::Empty)
)]
pub fn run_cli(cli: &Cli) -> Result<GenerationReport, GraphError> {
    let size = GraphSize::new(cli.scale, cli.edgefactor)?;
    let params = RMatParams::from_abc(cli.a, cli.b, cli.c)?;
    validate_mode(cli, &size)?;

    let generator = RMatGenerator::from_size(&size, params);
    if generator.nedges() == 0 {
        warn!(
            scale = cli.scale,
            "graph has no edges; writing an empty edge list"
        );
    }
    info!(
        nnodes = generator.nnodes(),
        nedges = generator.nedges(),
        a = params.a(),
        b = params.b(),
        c = params.c(),
        d = params.d(),
        seed = cli.seed,
        "generating R-MAT graph"
    );

    let timer = SubEventTimer::new_timer();
    let span = Span::current();
    let (written, summary) = if cli.simple || cli.workers > 1 || cli.summary {
        let edges = if cli.simple {
            span.record("mode", "simple");
            timer.time_subevent("generate", || {
                generator.generate_simple(RngSource::new(default_rng(cli.seed)))
            })?
        } else {
            span.record("mode", "partitioned");
            timer.time_subevent("generate", || {
                generator.generate_partitioned(cli.seed, cli.workers)
            })?
        };
        let written = timer.time_subevent("write", || {
            save_edge_list(&cli.output, edges.iter().copied())
        })?;
        let summary = if cli.summary {
            let summary = timer.time_subevent("summary", || {
                GraphSummary::from_edges(generator.nnodes(), &edges)
            })?;
            info!(
                distinct_edges = summary.distinct_edges,
                self_loops = summary.self_loops,
                max_out_degree = summary.max_out_degree,
                max_in_degree = summary.max_in_degree,
                weak_components = summary.weak_components,
                "graph summary"
            );
            Some(summary)
        } else {
            None
        };
        (written, summary)
    } else {
        span.record("mode", "streaming");
        let written = timer.time_subevent("generate and write", || {
            save_edge_list(
                &cli.output,
                generator.edges(RngSource::new(default_rng(cli.seed))),
            )
        })?;
        (written, None)
    };

    info!(
        output = %cli.output.display(),
        edges = written,
        elapsed = ?timer.elapsed(),
        "edge list written"
    );
    Ok(GenerationReport {
        output: cli.output.clone(),
        nnodes: generator.nnodes(),
        nedges: written,
        summary,
    })
}

fn validate_mode(cli: &Cli, size: &GraphSize) -> Result<(), GraphError> {
    validate_peers(cli.workers)?;
    if cli.simple && cli.workers > 1 {
        return Err(GraphError::invalid(
            "workers",
            "simple graphs are generated by a single worker",
        ));
    }
    if cli.summary && size.nnodes() >= u64::from(u32::MAX) {
        return Err(GraphError::GraphTooLarge {
            nodes: size.nnodes(),
        });
    }
    Ok(())
}

/// Renders `report` to `writer` as plain text.
///
/// # Errors
/// Returns [`io::Error`] if writing fails.
pub fn render_report(report: &GenerationReport, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "output: {}", report.output.display())?;
    writeln!(writer, "nodes: {}", report.nnodes)?;
    writeln!(writer, "edges written: {}", report.nedges)?;
    if let Some(summary) = &report.summary {
        writeln!(writer, "{summary}")?;
    }
    Ok(())
}
