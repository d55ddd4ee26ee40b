//! End-to-end checks of the generator through the public API.

use graph_utility::cli::{run_cli, Cli};
use graph_utility::edge_list::{save_edge_list, GraphLoader};
use graph_utility::params::DEFAULT_EDGE_FACTOR;
use graph_utility::summary::GraphSummary;
use graph_utility::{default_rng, GraphError, GraphSize, RMatGenerator, RMatParams, RngSource};

use clap::Parser;
use rstest::rstest;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn graph500(scale: u32) -> Result<RMatGenerator, GraphError> {
    let size = GraphSize::new(scale, DEFAULT_EDGE_FACTOR)?;
    Ok(RMatGenerator::from_size(&size, RMatParams::graph500()))
}

#[rstest]
#[case(0, 0)]
#[case(1, 1)]
#[case(2, 6)]
#[case(3, 28)]
#[case(12, 65_536)]
fn generated_edge_count_matches_derivation(#[case] scale: u32, #[case] expected: usize) -> TestResult {
    let generator = graph500(scale)?;
    let edges = generator.generate(RngSource::new(default_rng(10)));
    assert_eq!(edges.len(), expected);
    let nnodes = 1u64 << scale;
    assert!(edges.iter().all(|&(src, dst)| src < nnodes && dst < nnodes));
    Ok(())
}

#[test]
fn identical_seeds_write_identical_files() -> TestResult {
    let dir = TempDir::new()?;
    let first = dir.path().join("first.txt");
    let second = dir.path().join("second.txt");
    for path in [&first, &second] {
        let cli = Cli::try_parse_from([
            "rmat",
            path.to_str().ok_or("non UTF-8 temp path")?,
            "8",
            "--seed",
            "42",
        ])?;
        run_cli(&cli)?;
    }
    assert_eq!(std::fs::read(&first)?, std::fs::read(&second)?);
    Ok(())
}

#[test]
fn output_lines_are_two_indices() -> TestResult {
    let dir = TempDir::new()?;
    let path = dir.path().join("graph.txt");
    let generator = graph500(6)?;
    save_edge_list(&path, generator.edges(RngSource::new(default_rng(1))))?;
    let text = std::fs::read_to_string(&path)?;
    assert_eq!(text.lines().count() as u64, generator.nedges());
    for line in text.lines() {
        let fields: Vec<u64> = line
            .split(' ')
            .map(str::parse::<u64>)
            .collect::<Result<_, _>>()?;
        assert_eq!(fields.len(), 2);
        assert!(fields.iter().all(|&node| node < 64));
    }
    Ok(())
}

#[test]
fn skewed_probabilities_concentrate_degree() -> TestResult {
    let generator = graph500(10)?;
    let edges = generator.generate(RngSource::new(default_rng(10)));
    let summary = GraphSummary::from_edges(generator.nnodes(), &edges)?;
    // The a quadrant makes vertex 0 a hub far above the average degree of 16.
    assert!(summary.max_out_degree > 4 * DEFAULT_EDGE_FACTOR);
    assert!(summary.distinct_edges < summary.edges);
    Ok(())
}

#[test]
fn partitioned_file_loads_back_in_order() -> TestResult {
    let dir = TempDir::new()?;
    let path = dir.path().join("graph.txt");
    let generator = graph500(7)?;
    let edges = generator.generate_partitioned(5, 3)?;
    save_edge_list(&path, edges.iter().copied())?;
    assert_eq!(GraphLoader::default().load_edge_list(&path)?, edges);
    Ok(())
}

#[test]
fn probabilities_summing_above_one_fail_before_generation() {
    let err = RMatParams::new(0.57, 0.19, 0.19, 0.15).expect_err("sums to 1.1");
    assert!(matches!(err, GraphError::InvalidParameter { .. }));
}
