//! Summary statistics of an edge list, computed with petgraph.

use std::collections::HashSet;
use std::fmt;

use petgraph::algo::connected_components;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use tracing::instrument;

use crate::error::GraphError;
use crate::UnweightedEdge;

/// Shape of a directed multigraph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphSummary {
    pub nodes: u64,
    pub edges: u64,
    pub self_loops: u64,
    pub distinct_edges: u64,
    pub max_out_degree: u64,
    pub max_in_degree: u64,
    /// Components when edge direction is ignored; isolated vertices count.
    pub weak_components: u64,
}

impl GraphSummary {
    /// Summarises `edges` over the vertex set `[0, nnodes)`.
    ///
    /// # Errors
    /// Returns [`GraphError::GraphTooLarge`] if `nnodes` does not fit petgraph's
    /// 32-bit indices and [`GraphError::InvalidParameter`] if an endpoint is
    /// not below `nnodes`.
    #[instrument(level = "debug", skip(edges), err, fields(edges = edges.len()))]
    pub fn from_edges(nnodes: u64, edges: &[UnweightedEdge]) -> Result<GraphSummary, GraphError> {
        if nnodes >= u64::from(u32::MAX) {
            return Err(GraphError::GraphTooLarge { nodes: nnodes });
        }
        if let Some(&(src, dst)) = edges.iter().find(|(src, dst)| *src >= nnodes || *dst >= nnodes) {
            return Err(GraphError::invalid(
                "edges",
                format!("edge ({src}, {dst}) lies outside [0, {nnodes})"),
            ));
        }

        // Bounded by the u32 check above.
        let node_count = nnodes as usize;
        let mut graph = DiGraph::<(), ()>::with_capacity(node_count, edges.len());
        for _ in 0..node_count {
            graph.add_node(());
        }
        for &(src, dst) in edges {
            graph.add_edge(NodeIndex::new(src as usize), NodeIndex::new(dst as usize), ());
        }

        let max_degree = |direction: Direction| {
            graph
                .node_indices()
                .map(|node| graph.edges_directed(node, direction).count() as u64)
                .max()
                .unwrap_or(0)
        };
        let distinct: HashSet<&UnweightedEdge> = edges.iter().collect();

        Ok(GraphSummary {
            nodes: nnodes,
            edges: edges.len() as u64,
            self_loops: edges.iter().filter(|(src, dst)| src == dst).count() as u64,
            distinct_edges: distinct.len() as u64,
            max_out_degree: max_degree(Direction::Outgoing),
            max_in_degree: max_degree(Direction::Incoming),
            weak_components: connected_components(&graph) as u64,
        })
    }
}

impl fmt::Display for GraphSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "nodes: {}", self.nodes)?;
        writeln!(f, "edges: {}", self.edges)?;
        writeln!(f, "distinct edges: {}", self.distinct_edges)?;
        writeln!(f, "self loops: {}", self.self_loops)?;
        writeln!(f, "max out degree: {}", self.max_out_degree)?;
        writeln!(f, "max in degree: {}", self.max_in_degree)?;
        write!(f, "weak components: {}", self.weak_components)
    }
}

/// Smallest vertex count covering every endpoint in `edges`.
pub fn num_nodes_from_edge_list(edges: &[UnweightedEdge]) -> u64 {
    edges
        .iter()
        .map(|&(from, to)| from.max(to) + 1)
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarises_small_multigraph() {
        let edges = vec![(0, 1), (0, 1), (1, 1), (2, 0), (0, 2)];
        let summary = GraphSummary::from_edges(5, &edges).expect("valid graph");
        assert_eq!(
            summary,
            GraphSummary {
                nodes: 5,
                edges: 5,
                self_loops: 1,
                distinct_edges: 4,
                max_out_degree: 3,
                max_in_degree: 3,
                weak_components: 3,
            }
        );
    }

    #[test]
    fn empty_graph_has_one_component_per_node() {
        let summary = GraphSummary::from_edges(4, &[]).expect("valid graph");
        assert_eq!(summary.edges, 0);
        assert_eq!(summary.max_out_degree, 0);
        assert_eq!(summary.weak_components, 4);
    }

    #[test]
    fn endpoint_out_of_range_is_rejected() {
        let err = GraphSummary::from_edges(2, &[(0, 2)]).expect_err("2 is not a vertex");
        assert!(matches!(
            err,
            GraphError::InvalidParameter { parameter: "edges", .. }
        ));
    }

    #[test]
    fn oversized_graph_is_rejected() {
        let err = GraphSummary::from_edges(1 << 40, &[]).expect_err("too many nodes");
        assert!(matches!(err, GraphError::GraphTooLarge { nodes } if nodes == 1 << 40));
    }

    #[test]
    fn node_count_covers_largest_endpoint() {
        assert_eq!(num_nodes_from_edge_list(&[]), 0);
        assert_eq!(num_nodes_from_edge_list(&[(0, 0)]), 1);
        assert_eq!(num_nodes_from_edge_list(&[(3, 9), (12, 1)]), 13);
    }

    #[test]
    fn display_lists_every_statistic() {
        let summary = GraphSummary::from_edges(2, &[(0, 1)]).expect("valid graph");
        let rendered = summary.to_string();
        assert_eq!(rendered.lines().count(), 7);
        assert!(rendered.contains("weak components: 1"));
    }
}
