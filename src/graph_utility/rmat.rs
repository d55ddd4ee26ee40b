//! Recursive MATrix (R-MAT) edge generation.
//!
//! Each edge is placed by descending `log2(nnodes)` levels of the adjacency
//! matrix. At every level one uniform draw picks a quadrant according to the
//! cumulative thresholds of [`RMatParams`], and the active row and column
//! ranges are halved, until a single cell `(src, dst)` remains.

use std::collections::HashSet;

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::error::GraphError;
use crate::params::{GraphSize, RMatParams};
use crate::random::{stream_rng, RandomSource, RngSource};
use crate::{Node, UnweightedEdge};

/// Draw budget per requested edge in simple-graph mode.
pub const SIMPLE_ATTEMPT_FACTOR: u64 = 32;
/// Lower bound on the simple-graph draw budget, so tiny graphs get a fair chance.
pub const SIMPLE_MIN_ATTEMPTS: u64 = 1024;
/// Upper bound on the number of partitions of [`RMatGenerator::generate_partitioned`].
pub const MAX_WORKERS: usize = 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    fn select(draw: f64, thresholds: &[f64; 3]) -> Quadrant {
        if draw < thresholds[0] {
            Quadrant::TopLeft
        } else if draw < thresholds[1] {
            Quadrant::TopRight
        } else if draw < thresholds[2] {
            Quadrant::BottomLeft
        } else {
            Quadrant::BottomRight
        }
    }
}

/// Generator for R-MAT graphs over `nnodes` vertices.
#[derive(Clone, Debug)]
pub struct RMatGenerator {
    nnodes: u64,
    nedges: u64,
    levels: u32,
    params: RMatParams,
    thresholds: [f64; 3],
}

impl RMatGenerator {
    /// # Errors
    /// Returns [`GraphError::InvalidParameter`] if `nnodes` is not a power of
    /// two. Probabilities are validated when the [`RMatParams`] is built.
    pub fn new(nnodes: u64, nedges: u64, params: RMatParams) -> Result<RMatGenerator, GraphError> {
        if !nnodes.is_power_of_two() {
            return Err(GraphError::invalid(
                "nnodes",
                format!("{nnodes} is not a power of two"),
            ));
        }
        Ok(RMatGenerator {
            nnodes,
            nedges,
            levels: nnodes.trailing_zeros(),
            params,
            thresholds: params.thresholds(),
        })
    }

    /// Generator for the node and edge counts derived from `size`.
    pub fn from_size(size: &GraphSize, params: RMatParams) -> RMatGenerator {
        RMatGenerator {
            nnodes: size.nnodes(),
            nedges: size.nedges(),
            levels: size.scale(),
            params,
            thresholds: params.thresholds(),
        }
    }

    pub fn nnodes(&self) -> u64 {
        self.nnodes
    }

    pub fn nedges(&self) -> u64 {
        self.nedges
    }

    pub fn params(&self) -> &RMatParams {
        &self.params
    }

    /// Places one edge, consuming exactly `log2(nnodes)` draws.
    pub fn generate_edge<R: RandomSource + ?Sized>(&self, rng: &mut R) -> UnweightedEdge {
        let mut src: Node = 0;
        let mut dst: Node = 0;
        let mut half = self.nnodes;
        for _ in 0..self.levels {
            half >>= 1;
            match Quadrant::select(rng.next_uniform(), &self.thresholds) {
                Quadrant::TopLeft => {}
                Quadrant::TopRight => dst += half,
                Quadrant::BottomLeft => src += half,
                Quadrant::BottomRight => {
                    src += half;
                    dst += half;
                }
            }
        }
        (src, dst)
    }

    /// Lazily yields the `nedges` edges of the graph.
    ///
    /// Pass `&mut source` to keep using the source afterwards.
    pub fn edges<R: RandomSource>(&self, rng: R) -> Edges<'_, R> {
        self.take_edges(rng, self.nedges)
    }

    fn take_edges<R: RandomSource>(&self, rng: R, count: u64) -> Edges<'_, R> {
        Edges {
            generator: self,
            rng,
            remaining: count,
        }
    }

    /// Generates all `nedges` edges from a single random stream.
    ///
    /// Duplicates and self-loops are kept.
    #[instrument(level = "debug", skip(self, rng), fields(nnodes = self.nnodes, nedges = self.nedges))]
    pub fn generate<R: RandomSource>(&self, rng: R) -> Vec<UnweightedEdge> {
        self.edges(rng).collect()
    }

    /// Generates `nedges` distinct edges without self-loops.
    ///
    /// Rejected draws are retried until the budget of
    /// `max(nedges * SIMPLE_ATTEMPT_FACTOR, SIMPLE_MIN_ATTEMPTS)` edge draws is
    /// spent.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidParameter`] when more edges are requested
    /// than distinct non-loop pairs exist, and
    /// [`GraphError::AttemptsExhausted`] when the budget runs out.
    #[instrument(level = "debug", skip(self, rng), err, fields(nnodes = self.nnodes, nedges = self.nedges))]
    pub fn generate_simple<R: RandomSource>(
        &self,
        mut rng: R,
    ) -> Result<Vec<UnweightedEdge>, GraphError> {
        let nnodes = u128::from(self.nnodes);
        let available = nnodes * (nnodes - 1);
        if u128::from(self.nedges) > available {
            return Err(GraphError::invalid(
                "nedges",
                format!(
                    "{} distinct edges requested but only {available} exist without self-loops",
                    self.nedges
                ),
            ));
        }

        let budget = self
            .nedges
            .saturating_mul(SIMPLE_ATTEMPT_FACTOR)
            .max(SIMPLE_MIN_ATTEMPTS);
        let mut seen = HashSet::new();
        let mut edges = Vec::new();
        let mut attempts = 0u64;
        while (edges.len() as u64) < self.nedges {
            if attempts == budget {
                return Err(GraphError::AttemptsExhausted {
                    accepted: edges.len() as u64,
                    requested: self.nedges,
                    attempts,
                });
            }
            attempts += 1;
            let edge = self.generate_edge(&mut rng);
            if edge.0 != edge.1 && seen.insert(edge) {
                edges.push(edge);
            }
        }
        debug!(attempts, "simple graph complete");
        Ok(edges)
    }

    /// Generates the edges in `peers` partitions on the rayon pool.
    ///
    /// Partition `index` holds [`partition_share`] edges drawn from ChaCha
    /// stream `index` of `seed`, and the partitions are concatenated in index
    /// order. The result depends only on `seed` and `peers`, never on the
    /// thread count; with one peer it equals
    /// `generate(RngSource::new(default_rng(seed)))`.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidParameter`] if `peers` is zero or above
    /// [`MAX_WORKERS`].
    #[instrument(level = "debug", skip(self), err, fields(nnodes = self.nnodes, nedges = self.nedges))]
    pub fn generate_partitioned(
        &self,
        seed: u64,
        peers: usize,
    ) -> Result<Vec<UnweightedEdge>, GraphError> {
        validate_peers(peers)?;
        let shares: Vec<Vec<UnweightedEdge>> = (0..peers)
            .into_par_iter()
            .map(|index| {
                let index = index as u64;
                let share = partition_share(self.nedges, index, peers as u64);
                let source = RngSource::new(stream_rng(seed, index));
                self.take_edges(source, share).collect()
            })
            .collect();
        Ok(shares.into_iter().flatten().collect())
    }
}

/// Checks a partition count for [`RMatGenerator::generate_partitioned`].
///
/// # Errors
/// Returns [`GraphError::InvalidParameter`] unless `1 <= peers <= MAX_WORKERS`.
pub fn validate_peers(peers: usize) -> Result<(), GraphError> {
    if peers == 0 {
        return Err(GraphError::invalid("workers", "must be positive"));
    }
    if peers > MAX_WORKERS {
        return Err(GraphError::invalid(
            "workers",
            format!("{peers} exceeds the maximum of {MAX_WORKERS} partitions"),
        ));
    }
    Ok(())
}

/// Number of edges worker `index` of `peers` generates.
///
/// Shares differ by at most one; the first `total % peers` workers take the
/// extra edge.
pub fn partition_share(total: u64, index: u64, peers: u64) -> u64 {
    let base = total / peers;
    if index < total % peers {
        base + 1
    } else {
        base
    }
}

/// Iterator over generated edges, see [`RMatGenerator::edges`].
pub struct Edges<'a, R> {
    generator: &'a RMatGenerator,
    rng: R,
    remaining: u64,
}

impl<'a, R: RandomSource> Iterator for Edges<'a, R> {
    type Item = UnweightedEdge;

    fn next(&mut self) -> Option<UnweightedEdge> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.generator.generate_edge(&mut self.rng))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(remaining) => (remaining, Some(remaining)),
            Err(_) => (usize::MAX, None),
        }
    }
}
