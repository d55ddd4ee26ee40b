//! Utilities for generating and inspecting synthetic benchmark graphs.
//!
//! The centrepiece is [`rmat::RMatGenerator`], an implementation of the
//! Recursive MATrix model used by the Graph500 benchmark. The remaining
//! modules cover the glue around it: parameter derivation, random sources,
//! edge-list reading and writing, and summary statistics.

pub mod cli;
pub mod edge_list;
pub mod error;
pub mod logging;
pub mod params;
pub mod random;
pub mod rmat;
pub mod summary;

use tracing::info;

pub use error::GraphError;
pub use params::{GraphSize, RMatParams};
pub use random::{default_rng, RandomSource, RngSource, SequenceSource};
pub use rmat::RMatGenerator;

/// Exported types representing graphs.
/// These are plain tuples so they can be handed to other graph libraries
/// without conversion.
pub type Node = u64;

pub type UnweightedEdge = (Node, Node);

/// Measures the phases of a run and logs how long each one took.
pub struct SubEventTimer {
    total_timer: std::time::Instant,
}

impl SubEventTimer {
    pub fn new_timer() -> SubEventTimer {
        SubEventTimer {
            total_timer: std::time::Instant::now(),
        }
    }

    /// Runs `func`, logging the phase duration next to the running total.
    pub fn time_subevent<G, F: FnOnce() -> G>(&self, event: &str, func: F) -> G {
        let timer = std::time::Instant::now();
        let res = func();
        let elapsed = timer.elapsed();
        info!(
            phase = event,
            phase_elapsed = ?elapsed,
            total_elapsed = ?self.elapsed(),
            "phase finished"
        );
        res
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.total_timer.elapsed()
    }
}
