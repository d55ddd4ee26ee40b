//! Error type shared by the generator, the edge-list I/O and the binaries.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while generating, writing or loading graphs.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A generation parameter was rejected before any work started.
    #[error("invalid parameter `{parameter}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Human readable description of the violated constraint.
        reason: String,
    },
    /// Reading or writing an edge list failed.
    #[error("I/O failure on `{path}`: {source}")]
    Io {
        /// File that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// An edge-list line could not be parsed.
    #[error("line {line}: {reason}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },
    /// Simple-graph generation gave up before collecting enough distinct edges.
    #[error("accepted {accepted} of {requested} distinct edges after {attempts} attempts")]
    AttemptsExhausted {
        /// Distinct edges collected so far.
        accepted: u64,
        /// Edges requested.
        requested: u64,
        /// Draws spent.
        attempts: u64,
    },
    /// The graph does not fit the in-memory representation used for summaries.
    #[error("graph with {nodes} nodes is too large to summarise")]
    GraphTooLarge {
        /// Requested node count.
        nodes: u64,
    },
}

impl GraphError {
    pub(crate) fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        GraphError::InvalidParameter {
            parameter,
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        GraphError::Io {
            path: path.into(),
            source,
        }
    }
}
