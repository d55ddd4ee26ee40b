//! Reading and writing plain-text edge lists.
//!
//! Files hold one edge per line as two whitespace separated, 0-based vertex
//! indices: `src dst`. Written files carry no header. When loading, blank
//! lines and lines starting with `#` (SNAP style headers) are skipped.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, instrument};

use crate::error::GraphError;
use crate::{Node, UnweightedEdge};

/// Writes `edges` to `writer`, one `src dst` line per edge.
///
/// Returns the number of edges written.
pub fn write_edges<W, I>(mut writer: W, edges: I) -> io::Result<u64>
where
    W: Write,
    I: IntoIterator<Item = UnweightedEdge>,
{
    let mut written = 0u64;
    for (src, dst) in edges {
        writeln!(writer, "{src} {dst}")?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

/// Creates (or truncates) `path` and streams `edges` into it.
///
/// # Errors
/// Returns [`GraphError::Io`] if the file cannot be created or written. A
/// partially written file is left in place.
#[instrument(level = "debug", skip(edges), err, fields(path = %path.display()))]
pub fn save_edge_list<I>(path: &Path, edges: I) -> Result<u64, GraphError>
where
    I: IntoIterator<Item = UnweightedEdge>,
{
    let file = File::create(path).map_err(|source| GraphError::io(path, source))?;
    let written =
        write_edges(BufWriter::new(file), edges).map_err(|source| GraphError::io(path, source))?;
    debug!(written, "edge list saved");
    Ok(written)
}

/// Edge-list loader holding the worker index and the number of peers.
///
/// Line `n` (counting every physical line from zero) belongs to the worker
/// with `n % peers == index`, so several loaders can split one file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphLoader {
    index: usize,
    peers: usize,
}

impl Default for GraphLoader {
    fn default() -> Self {
        GraphLoader { index: 0, peers: 1 }
    }
}

impl GraphLoader {
    /// # Errors
    /// Returns [`GraphError::InvalidParameter`] if `peers` is zero or `index`
    /// is not below `peers`.
    pub fn new(index: usize, peers: usize) -> Result<GraphLoader, GraphError> {
        if peers == 0 {
            return Err(GraphError::invalid("peers", "must be positive"));
        }
        if index >= peers {
            return Err(GraphError::invalid(
                "index",
                format!("{index} must be below peers = {peers}"),
            ));
        }
        Ok(GraphLoader { index, peers })
    }

    /// Loads this loader's share of the edges in `path`.
    ///
    /// # Errors
    /// Returns [`GraphError::Io`] on read failures and [`GraphError::Parse`]
    /// for malformed lines.
    #[instrument(level = "debug", skip(self), err, fields(path = %path.display()))]
    pub fn load_edge_list(&self, path: &Path) -> Result<Vec<UnweightedEdge>, GraphError> {
        let file = File::open(path).map_err(|source| GraphError::io(path, source))?;
        self.read_edge_list(BufReader::new(file))
            .map_err(|err| match err {
                GraphError::Io { source, .. } => GraphError::io(path, source),
                other => other,
            })
    }

    /// Reads this loader's share of the edges from `reader`.
    ///
    /// # Errors
    /// Same as [`GraphLoader::load_edge_list`]; I/O failures carry an empty
    /// path.
    pub fn read_edge_list<R: BufRead>(&self, reader: R) -> Result<Vec<UnweightedEdge>, GraphError> {
        let mut data = Vec::new();
        for (count, read_line) in reader.lines().enumerate() {
            if count % self.peers != self.index {
                continue;
            }
            let line = read_line.map_err(|source| GraphError::io("", source))?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            data.push(parse_edge(trimmed, count + 1)?);
        }
        Ok(data)
    }
}

fn parse_edge(line: &str, line_number: usize) -> Result<UnweightedEdge, GraphError> {
    let mut text = line.split_whitespace();
    let from = parse_node(text.next(), "source", line_number)?;
    let to = parse_node(text.next(), "target", line_number)?;
    if let Some(extra) = text.next() {
        return Err(GraphError::Parse {
            line: line_number,
            reason: format!("unexpected trailing field `{extra}`"),
        });
    }
    Ok((from, to))
}

fn parse_node(field: Option<&str>, role: &str, line_number: usize) -> Result<Node, GraphError> {
    let field = field.ok_or_else(|| GraphError::Parse {
        line: line_number,
        reason: format!("missing {role} node"),
    })?;
    field.parse().map_err(|_| GraphError::Parse {
        line: line_number,
        reason: format!("invalid {role} node `{field}`"),
    })
}
