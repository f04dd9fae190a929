//! # Node Input
//!
//! Reads the node list: a header line `<node count> <bits per node>` followed
//! by one bit string per line. Digits may be separated by spaces.

use crate::error::{ClusterError, ClusterResult};
use crate::model::Node;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{info, warn};

/// Parsed input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInput {
    /// Node count from the header (informational only)
    pub declared_count: usize,
    /// Bits per node from the header
    pub declared_bits: usize,
    /// Nodes in file order, duplicates included
    pub nodes: Vec<Node>,
}

impl NodeInput {
    /// Open and parse a node file.
    pub fn from_path(path: impl AsRef<Path>) -> ClusterResult<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse a node list from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R) -> ClusterResult<Self> {
        let mut lines = reader.lines();

        let header = match lines.next() {
            Some(line) => line?,
            None => {
                return Err(ClusterError::MalformedHeader {
                    line: String::new(),
                })
            }
        };
        let (declared_count, declared_bits) = parse_header(&header)?;
        info!(
            declared_count,
            declared_bits, "loading nodes"
        );

        // The header count is not trusted for allocation.
        let mut nodes = Vec::new();
        for (index, line) in lines.enumerate() {
            let line = line?;
            // Header is line 1
            let line_no = index + 2;
            if line.trim().is_empty() {
                continue;
            }
            nodes.push(parse_node_line(&line, line_no, declared_bits)?);
        }

        if nodes.len() != declared_count {
            warn!(
                declared_count,
                read = nodes.len(),
                "header node count does not match the number of node lines"
            );
        }

        Ok(Self {
            declared_count,
            declared_bits,
            nodes,
        })
    }
}

fn parse_header(line: &str) -> ClusterResult<(usize, usize)> {
    let malformed = || ClusterError::MalformedHeader {
        line: line.to_string(),
    };
    let mut fields = line.split_whitespace();
    let count = fields
        .next()
        .and_then(|f| f.parse::<usize>().ok())
        .ok_or_else(malformed)?;
    let bits = fields
        .next()
        .and_then(|f| f.parse::<usize>().ok())
        .ok_or_else(malformed)?;
    Ok((count, bits))
}

/// Strip whitespace between digits and validate the result.
fn parse_node_line(line: &str, line_no: usize, declared_bits: usize) -> ClusterResult<Node> {
    let bits: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    let malformed = |reason: String| ClusterError::MalformedLine {
        line_no,
        content: line.to_string(),
        reason,
    };

    if let Some(found) = bits.chars().find(|c| !matches!(c, '0' | '1')) {
        return Err(malformed(format!("non-binary character {found:?}")));
    }
    if bits.len() != declared_bits {
        return Err(malformed(format!(
            "expected {declared_bits} bits, found {}",
            bits.len()
        )));
    }
    Node::parse(&bits)
}
