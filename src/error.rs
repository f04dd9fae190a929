//! Error taxonomy for the clustering pipeline.

use thiserror::Error;

/// Result alias used throughout the library.
pub type ClusterResult<T> = Result<T, ClusterError>;

/// Failures surfaced by loading, neighbor generation and union-find.
///
/// Nothing here is retried: every operation is deterministic, so an error
/// always means the input (or an internal invariant) is wrong.
#[derive(Debug, Error)]
pub enum ClusterError {
    /// A node contains a character other than `0` or `1`.
    #[error("non-binary character {found:?} at position {position} of node {node:?}")]
    InvalidAlphabet {
        node: String,
        position: usize,
        found: char,
    },

    /// `find`/`union` was called on a node that was never registered.
    #[error("node {node:?} is not registered in the disjoint set")]
    UnknownNode { node: String },

    /// The first line does not hold the node count and bit length.
    #[error("malformed header line {line:?}: expected `<node count> <bits per node>`")]
    MalformedHeader { line: String },

    /// A node line is not a bit string of the declared length.
    #[error("malformed node on line {line_no}: {reason} ({content:?})")]
    MalformedLine {
        line_no: usize,
        content: String,
        reason: String,
    },

    /// Spacing must be at least one.
    #[error("minimum spacing must be >= 1, got {min_spacing}")]
    InvalidSpacing { min_spacing: u32 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
