//! # Data Model
//!
//! Nodes are fixed-length strings over `{0, 1}`. Identity is value equality,
//! so a `Node` can be used directly as a map key and looked up by `&str`.

use crate::error::{ClusterError, ClusterResult};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Cost of an edge: the Hamming distance between its endpoints.
pub type Cost = u32;

/// An immutable bit-string node.
///
/// Backed by `Arc<str>` so the disjoint set and the edge buckets can share
/// the same allocation. Hashing and equality delegate to the string
/// contents, which keeps `Borrow<str>` lookups consistent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Node(Arc<str>);

impl Node {
    /// Wrap a string without validating its alphabet.
    ///
    /// Neighbor generation still rejects non-binary characters, so an
    /// unchecked node fails later with `InvalidAlphabet` rather than silently.
    pub fn new_unchecked(bits: impl Into<Arc<str>>) -> Self {
        Self(bits.into())
    }

    /// Parse a node, rejecting anything outside `{0, 1}`.
    pub fn parse(bits: &str) -> ClusterResult<Self> {
        check_binary(bits)?;
        Ok(Self(bits.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of bit positions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Borrow<str> for Node {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Node {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Node {
    fn from(bits: &str) -> Self {
        Self::new_unchecked(bits)
    }
}

impl From<String> for Node {
    fn from(bits: String) -> Self {
        Self::new_unchecked(bits)
    }
}

/// Reject any character outside `{0, 1}`.
pub fn check_binary(bits: &str) -> ClusterResult<()> {
    match bits.char_indices().find(|(_, c)| !matches!(c, '0' | '1')) {
        Some((position, found)) => Err(ClusterError::InvalidAlphabet {
            node: bits.to_string(),
            position,
            found,
        }),
        None => Ok(()),
    }
}

/// A discovered edge between two nodes present in the input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub cost: Cost,
    pub u: Node,
    pub v: Node,
}

impl Edge {
    pub fn new(cost: Cost, u: Node, v: Node) -> Self {
        Self { cost, u, v }
    }
}
