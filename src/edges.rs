//! # Edge Discovery
//!
//! Turns generated neighbor candidates into real edges by keeping only the
//! candidates that are themselves input nodes. Edges are bucketed by their
//! Hamming distance and iterated in increasing cost order.

use crate::error::{ClusterError, ClusterResult};
use crate::model::{Cost, Edge, Node};
use crate::neighbors::{width_to_cost, NeighborGenerator};
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Edges grouped by cost. The `BTreeMap` keeps costs ordered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeBuckets {
    buckets: BTreeMap<Cost, Vec<(Node, Node)>>,
}

impl EdgeBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty buckets for every cost in `1..min_spacing` that nodes of
    /// `width` bits can actually reach.
    pub fn for_spacing(min_spacing: Cost, width: usize) -> Self {
        let reachable = min_spacing.min(width_to_cost(width).saturating_add(1));
        Self {
            buckets: (1..reachable).map(|cost| (cost, Vec::new())).collect(),
        }
    }

    pub fn from_edges(edges: impl IntoIterator<Item = Edge>) -> Self {
        let mut buckets = Self::new();
        for edge in edges {
            buckets.insert(edge);
        }
        buckets
    }

    pub fn insert(&mut self, edge: Edge) {
        self.buckets
            .entry(edge.cost)
            .or_default()
            .push((edge.u, edge.v));
    }

    /// Pairs recorded at `cost`, empty if the bucket does not exist.
    pub fn bucket(&self, cost: Cost) -> &[(Node, Node)] {
        self.buckets.get(&cost).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Mutable access to a bucket, e.g. to reorder pairs within it.
    pub fn bucket_mut(&mut self, cost: Cost) -> Option<&mut Vec<(Node, Node)>> {
        self.buckets.get_mut(&cost)
    }

    /// Costs present, smallest first.
    pub fn costs(&self) -> impl Iterator<Item = Cost> + '_ {
        self.buckets.keys().copied()
    }

    /// Total number of recorded pairs across all buckets.
    pub fn edge_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.edge_count() == 0
    }

    /// Borrowing iteration in non-decreasing cost order.
    pub fn iter(&self) -> impl Iterator<Item = (Cost, &Node, &Node)> + '_ {
        self.buckets
            .iter()
            .flat_map(|(&cost, pairs)| pairs.iter().map(move |(u, v)| (cost, u, v)))
    }

    /// Drain every edge in non-decreasing cost order.
    pub fn into_edges(self) -> impl Iterator<Item = Edge> {
        self.buckets
            .into_iter()
            .flat_map(|(cost, pairs)| pairs.into_iter().map(move |(u, v)| Edge::new(cost, u, v)))
    }
}

/// Options for edge discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// Generate neighbors for different nodes on the rayon pool
    pub parallel: bool,
    /// Keep only the `u < v` orientation of each pair
    pub dedup: bool,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            dedup: false,
        }
    }
}

/// Finds every edge of cost `< min_spacing` among a fixed node set.
#[derive(Debug, Clone, Default)]
pub struct EdgeDiscovery {
    generator: NeighborGenerator,
    options: DiscoveryOptions,
}

impl EdgeDiscovery {
    pub fn new(options: DiscoveryOptions) -> Self {
        Self {
            generator: NeighborGenerator::new(),
            options,
        }
    }

    /// Discover edges among `all_nodes`.
    ///
    /// Self-matches at distance 0 are never recorded. Without dedup both
    /// orientations of a pair are kept, which the clustering sweep tolerates.
    #[instrument(skip(self, all_nodes), fields(nodes = all_nodes.len()))]
    pub fn discover(
        &self,
        all_nodes: &FxHashSet<Node>,
        min_spacing: Cost,
    ) -> ClusterResult<EdgeBuckets> {
        if min_spacing == 0 {
            return Err(ClusterError::InvalidSpacing { min_spacing });
        }

        let per_node: Vec<Vec<Edge>> = if self.options.parallel {
            all_nodes
                .par_iter()
                .map(|node| self.edges_from(node, all_nodes, min_spacing))
                .collect::<ClusterResult<_>>()?
        } else {
            all_nodes
                .iter()
                .map(|node| self.edges_from(node, all_nodes, min_spacing))
                .collect::<ClusterResult<_>>()?
        };

        let width = all_nodes.iter().map(Node::len).max().unwrap_or(0);
        let mut buckets = EdgeBuckets::for_spacing(min_spacing, width);
        for edge in per_node.into_iter().flatten() {
            buckets.insert(edge);
        }

        for cost in buckets.costs() {
            debug!(cost, edges = buckets.bucket(cost).len(), "edge bucket filled");
        }
        Ok(buckets)
    }

    /// Edges incident to one node, read-only over the shared node set.
    fn edges_from(
        &self,
        node: &Node,
        all_nodes: &FxHashSet<Node>,
        min_spacing: Cost,
    ) -> ClusterResult<Vec<Edge>> {
        let mut edges = Vec::new();
        self.generator
            .for_each_neighbor(node, min_spacing, |distance, candidate| {
                if distance == 0 {
                    return;
                }
                let Some(neighbor) = all_nodes.get(candidate) else {
                    return;
                };
                if self.options.dedup && node >= neighbor {
                    return;
                }
                edges.push(Edge::new(distance, node.clone(), neighbor.clone()));
            })?;
        Ok(edges)
    }
}
