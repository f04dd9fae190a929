//! # Clustering Engine
//!
//! Kruskal's algorithm restricted to edges cheaper than the minimum spacing.
//! Since every eligible edge has a small integer cost, draining the cost
//! buckets in order replaces a priority queue.

use crate::dsu::{Components, DisjointSet};
use crate::edges::{DiscoveryOptions, EdgeBuckets, EdgeDiscovery};
use crate::error::{ClusterError, ClusterResult};
use crate::model::{Cost, Node};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Wall time spent in each phase of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTimings {
    pub load: Duration,
    pub discover: Duration,
    pub cluster: Duration,
}

impl PhaseTimings {
    pub fn total(&self) -> Duration {
        self.load + self.discover + self.cluster
    }
}

/// Counters from one sweep over the edge buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepStats {
    pub edges_considered: usize,
    pub merges: usize,
}

/// Result of a full run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterOutcome {
    /// Maximum number of clusters with the requested spacing
    pub k: usize,
    pub min_spacing: Cost,
    pub distinct_nodes: usize,
    pub edges_considered: usize,
    pub merges: usize,
    pub timings: PhaseTimings,
}

/// Owns the disjoint set and the spacing threshold for one computation.
#[derive(Debug, Clone)]
pub struct ClusteringEngine {
    dsu: DisjointSet<Node>,
    min_spacing: Cost,
    discovery: EdgeDiscovery,
}

impl ClusteringEngine {
    /// Create an engine with default discovery options.
    pub fn new(min_spacing: Cost) -> ClusterResult<Self> {
        Self::with_options(min_spacing, DiscoveryOptions::default())
    }

    pub fn with_options(min_spacing: Cost, options: DiscoveryOptions) -> ClusterResult<Self> {
        if min_spacing == 0 {
            return Err(ClusterError::InvalidSpacing { min_spacing });
        }
        Ok(Self {
            dsu: DisjointSet::new(),
            min_spacing,
            discovery: EdgeDiscovery::new(options),
        })
    }

    pub fn min_spacing(&self) -> Cost {
        self.min_spacing
    }

    /// Register every node as a singleton. Duplicates collapse into one
    /// entry; returns how many distinct nodes were added by this call.
    pub fn load(&mut self, nodes: impl IntoIterator<Item = Node>) -> usize {
        let nodes = nodes.into_iter();
        self.dsu.reserve(nodes.size_hint().0);
        nodes
            .filter(|node| self.dsu.add_node(node.clone()))
            .count()
    }

    pub fn node_count(&self) -> usize {
        self.dsu.len()
    }

    /// Find all edges of cost `< min_spacing` among the loaded nodes.
    pub fn discover(&self) -> ClusterResult<EdgeBuckets> {
        let membership: FxHashSet<Node> = self.dsu.keys().cloned().collect();
        self.discovery.discover(&membership, self.min_spacing)
    }

    /// Drain `buckets` in cost order, merging endpoints that are still in
    /// different components.
    pub fn cluster_edges(&mut self, buckets: EdgeBuckets) -> ClusterResult<SweepStats> {
        let mut stats = SweepStats::default();
        for edge in buckets.into_edges() {
            if edge.cost >= self.min_spacing {
                break;
            }
            stats.edges_considered += 1;
            if self.dsu.find(&edge.u)? == self.dsu.find(&edge.v)? {
                continue;
            }
            if self.dsu.union(&edge.u, &edge.v)? {
                stats.merges += 1;
                debug!(cost = edge.cost, u = %edge.u, v = %edge.v, "merged components");
            }
        }
        Ok(stats)
    }

    /// Current number of clusters.
    pub fn k(&self) -> usize {
        self.dsu.component_count()
    }

    pub fn components(&mut self) -> Components<Node> {
        self.dsu.components()
    }

    /// Load, discover and cluster in one go, timing each phase.
    pub fn run(&mut self, nodes: impl IntoIterator<Item = Node>) -> ClusterResult<ClusterOutcome> {
        let load_start = Instant::now();
        let distinct = self.load(nodes);
        let load = load_start.elapsed();
        info!(distinct_nodes = distinct, elapsed = ?load, "loaded nodes");

        let discover_start = Instant::now();
        let buckets = self.discover()?;
        let discover = discover_start.elapsed();
        info!(
            edges = buckets.edge_count(),
            min_spacing = self.min_spacing,
            elapsed = ?discover,
            "discovered edges"
        );

        let cluster_start = Instant::now();
        let stats = self.cluster_edges(buckets)?;
        let cluster = cluster_start.elapsed();
        let k = self.k();
        info!(k, merges = stats.merges, elapsed = ?cluster, "computed k");

        let timings = PhaseTimings {
            load,
            discover,
            cluster,
        };
        debug!(total = ?timings.total(), "run finished");

        Ok(ClusterOutcome {
            k,
            min_spacing: self.min_spacing,
            distinct_nodes: self.node_count(),
            edges_considered: stats.edges_considered,
            merges: stats.merges,
            timings,
        })
    }
}

/// Maximum number of clusters such that nodes in different clusters are at
/// least `min_spacing` apart.
pub fn compute_k(
    nodes: impl IntoIterator<Item = Node>,
    min_spacing: Cost,
) -> ClusterResult<usize> {
    let mut engine = ClusteringEngine::new(min_spacing)?;
    Ok(engine.run(nodes)?.k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Edge;

    fn nodes(bits: &[&str]) -> Vec<Node> {
        bits.iter().map(|b| Node::from(*b)).collect()
    }

    #[test]
    fn test_small_example() {
        let k = compute_k(nodes(&["000", "001", "111"]), 2).unwrap();
        assert_eq!(k, 2);
    }

    #[test]
    fn test_spacing_one_keeps_every_distinct_node() {
        let input = nodes(&["000", "001", "111", "001"]);
        assert_eq!(compute_k(input, 1).unwrap(), 3);
    }

    #[test]
    fn test_identical_nodes_collapse() {
        for spacing in 1..5 {
            let input = nodes(&["0101", "0101", "0101"]);
            assert_eq!(compute_k(input, spacing).unwrap(), 1);
        }
    }

    #[test]
    fn test_spacing_far_above_width() {
        let k = compute_k(nodes(&["0101", "1010"]), 60_000).unwrap();
        assert_eq!(k, 1);
    }

    #[test]
    fn test_phase_timings_total() {
        let timings = PhaseTimings {
            load: Duration::from_millis(2),
            discover: Duration::from_millis(5),
            cluster: Duration::from_millis(1),
        };
        assert_eq!(timings.total(), Duration::from_millis(8));
    }

    #[test]
    fn test_zero_spacing_rejected() {
        assert!(matches!(
            ClusteringEngine::new(0),
            Err(ClusterError::InvalidSpacing { min_spacing: 0 })
        ));
    }

    #[test]
    fn test_run_reports_counters() {
        let mut engine = ClusteringEngine::new(3).unwrap();
        let outcome = engine
            .run(nodes(&["0000", "0001", "0011", "1111", "1111"]))
            .unwrap();

        assert_eq!(outcome.distinct_nodes, 4);
        // 0000-0001-0011 chain together; 1111 is 2 away from 0011
        assert_eq!(outcome.k, 1);
        assert_eq!(outcome.merges, 3);
        assert!(outcome.edges_considered >= outcome.merges);
    }

    #[test]
    fn test_cluster_edges_ignores_costs_at_or_above_spacing() {
        let mut engine = ClusteringEngine::new(2).unwrap();
        engine.load(nodes(&["00", "11"]));
        let buckets = EdgeBuckets::from_edges([Edge::new(2, Node::from("00"), Node::from("11"))]);

        let stats = engine.cluster_edges(buckets).unwrap();
        assert_eq!(stats.merges, 0);
        assert_eq!(engine.k(), 2);
    }

    #[test]
    fn test_cluster_edges_with_unknown_node() {
        let mut engine = ClusteringEngine::new(3).unwrap();
        engine.load(nodes(&["00"]));
        let buckets = EdgeBuckets::from_edges([Edge::new(1, Node::from("00"), Node::from("01"))]);
        assert!(matches!(
            engine.cluster_edges(buckets),
            Err(ClusterError::UnknownNode { .. })
        ));
    }

    #[test]
    fn test_reordering_within_bucket_keeps_k() {
        let input = nodes(&["00000", "00001", "00011", "11000", "11100", "10101"]);
        let mut baseline = ClusteringEngine::new(3).unwrap();
        baseline.load(input.clone());
        let buckets = baseline.discover().unwrap();
        let expected = {
            let mut engine = baseline.clone();
            engine.cluster_edges(buckets.clone()).unwrap();
            engine.k()
        };

        let mut reversed = buckets;
        for cost in 1..3 {
            if let Some(bucket) = reversed.bucket_mut(cost) {
                bucket.reverse();
            }
        }
        baseline.cluster_edges(reversed).unwrap();
        assert_eq!(baseline.k(), expected);
    }

    #[test]
    fn test_components_after_run() {
        let mut engine = ClusteringEngine::new(2).unwrap();
        engine.run(nodes(&["000", "001", "111"])).unwrap();
        let components = engine.components();
        assert_eq!(components.len(), 2);
        let sizes: usize = components.components.iter().map(|c| c.len()).sum();
        assert_eq!(sizes, 3);
    }
}
