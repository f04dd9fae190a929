//! # Bigcluster
//!
//! Maximum-k clustering of fixed-length bit strings under a minimum Hamming
//! spacing.
//!
//! Every node starts as its own cluster. For each node, all bit strings
//! within `min_spacing - 1` flips are generated and checked against the node
//! set; the edges that exist are merged cheapest first with a union-find.
//! The number of components left over is the largest `k` for which every
//! pair of nodes in different clusters is at least `min_spacing` apart.

pub mod config;
pub mod dsu;
pub mod edges;
pub mod engine;
pub mod error;
pub mod input;
pub mod model;
pub mod neighbors;

// Re-export main types for convenience
pub use config::{ClusterConfig, ConfigOverrides};
pub use dsu::{Component, Components, DisjointSet};
pub use edges::{DiscoveryOptions, EdgeBuckets, EdgeDiscovery};
pub use engine::{compute_k, ClusterOutcome, ClusteringEngine, PhaseTimings};
pub use error::{ClusterError, ClusterResult};
pub use input::NodeInput;
pub use model::{Cost, Edge, Node};
pub use neighbors::NeighborGenerator;

use std::time::Instant;
use tracing::info;

/// Main API: read a node file and compute k with the configured spacing.
pub struct BigCluster {
    config: ClusterConfig,
}

impl BigCluster {
    /// Create a runner after validating the configuration.
    pub fn new(config: ClusterConfig) -> ClusterResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// Read the configured input file and cluster it.
    ///
    /// Reading and parsing the file is counted as part of the load phase.
    pub fn run(&self) -> ClusterResult<ClusterOutcome> {
        let read_start = Instant::now();
        let input = NodeInput::from_path(&self.config.input)?;
        let read = read_start.elapsed();
        info!(
            path = %self.config.input.display(),
            nodes = input.nodes.len(),
            elapsed = ?read,
            "read node file"
        );

        let mut outcome = self.run_nodes(input.nodes)?;
        outcome.timings.load += read;
        Ok(outcome)
    }

    /// Cluster nodes that were produced elsewhere.
    pub fn run_nodes(
        &self,
        nodes: impl IntoIterator<Item = Node>,
    ) -> ClusterResult<ClusterOutcome> {
        let mut engine = ClusteringEngine::with_options(
            self.config.min_spacing,
            self.config.discovery_options(),
        )?;
        engine.run(nodes)
    }
}
