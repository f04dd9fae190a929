//! Default constants for bigcluster configuration.
//!
//! All magic numbers are centralized here with documentation.

// =============================================================================
// Input Defaults
// =============================================================================

/// Default node file, read relative to the working directory
pub const DEFAULT_INPUT_PATH: &str = "clustering_big.txt";

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "BIGCLUSTER_";

/// Environment variable naming a TOML config file
pub const CONFIG_PATH_ENV: &str = "BIGCLUSTER_CONFIG";

// =============================================================================
// Clustering Defaults
// =============================================================================

/// Default minimum spacing between clusters.
/// Edges of cost 1 and 2 are merged; k is the count left at spacing 3.
pub const DEFAULT_MIN_SPACING: u32 = 3;

/// Generate neighbors on the rayon pool by default
pub const DEFAULT_PARALLEL: bool = true;

/// Keep both orientations of each edge by default
pub const DEFAULT_DEDUP_EDGES: bool = false;

// =============================================================================
// Logging Defaults
// =============================================================================

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";
