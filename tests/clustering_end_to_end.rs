#[path = "../src/test_support.rs"]
mod test_support;

use bigcluster_rs::{compute_k, ClusteringEngine, DiscoveryOptions, Node};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use test_support::{brute_force_k, clustered_nodes, random_nodes};

fn nodes(bits: &[&str]) -> Vec<Node> {
    bits.iter().map(|b| Node::from(*b)).collect()
}

#[test]
fn three_node_example() -> anyhow::Result<()> {
    assert_eq!(compute_k(nodes(&["000", "001", "111"]), 2)?, 2);
    Ok(())
}

#[test]
fn matches_pairwise_reference() -> anyhow::Result<()> {
    let input = clustered_nodes(6, 10, 12, 42);
    for spacing in 1..=4 {
        let expected = brute_force_k(&input, spacing);
        let k = compute_k(input.clone(), spacing)?;
        assert_eq!(k, expected, "min_spacing {spacing}");
    }
    Ok(())
}

#[test]
fn random_nodes_match_reference() -> anyhow::Result<()> {
    let input = random_nodes(200, 10, 7);
    for spacing in [2, 3] {
        assert_eq!(compute_k(input.clone(), spacing)?, brute_force_k(&input, spacing));
    }
    Ok(())
}

#[test]
fn input_order_does_not_change_k() -> anyhow::Result<()> {
    let mut input = clustered_nodes(5, 12, 16, 3);
    let expected = compute_k(input.clone(), 3)?;

    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..5 {
        input.shuffle(&mut rng);
        assert_eq!(compute_k(input.clone(), 3)?, expected);
    }
    Ok(())
}

#[test]
fn shuffled_buckets_do_not_change_k() -> anyhow::Result<()> {
    let input = clustered_nodes(4, 10, 12, 11);
    let mut engine = ClusteringEngine::new(3)?;
    engine.load(input);
    let buckets = engine.discover()?;

    let mut reference = engine.clone();
    reference.cluster_edges(buckets.clone())?;

    let mut rng = StdRng::seed_from_u64(5);
    let mut shuffled = buckets;
    for cost in 1..3 {
        if let Some(bucket) = shuffled.bucket_mut(cost) {
            bucket.shuffle(&mut rng);
        }
    }
    engine.cluster_edges(shuffled)?;
    assert_eq!(engine.k(), reference.k());
    Ok(())
}

#[test]
fn discovery_options_agree() -> anyhow::Result<()> {
    let input = clustered_nodes(5, 10, 14, 21);
    let mut results = Vec::new();
    for (parallel, dedup) in [(true, false), (false, false), (true, true), (false, true)] {
        let mut engine = ClusteringEngine::with_options(3, DiscoveryOptions { parallel, dedup })?;
        results.push(engine.run(input.clone())?.k);
    }
    assert!(results.windows(2).all(|w| w[0] == w[1]), "{results:?}");
    Ok(())
}

#[test]
fn spacing_one_counts_distinct_nodes() -> anyhow::Result<()> {
    let input = nodes(&["0101", "0101", "1111", "0000"]);
    assert_eq!(compute_k(input, 1)?, 3);
    Ok(())
}

#[test]
fn duplicates_collapse_to_one_cluster() -> anyhow::Result<()> {
    for spacing in 1..=4 {
        assert_eq!(compute_k(nodes(&["110", "110", "110"]), spacing)?, 1);
    }
    Ok(())
}

#[test]
fn spacing_above_width_merges_everything() -> anyhow::Result<()> {
    let input = random_nodes(30, 4, 8);
    assert_eq!(compute_k(input, 5)?, 1);
    Ok(())
}
