#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Write;
use std::path::Path;

use bigcluster_rs::neighbors::hamming_distance;
use bigcluster_rs::{DisjointSet, Node};

/// Uniformly random bit strings.
pub fn random_nodes(count: usize, bits: usize, seed: u64) -> Vec<Node> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let s: String = (0..bits)
                .map(|_| if rng.random_bool(0.5) { '1' } else { '0' })
                .collect();
            Node::from(s)
        })
        .collect()
}

/// Nodes scattered around a few centers, so small-distance edges exist.
pub fn clustered_nodes(centers: usize, per_center: usize, bits: usize, seed: u64) -> Vec<Node> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut nodes = Vec::with_capacity(centers * per_center);
    for center in random_nodes(centers, bits, seed.wrapping_add(1)) {
        for _ in 0..per_center {
            let mut bytes: Vec<u8> = center.as_str().bytes().collect();
            let flips = rng.random_range(0..=3);
            for _ in 0..flips {
                let position = rng.random_range(0..bits);
                bytes[position] ^= 1;
            }
            nodes.push(Node::from(String::from_utf8(bytes).expect("ascii bits")));
        }
    }
    nodes
}

/// Reference k: union every pair closer than `min_spacing`, O(n^2).
pub fn brute_force_k(nodes: &[Node], min_spacing: u32) -> usize {
    let mut distinct: Vec<Node> = nodes.to_vec();
    distinct.sort();
    distinct.dedup();

    let mut dsu = DisjointSet::new();
    for node in &distinct {
        dsu.add_node(node.clone());
    }
    for (i, a) in distinct.iter().enumerate() {
        for b in &distinct[i + 1..] {
            let distance = hamming_distance(a.as_str(), b.as_str()).expect("equal lengths");
            if distance < min_spacing {
                dsu.union(a, b).expect("registered nodes");
            }
        }
    }
    dsu.component_count()
}

/// Write nodes in the input format, optionally with spaces between digits.
pub fn write_node_file(path: &Path, nodes: &[Node], spaced: bool) -> std::io::Result<()> {
    let bits = nodes.first().map(|n| n.len()).unwrap_or(0);
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "{} {}", nodes.len(), bits)?;
    for node in nodes {
        if spaced {
            let digits: Vec<String> = node.as_str().chars().map(String::from).collect();
            writeln!(file, "{} ", digits.join(" "))?;
        } else {
            writeln!(file, "{}", node)?;
        }
    }
    Ok(())
}
