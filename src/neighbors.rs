//! # Neighbor Generation
//!
//! Enumerates every bit string within a bounded Hamming distance of a node by
//! flipping each subset of positions exactly once. Results are grouped by the
//! exact number of flipped positions.

use crate::error::{ClusterError, ClusterResult};
use crate::model::{check_binary, Cost, Node};
use rustc_hash::FxHashSet;

/// All strings at one exact distance from the source node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborBucket {
    pub distance: Cost,
    pub neighbors: FxHashSet<String>,
}

/// Stateless generator: the same node and bound always give the same sets.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeighborGenerator;

impl NeighborGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Materialize buckets for every distance in `[0, max_distance_exclusive)`.
    ///
    /// Bucket 0 is always `{node}` and is kept for index alignment.
    pub fn generate(
        &self,
        node: &Node,
        max_distance_exclusive: Cost,
    ) -> ClusterResult<Vec<NeighborBucket>> {
        let mut buckets: Vec<NeighborBucket> = (0..max_distance_exclusive)
            .map(|distance| NeighborBucket {
                distance,
                neighbors: FxHashSet::default(),
            })
            .collect();

        self.for_each_neighbor(node, max_distance_exclusive, |distance, candidate| {
            buckets[distance as usize]
                .neighbors
                .insert(candidate.to_string());
        })?;

        Ok(buckets)
    }

    /// Visit every candidate without allocating a string per candidate.
    ///
    /// A single buffer is flipped in place, handed to `visit`, then restored.
    pub fn for_each_neighbor<F>(
        &self,
        node: &Node,
        max_distance_exclusive: Cost,
        mut visit: F,
    ) -> ClusterResult<()>
    where
        F: FnMut(Cost, &str),
    {
        if max_distance_exclusive == 0 {
            return Ok(());
        }
        visit(0, node.as_str());
        if max_distance_exclusive == 1 {
            return Ok(());
        }

        check_binary(node.as_str())?;
        let mut buffer: Vec<u8> = node.as_str().as_bytes().to_vec();
        let width = buffer.len();
        // No string is more than `width` flips away.
        let reachable = max_distance_exclusive.min(width_to_cost(width).saturating_add(1));

        for distance in 1..reachable {
            for positions in Combinations::new(width, distance as usize) {
                flip_in_place(&mut buffer, &positions);
                let candidate = std::str::from_utf8(&buffer).map_err(|err| {
                    ClusterError::InvalidAlphabet {
                        node: node.to_string(),
                        position: err.valid_up_to(),
                        found: char::REPLACEMENT_CHARACTER,
                    }
                })?;
                visit(distance, candidate);
                flip_in_place(&mut buffer, &positions);
            }
        }

        Ok(())
    }
}

/// Return a copy of `bits` with each listed position flipped.
pub fn flip_positions(bits: &str, positions: &[usize]) -> ClusterResult<String> {
    let mut flipped: Vec<char> = bits.chars().collect();
    for &position in positions {
        flipped[position] = match flipped[position] {
            '0' => '1',
            '1' => '0',
            found => {
                return Err(ClusterError::InvalidAlphabet {
                    node: bits.to_string(),
                    position,
                    found,
                })
            }
        };
    }
    Ok(flipped.into_iter().collect())
}

#[inline]
fn flip_in_place(buffer: &mut [u8], positions: &[usize]) {
    // '0' is 0x30 and '1' is 0x31
    for &position in positions {
        buffer[position] ^= 1;
    }
}

/// Node width as a cost, saturating for absurdly long nodes.
pub fn width_to_cost(width: usize) -> Cost {
    Cost::try_from(width).unwrap_or(Cost::MAX)
}

/// Number of positions at which two equal-length strings differ.
/// Returns `None` if the lengths differ.
pub fn hamming_distance(a: &str, b: &str) -> Option<Cost> {
    if a.len() != b.len() {
        return None;
    }
    Some(a.bytes().zip(b.bytes()).filter(|(x, y)| x != y).count() as Cost)
}

/// `C(n, k)`, or 0 when `k > n`.
pub fn binomial(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        result = result * (n - i) as u128 / (i + 1) as u128;
    }
    result
}

/// Lexicographic `k`-subsets of `0..n`, each yielded exactly once.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        let done = k > n;
        Self {
            n,
            indices: if done { Vec::new() } else { (0..k).collect() },
            started: false,
            done,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.indices.clone());
        }

        let k = self.indices.len();
        // Rightmost index that can still move forward
        let Some(i) = (0..k).rev().find(|&i| self.indices[i] < self.n - k + i) else {
            self.done = true;
            return None;
        };

        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        Some(self.indices.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_zero_is_the_node_itself() {
        let node = Node::from("1010");
        let buckets = NeighborGenerator::new().generate(&node, 1).unwrap();
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].distance, 0);
        assert_eq!(buckets[0].neighbors.len(), 1);
        assert!(buckets[0].neighbors.contains("1010"));
    }

    #[test]
    fn test_bucket_sizes_match_binomial() {
        let node = Node::from("0110100111");
        let buckets = NeighborGenerator::new().generate(&node, 5).unwrap();
        assert_eq!(buckets.len(), 5);
        for bucket in &buckets {
            assert_eq!(
                bucket.neighbors.len() as u128,
                binomial(node.len(), bucket.distance as usize),
                "distance {}",
                bucket.distance
            );
            for neighbor in &bucket.neighbors {
                assert_eq!(
                    hamming_distance(node.as_str(), neighbor),
                    Some(bucket.distance)
                );
            }
        }
    }

    #[test]
    fn test_distance_one_neighbors() {
        let node = Node::from("000");
        let buckets = NeighborGenerator::new().generate(&node, 2).unwrap();
        let mut neighbors: Vec<&String> = buckets[1].neighbors.iter().collect();
        neighbors.sort();
        assert_eq!(neighbors, vec!["001", "010", "100"]);
    }

    #[test]
    fn test_distance_beyond_width_is_empty() {
        let node = Node::from("01");
        let buckets = NeighborGenerator::new().generate(&node, 4).unwrap();
        assert_eq!(buckets[2].neighbors.len(), 1);
        assert!(buckets[2].neighbors.contains("10"));
        assert!(buckets[3].neighbors.is_empty());
    }

    #[test]
    fn test_large_bound_visits_only_reachable_distances() {
        let node = Node::from("0101");
        let mut per_distance = vec![0usize; 5];
        NeighborGenerator::new()
            .for_each_neighbor(&node, 60_000, |distance, _| {
                let distance = distance as usize;
                if distance >= per_distance.len() {
                    per_distance.resize(distance + 1, 0);
                }
                per_distance[distance] += 1;
            })
            .unwrap();

        assert_eq!(per_distance, vec![1, 4, 6, 4, 1]);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let node = Node::from("110010");
        let generator = NeighborGenerator::new();
        let first = generator.generate(&node, 4).unwrap();
        let second = generator.generate(&node, 4).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_alphabet() {
        let node = Node::new_unchecked("01a1");
        let err = NeighborGenerator::new().generate(&node, 2).unwrap_err();
        assert!(matches!(
            err,
            ClusterError::InvalidAlphabet {
                position: 2,
                found: 'a',
                ..
            }
        ));
    }

    #[test]
    fn test_flip_positions() {
        assert_eq!(flip_positions("0000", &[0, 3]).unwrap(), "1001");
        assert!(flip_positions("0200", &[1]).is_err());
        // Untouched positions are not inspected
        assert_eq!(flip_positions("0200", &[0]).unwrap(), "1200");
    }

    #[test]
    fn test_combinations() {
        let all: Vec<Vec<usize>> = Combinations::new(4, 2).collect();
        assert_eq!(
            all,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3]
            ]
        );
        assert_eq!(Combinations::new(3, 0).count(), 1);
        assert_eq!(Combinations::new(2, 3).count(), 0);
        assert!(Combinations::new(2, usize::MAX / 2).indices.is_empty());
        assert_eq!(Combinations::new(24, 3).count() as u128, binomial(24, 3));
    }

    #[test]
    fn test_binomial() {
        assert_eq!(binomial(5, 0), 1);
        assert_eq!(binomial(5, 2), 10);
        assert_eq!(binomial(24, 2), 276);
        assert_eq!(binomial(3, 4), 0);
    }
}
