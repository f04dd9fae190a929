//! # Disjoint Set Union (DSU)
//!
//! Union-find over node values with full path compression and union by size.
//! Parent links are key-to-key mappings, so a child only ever refers to its
//! representative by value and never owns it.

use crate::error::{ClusterError, ClusterResult};
use crate::model::Node;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// Disjoint set keyed by value.
///
/// Invariant: the sizes recorded for all representatives sum to `len()`.
#[derive(Debug, Clone)]
pub struct DisjointSet<K = Node> {
    /// Parent pointer for every registered key (roots point to themselves)
    parent: FxHashMap<K, K>,
    /// Component size, tracked for representatives only
    sizes: FxHashMap<K, usize>,
}

impl<K> DisjointSet<K>
where
    K: Clone + Eq + Hash + fmt::Display,
{
    pub fn new() -> Self {
        Self {
            parent: FxHashMap::default(),
            sizes: FxHashMap::default(),
        }
    }

    /// Make room for at least `additional` more keys.
    pub fn reserve(&mut self, additional: usize) {
        self.parent.reserve(additional);
        self.sizes.reserve(additional);
    }

    /// Register `key` as a singleton component. Returns `false` if it was
    /// already present, in which case nothing changes.
    pub fn add_node(&mut self, key: K) -> bool {
        if self.parent.contains_key(&key) {
            return false;
        }
        self.parent.insert(key.clone(), key.clone());
        self.sizes.insert(key, 1);
        true
    }

    /// Iterate over every registered key.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.parent.keys()
    }

    /// Check if a key has been registered.
    pub fn contains(&self, key: &K) -> bool {
        self.parent.contains_key(key)
    }

    /// Find the representative of `key`'s component.
    ///
    /// Walks to the root, then points every visited key directly at it.
    pub fn find(&mut self, key: &K) -> ClusterResult<K> {
        let Some(mut current) = self.parent.get(key).cloned() else {
            return Err(ClusterError::UnknownNode {
                node: key.to_string(),
            });
        };
        if &current == key {
            return Ok(current);
        }

        let mut path = vec![key.clone()];
        loop {
            let next = self.parent.get(&current).cloned().unwrap_or_else(|| current.clone());
            if next == current {
                break;
            }
            path.push(current);
            current = next;
        }

        for visited in path {
            self.parent.insert(visited, current.clone());
        }
        Ok(current)
    }

    /// Check if two keys are in the same component.
    pub fn same_component(&mut self, a: &K, b: &K) -> ClusterResult<bool> {
        Ok(self.find(a)? == self.find(b)?)
    }

    /// Merge the components holding `a` and `b`.
    ///
    /// The smaller component's root is attached under the larger one. Returns
    /// whether a merge happened (`false` when they already shared a root).
    pub fn union(&mut self, a: &K, b: &K) -> ClusterResult<bool> {
        let root_a = self.find(a)?;
        let root_b = self.find(b)?;
        if root_a == root_b {
            return Ok(false);
        }

        let size_a = self.sizes.get(&root_a).copied().unwrap_or(1);
        let size_b = self.sizes.get(&root_b).copied().unwrap_or(1);
        let (winner, loser) = if size_a >= size_b {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };

        self.sizes.remove(&loser);
        self.sizes.insert(winner.clone(), size_a + size_b);
        self.parent.insert(loser, winner);
        Ok(true)
    }

    /// Number of live components (one per representative).
    pub fn component_count(&self) -> usize {
        self.sizes.len()
    }

    /// Size of the component that holds `key`.
    pub fn component_size(&mut self, key: &K) -> ClusterResult<usize> {
        let root = self.find(key)?;
        Ok(self.sizes.get(&root).copied().unwrap_or(1))
    }

    /// Total number of registered keys.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Group every key by its representative.
    pub fn components(&mut self) -> Components<K> {
        let keys: Vec<K> = self.parent.keys().cloned().collect();
        let mut grouped: FxHashMap<K, Vec<K>> =
            FxHashMap::with_capacity_and_hasher(self.sizes.len(), Default::default());

        for key in keys {
            // Keys come straight from `parent`, so lookup cannot fail.
            if let Ok(root) = self.find(&key) {
                grouped.entry(root).or_default().push(key);
            }
        }

        Components {
            components: grouped
                .into_iter()
                .map(|(representative, members)| Component {
                    representative,
                    members,
                })
                .collect(),
        }
    }
}

impl<K> Default for DisjointSet<K>
where
    K: Clone + Eq + Hash + fmt::Display,
{
    fn default() -> Self {
        Self::new()
    }
}

/// One cluster and its members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component<K = Node> {
    pub representative: K,
    pub members: Vec<K>,
}

impl<K> Component<K> {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Snapshot of all components, in no particular order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Components<K = Node> {
    pub components: Vec<Component<K>>,
}

impl<K> Components<K> {
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
