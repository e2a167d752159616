//! Ordered set of distinct keys, backed by an arena-based binary search tree.

use std::cmp::Ordering;

use generational_arena::{Arena, Index};
use tracing::{instrument, trace};

/// Single tree node: one key plus arena links to at most one child per side.
///
/// Every node is linked from exactly one parent slot (or is the root), so the
/// node graph is tree-shaped with no sharing and no cycles.
#[derive(Debug)]
struct SetNode<K> {
    key: K,
    /// Keys in the left subtree compare strictly less than `key`.
    left: Option<Index>,
    /// Keys in the right subtree compare strictly greater than `key`.
    right: Option<Index>,
}

impl<K> SetNode<K> {
    fn leaf(key: K) -> Self {
        Self {
            key,
            left: None,
            right: None,
        }
    }
}

/// Ordered set of distinct keys over an unbalanced binary search tree.
///
/// The set starts empty and grows monotonically through [`insert`]; inserting
/// a key that is already present is a defined no-op, reported by the `bool`
/// return value rather than an error. There is no deletion operation (omitted
/// by design, not a bug) and no rebalancing: the shape of the tree depends
/// entirely on insertion order, so inserting keys in sorted order degrades
/// lookup depth to linear in the number of keys.
///
/// All operations are synchronous and run to completion. The set performs no
/// internal synchronization and is not safe for concurrent mutation; callers
/// reusing it across threads must add external mutual exclusion.
///
/// [`insert`]: OrderedSet::insert
#[derive(Debug)]
pub struct OrderedSet<K> {
    /// Arena storage for all tree nodes
    nodes: Arena<SetNode<K>>,
    /// Index of the root node, None for the empty set
    root: Option<Index>,
}

impl<K> Default for OrderedSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> OrderedSet<K> {
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Number of keys stored in the set.
    #[instrument(level = "trace", skip(self))]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Visits all keys in ascending order.
    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self) -> InOrderIterator<'_, K> {
        InOrderIterator::new(self)
    }

    /// Smallest key in the set, `None` when empty.
    #[instrument(level = "trace", skip(self))]
    pub fn min(&self) -> Option<&K> {
        let mut idx = self.root?;
        loop {
            let node = self.nodes.get(idx)?;
            match node.left {
                Some(left) => idx = left,
                None => return Some(&node.key),
            }
        }
    }

    /// Largest key in the set, `None` when empty.
    #[instrument(level = "trace", skip(self))]
    pub fn max(&self) -> Option<&K> {
        let mut idx = self.root?;
        loop {
            let node = self.nodes.get(idx)?;
            match node.right {
                Some(right) => idx = right,
                None => return Some(&node.key),
            }
        }
    }

    /// Height of the tree: 0 for the empty set, 1 for a single key.
    ///
    /// Because no rebalancing is performed, `depth` equals `len` after
    /// inserting keys in sorted order.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        if let Some(root) = self.root {
            self.calculate_depth(root)
        } else {
            0
        }
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.nodes.get(node_idx) {
            let left = node.left.map_or(0, |idx| self.calculate_depth(idx));
            let right = node.right.map_or(0, |idx| self.calculate_depth(idx));
            1 + left.max(right)
        } else {
            0
        }
    }

    pub(crate) fn root_index(&self) -> Option<Index> {
        self.root
    }

    pub(crate) fn node_parts(&self, idx: Index) -> Option<(&K, Option<Index>, Option<Index>)> {
        self.nodes
            .get(idx)
            .map(|node| (&node.key, node.left, node.right))
    }
}

impl<K: Ord> OrderedSet<K> {
    /// Inserts `key`, returning `true` if it was not present before.
    ///
    /// Descends from the root comparing against each node's key: equal aborts
    /// with no structural change (`false`), less goes left, greater goes
    /// right, and a missing child slot receives the new leaf.
    #[instrument(level = "trace", skip_all)]
    pub fn insert(&mut self, key: K) -> bool {
        let mut current = match self.root {
            Some(root) => root,
            None => {
                let root = self.nodes.insert(SetNode::leaf(key));
                self.root = Some(root);
                return true;
            }
        };

        loop {
            let node = match self.nodes.get(current) {
                Some(node) => node,
                None => return false,
            };
            match key.cmp(&node.key) {
                Ordering::Equal => {
                    trace!("duplicate key, insert is a no-op");
                    return false;
                }
                Ordering::Less => match node.left {
                    Some(left) => current = left,
                    None => {
                        let leaf = self.nodes.insert(SetNode::leaf(key));
                        if let Some(parent) = self.nodes.get_mut(current) {
                            parent.left = Some(leaf);
                        }
                        return true;
                    }
                },
                Ordering::Greater => match node.right {
                    Some(right) => current = right,
                    None => {
                        let leaf = self.nodes.insert(SetNode::leaf(key));
                        if let Some(parent) = self.nodes.get_mut(current) {
                            parent.right = Some(leaf);
                        }
                        return true;
                    }
                },
            }
        }
    }

    /// Whether `key` is present. `false` on the empty set; no side effects.
    #[instrument(level = "trace", skip_all)]
    pub fn contains(&self, key: &K) -> bool {
        let mut current = self.root;
        while let Some(idx) = current {
            let node = match self.nodes.get(idx) {
                Some(node) => node,
                None => return false,
            };
            current = match key.cmp(&node.key) {
                Ordering::Equal => return true,
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        false
    }
}

/// In-order traversal over an [`OrderedSet`], yielding keys in ascending
/// order. Holds the pending right-turn ancestors on an explicit stack.
pub struct InOrderIterator<'a, K> {
    set: &'a OrderedSet<K>,
    stack: Vec<Index>,
}

impl<'a, K> InOrderIterator<'a, K> {
    fn new(set: &'a OrderedSet<K>) -> Self {
        let mut iter = Self {
            set,
            stack: Vec::new(),
        };
        iter.push_left_spine(set.root);
        iter
    }

    /// Pushes `start` and its chain of left children onto the stack.
    fn push_left_spine(&mut self, start: Option<Index>) {
        let mut current = start;
        while let Some(idx) = current {
            self.stack.push(idx);
            current = self.set.nodes.get(idx).and_then(|node| node.left);
        }
    }
}

impl<'a, K> Iterator for InOrderIterator<'a, K> {
    type Item = &'a K;

    #[instrument(level = "trace", skip(self))]
    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let node = self.set.nodes.get(idx)?;
        self.push_left_spine(node.right);
        Some(&node.key)
    }
}
