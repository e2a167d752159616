//! ASCII rendering of container internals, built on termtree.

use std::fmt;

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::registry::EventRegistry;
use crate::set::OrderedSet;

/// Conversion into a printable tree.
///
/// The returned [`Tree`] implements `Display`, so callers render with
/// `println!("{}", value.to_tree_string())`.
pub trait TreeDisplay {
    fn to_tree_string(&self) -> Tree<String>;
}

/// Renders the internal node layout, children ordered left before right.
impl<K: fmt::Display> TreeDisplay for OrderedSet<K> {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        match self.root_index() {
            Some(root) => build_subtree(self, root),
            None => Tree::new("(empty set)".to_string()),
        }
    }
}

fn build_subtree<K: fmt::Display>(set: &OrderedSet<K>, idx: Index) -> Tree<String> {
    let (key, left, right) = match set.node_parts(idx) {
        Some(parts) => parts,
        None => return Tree::new("(missing node)".to_string()),
    };
    let mut tree = Tree::new(key.to_string());
    if let Some(left) = left {
        tree.push(build_subtree(set, left));
    }
    if let Some(right) = right {
        tree.push(build_subtree(set, right));
    }
    tree
}

/// Renders event names with their subscriber counts, sorted by name.
impl<P> TreeDisplay for EventRegistry<P> {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        let mut tree = Tree::new("events".to_string());
        for (event, count) in self.sorted_counts() {
            let label = if count == 1 {
                format!("{event} (1 subscriber)")
            } else {
                format!("{event} ({count} subscribers)")
            };
            tree.push(Tree::new(label));
        }
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set_renders_placeholder() {
        let set: OrderedSet<i32> = OrderedSet::new();
        assert_eq!(set.to_tree_string().to_string(), "(empty set)\n");
    }

    #[test]
    fn test_set_renders_left_before_right() {
        let mut set = OrderedSet::new();
        for key in [10, 5, 15] {
            set.insert(key);
        }
        assert_eq!(set.to_tree_string().to_string(), "10\n├── 5\n└── 15\n");
    }

    #[test]
    fn test_registry_renders_sorted_counts() {
        let mut registry: EventRegistry<()> = EventRegistry::new();
        registry.on("shutdown", |_| {});
        registry.on("tick", |_| {});
        registry.on("tick", |_| {});

        let rendered = registry.to_tree_string().to_string();
        assert_eq!(
            rendered,
            "events\n├── shutdown (1 subscriber)\n└── tick (2 subscribers)\n"
        );
    }
}
