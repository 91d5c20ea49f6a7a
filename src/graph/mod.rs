//! # Concept Graph
//!
//! Arena-backed node table for one loaded ontology.
//!
//! Nodes live in a single `Vec` addressed by slot; a `HashMap` maps concept
//! ids to slots. Parent/child linkage is stored as id sets on each node and
//! only ever written through [`Graph::link`], which updates both sides.
//!
//! A `Graph` is built once by the [`Loader`](crate::loader::Loader) and is
//! read-only afterwards: there is no public mutation API.

use std::collections::{BTreeSet, VecDeque};

use hashbrown::{HashMap, HashSet};

use crate::model::ConceptNode;
use crate::{Error, Result};

// ============================================================================
// Graph
// ============================================================================

/// The loaded ontology. Exclusive owner of every [`ConceptNode`].
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<ConceptNode>,
    /// concept id → slot in `nodes`
    slots: HashMap<String, usize>,
}

impl Graph {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            slots: HashMap::with_capacity(capacity),
        }
    }

    // ========================================================================
    // Build phase (crate-private)
    // ========================================================================

    /// Insert a node, replacing any earlier node with the same id.
    ///
    /// Returns the replaced node. The replacement keeps the slot of the
    /// original, so iteration order follows first appearance.
    pub(crate) fn insert(&mut self, node: ConceptNode) -> Option<ConceptNode> {
        match self.slots.get(&node.id) {
            Some(&slot) => Some(std::mem::replace(&mut self.nodes[slot], node)),
            None => {
                self.slots.insert(node.id.clone(), self.nodes.len());
                self.nodes.push(node);
                None
            }
        }
    }

    /// Record `parent` as a parent of `child` and `child` as a child of
    /// `parent`. Both endpoints must already be present; nothing is written
    /// unless both are.
    pub(crate) fn link(&mut self, child: &str, parent: &str) -> Result<()> {
        let dangling = |missing: &str| Error::DanglingEdgeReference {
            child: child.to_string(),
            parent: parent.to_string(),
            missing: missing.to_string(),
        };
        let child_slot = *self.slots.get(child).ok_or_else(|| dangling(child))?;
        let parent_slot = *self.slots.get(parent).ok_or_else(|| dangling(parent))?;

        self.nodes[child_slot].parents.insert(parent.to_string());
        self.nodes[parent_slot].children.insert(child.to_string());
        Ok(())
    }

    // ========================================================================
    // Read-only access
    // ========================================================================

    /// Look up a concept by id.
    pub fn get(&self, id: &str) -> Option<&ConceptNode> {
        self.slots.get(id).map(|&slot| &self.nodes[slot])
    }

    /// All concepts, in order of first appearance in the source document.
    pub fn values(&self) -> impl Iterator<Item = &ConceptNode> {
        self.nodes.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.slots.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Concepts with no parents.
    pub fn roots(&self) -> impl Iterator<Item = &ConceptNode> {
        self.nodes.iter().filter(|n| n.is_root())
    }

    // ========================================================================
    // Hierarchy traversal
    // ========================================================================

    /// Every concept reachable from `id` by following parent links.
    /// `id` itself is excluded. Unknown ids yield an empty set.
    pub fn ancestors(&self, id: &str) -> HashSet<&str> {
        self.closure(id, |n| &n.parents)
    }

    /// Every concept reachable from `id` by following child links.
    /// `id` itself is excluded. Unknown ids yield an empty set.
    pub fn descendants(&self, id: &str) -> HashSet<&str> {
        self.closure(id, |n| &n.children)
    }

    /// Breadth-first walk. The source data is not checked for cycles, so
    /// the visited set is what terminates the walk.
    fn closure<'a, F>(&'a self, id: &str, next: F) -> HashSet<&'a str>
    where
        F: Fn(&'a ConceptNode) -> &'a BTreeSet<String>,
    {
        let mut seen: HashSet<&'a str> = HashSet::new();
        let mut queue: VecDeque<&'a ConceptNode> = self.get(id).into_iter().collect();

        while let Some(node) = queue.pop_front() {
            for neighbour in next(node) {
                let Some(found) = self.get(neighbour) else { continue };
                if found.id != id && seen.insert(found.id.as_str()) {
                    queue.push_back(found);
                }
            }
        }
        seen
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a ConceptNode;
    type IntoIter = std::slice::Iter<'a, ConceptNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Graph {
        // A -> B -> C, plus D -> B
        let mut g = Graph::default();
        for id in ["A", "B", "C", "D"] {
            g.insert(ConceptNode::new(id));
        }
        g.link("A", "B").unwrap();
        g.link("B", "C").unwrap();
        g.link("D", "B").unwrap();
        g
    }

    #[test]
    fn test_insert_last_write_wins_keeps_slot() {
        let mut g = Graph::default();
        g.insert(ConceptNode::new("A").with_name("first"));
        g.insert(ConceptNode::new("B"));
        let old = g.insert(ConceptNode::new("A").with_name("second"));

        assert_eq!(old.and_then(|n| n.name).as_deref(), Some("first"));
        assert_eq!(g.len(), 2);
        assert_eq!(g.get("A").unwrap().name.as_deref(), Some("second"));
        assert_eq!(g.ids().collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn test_link_is_symmetric() {
        let g = chain();
        assert!(g.get("A").unwrap().parents.contains("B"));
        assert!(g.get("B").unwrap().children.contains("A"));
        assert!(g.get("B").unwrap().children.contains("D"));
        assert!(g.get("C").unwrap().is_root());
        assert!(g.get("A").unwrap().is_leaf());
    }

    #[test]
    fn test_link_dangling_writes_nothing() {
        let mut g = Graph::default();
        g.insert(ConceptNode::new("A"));
        let err = g.link("A", "Z").unwrap_err();
        assert!(matches!(err, Error::DanglingEdgeReference { ref missing, .. } if missing == "Z"));
        assert!(g.get("A").unwrap().parents.is_empty());
    }

    #[test]
    fn test_ancestors_and_descendants() {
        let g = chain();
        assert_eq!(g.ancestors("A"), HashSet::from(["B", "C"]));
        assert_eq!(g.descendants("C"), HashSet::from(["A", "B", "D"]));
        assert!(g.ancestors("C").is_empty());
        assert!(g.ancestors("nope").is_empty());
        assert_eq!(g.roots().map(|n| n.id.as_str()).collect::<Vec<_>>(), vec!["C"]);
    }

    #[test]
    fn test_closure_terminates_on_cycle() {
        let mut g = Graph::default();
        g.insert(ConceptNode::new("A"));
        g.insert(ConceptNode::new("B"));
        g.link("A", "B").unwrap();
        g.link("B", "A").unwrap();
        assert_eq!(g.ancestors("A"), HashSet::from(["B"]));
    }
}
