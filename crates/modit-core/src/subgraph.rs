//! Partial occurrences under construction.
//!
//! A [`Subgraph`] is a connected edge-induced subgraph being grown by the
//! enumeration engine: an insertion-ordered node set, the full edge records,
//! and a sorted edge-id list that serves as the occurrence's identity. Two
//! subgraphs are the *same occurrence* exactly when their sorted edge-id
//! lists agree; a fixed edge set determines the node set, so nodes and edge
//! records never enter equality or hashing.
//!
//! The engine clones at every branch, so the representation stays small:
//! three short vectors plus a cached time span, pre-sized to the enumeration
//! bounds via [`Subgraph::with_capacity`].

use std::hash::{Hash, Hasher};

use crate::graph::Edge;
use crate::types::{EdgeId, NodeId, Timestamp};

// ---------------------------------------------------------------------------
// Subgraph
// ---------------------------------------------------------------------------

/// A partial (or complete) occurrence: nodes, edges, and sorted edge ids.
#[derive(Debug, Clone, Default)]
pub struct Subgraph {
    /// Nodes in insertion order.
    nodes: Vec<NodeId>,
    /// Full edge copies in insertion order.
    edges: Vec<Edge>,
    /// Edge ids, kept sorted ascending after every insertion.
    edge_ids: Vec<EdgeId>,
    /// `(min, max)` over edge timestamps; `None` while empty.
    span: Option<(Timestamp, Timestamp)>,
}

impl Subgraph {
    /// Creates an empty subgraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty subgraph with vectors pre-sized to the enumeration
    /// bounds, so growth up to the bounds never reallocates.
    pub fn with_capacity(max_nodes: usize, max_edges: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(max_nodes),
            edges: Vec::with_capacity(max_edges),
            edge_ids: Vec::with_capacity(max_edges),
            span: None,
        }
    }

    /// Adds a node. No-op if the node is already present.
    pub fn add_node(&mut self, id: NodeId) {
        if !self.contains_node(id) {
            self.nodes.push(id);
        }
    }

    /// Adds an edge and its id, keeping the edge-id list sorted.
    ///
    /// Both endpoints must already be present in the node set, and the edge
    /// id must not already be present; violations are caller bugs. In
    /// release builds a duplicate id is ignored.
    pub fn add_edge(&mut self, edge: Edge) {
        debug_assert!(
            self.contains_node(edge.source) && self.contains_node(edge.target),
            "edge {} endpoints must be added before the edge",
            edge.id
        );

        let Err(pos) = self.edge_ids.binary_search(&edge.id) else {
            debug_assert!(false, "edge id {} inserted twice", edge.id);
            return;
        };
        self.edge_ids.insert(pos, edge.id);

        self.span = Some(match self.span {
            None => (edge.timestamp, edge.timestamp),
            Some((lo, hi)) => (lo.min(edge.timestamp), hi.max(edge.timestamp)),
        });

        self.edges.push(edge);
    }

    /// Returns `true` if the node is in the node set.
    ///
    /// Linear scan: the node set is bounded by the enumeration's `n_max`
    /// (single digits), where a scan beats any hashed structure.
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains(&id)
    }

    /// Returns `true` if the edge id is present. Binary search over the
    /// sorted id list.
    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edge_ids.binary_search(&id).is_ok()
    }

    /// Number of distinct nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Edge records in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Edge ids, sorted ascending.
    pub fn edge_ids(&self) -> &[EdgeId] {
        &self.edge_ids
    }

    /// `(min, max)` over edge timestamps, or `None` while no edge is
    /// present. The window constraint `max − min ≤ Δ` is checked against
    /// this cached pair.
    pub fn time_span(&self) -> Option<(Timestamp, Timestamp)> {
        self.span
    }

    /// Consumes the subgraph, returning just the sorted edge-id list. The
    /// engine's counted-occurrence set stores these lists rather than whole
    /// subgraphs.
    pub fn into_edge_ids(self) -> Vec<EdgeId> {
        self.edge_ids
    }
}

// Identity is the sorted edge-id list alone; see the module docs.
impl PartialEq for Subgraph {
    fn eq(&self, other: &Self) -> bool {
        self.edge_ids == other.edge_ids
    }
}

impl Eq for Subgraph {}

impl Hash for Subgraph {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.edge_ids.hash(state);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    /// Builds an edge record without a graph.
    fn edge(id: EdgeId, source: NodeId, target: NodeId, timestamp: Timestamp) -> Edge {
        Edge {
            id,
            source,
            target,
            timestamp,
            label: 0,
        }
    }

    /// Adding nodes is idempotent and preserves insertion order.
    #[test]
    fn add_node_idempotent_ordered() {
        let mut s = Subgraph::new();
        s.add_node(5);
        s.add_node(2);
        s.add_node(5);
        assert_eq!(s.nodes(), &[5, 2]);
        assert_eq!(s.node_count(), 2);
    }

    /// Edge ids stay sorted regardless of insertion order.
    #[test]
    fn edge_ids_sorted_after_each_insertion() {
        let mut s = Subgraph::new();
        for n in [0, 1, 2, 3] {
            s.add_node(n);
        }
        s.add_edge(edge(7, 0, 1, 10));
        s.add_edge(edge(2, 1, 2, 20));
        s.add_edge(edge(5, 2, 3, 15));
        assert_eq!(s.edge_ids(), &[2, 5, 7]);
        assert!(s.contains_edge(5));
        assert!(!s.contains_edge(4));
    }

    /// The cached span tracks the min and max edge timestamps.
    #[test]
    fn span_tracks_min_and_max() {
        let mut s = Subgraph::new();
        assert_eq!(s.time_span(), None);
        for n in [0, 1, 2] {
            s.add_node(n);
        }
        s.add_edge(edge(0, 0, 1, 50));
        assert_eq!(s.time_span(), Some((50, 50)));
        s.add_edge(edge(1, 1, 2, 10));
        assert_eq!(s.time_span(), Some((10, 50)));
        s.add_edge(edge(2, 0, 2, 70));
        assert_eq!(s.time_span(), Some((10, 70)));
    }

    /// Equality and hashing consult only the sorted edge-id list.
    #[test]
    fn identity_is_edge_id_list_only() {
        let mut a = Subgraph::new();
        a.add_node(0);
        a.add_node(1);
        a.add_edge(edge(3, 0, 1, 10));
        a.add_edge(edge(8, 1, 0, 20));

        // Same edges discovered in the opposite order, nodes too.
        let mut b = Subgraph::new();
        b.add_node(1);
        b.add_node(0);
        b.add_edge(edge(8, 1, 0, 20));
        b.add_edge(edge(3, 0, 1, 10));

        assert_eq!(a, b);

        let mut set = std::collections::HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    /// Cloning is deep: mutating the clone leaves the original untouched.
    #[test]
    fn clone_is_independent() {
        let mut s = Subgraph::with_capacity(5, 5);
        s.add_node(0);
        s.add_node(1);
        s.add_edge(edge(0, 0, 1, 5));

        let mut t = s.clone();
        t.add_node(2);
        t.add_edge(edge(1, 1, 2, 6));

        assert_eq!(s.edge_count(), 1);
        assert_eq!(t.edge_count(), 2);
        assert_ne!(s, t);
    }

    /// `into_edge_ids` surrenders the sorted list.
    #[test]
    fn into_edge_ids_returns_sorted_list() {
        let mut s = Subgraph::new();
        s.add_node(0);
        s.add_node(1);
        s.add_edge(edge(9, 0, 1, 1));
        s.add_edge(edge(4, 0, 1, 2));
        assert_eq!(s.into_edge_ids(), vec![4, 9]);
    }
}
