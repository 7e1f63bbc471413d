//! Time-indexed temporal graph storage.
//!
//! [`TemporalGraph`] stores labeled nodes, a dense edge list, and per-node
//! adjacency indexed by timestamp. The adjacency is a two-level index:
//!
//! ```text
//! node → BTreeMap<timestamp, HashMap<neighbor, edge id>>
//! ```
//!
//! The outer `BTreeMap` is ordered so the enumeration engine can range-scan
//! a time window `[lo, hi]` in ascending-timestamp order in O(log n + k);
//! the inner `HashMap` answers "is x a neighbor at this instant?" in O(1).
//! Iteration order inside one timestamp bucket is unspecified and never
//! observable in results.
//!
//! Directed graphs maintain an out-index (keyed by source) and an in-index
//! (keyed by destination). Undirected graphs maintain a single reciprocal
//! index in which every edge is registered under both endpoints.
//!
//! A second edge with the same `(node, timestamp, neighbor)` slot silently
//! overwrites the adjacency entry; the dense edge list keeps both records.

use std::collections::{BTreeMap, HashMap};

use crate::types::{Direction, EdgeId, Label, NodeId, Timestamp};

// ---------------------------------------------------------------------------
// Edge
// ---------------------------------------------------------------------------

/// A single timestamped, labeled edge.
///
/// `source`/`target` record the orientation the edge was read in; on an
/// undirected graph both endpoints see the edge through the reciprocal
/// adjacency and the orientation carries no meaning beyond bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    /// Dense id in `[0, |E|)`, assigned in insertion order.
    pub id: EdgeId,
    /// Node the edge leaves (or one endpoint, undirected).
    pub source: NodeId,
    /// Node the edge enters (or the other endpoint, undirected).
    pub target: NodeId,
    /// Integer timestamp.
    pub timestamp: Timestamp,
    /// Integer edge label.
    pub label: Label,
}

/// The per-direction adjacency: node → timestamp → neighbor → edge id.
type TimeIndex = HashMap<NodeId, BTreeMap<Timestamp, HashMap<NodeId, EdgeId>>>;

// ---------------------------------------------------------------------------
// TemporalGraph
// ---------------------------------------------------------------------------

/// A labeled directed or undirected temporal graph.
///
/// Nodes and edges are created once at load time and never removed or
/// relabeled. `add_node` is idempotent with first-write-wins label
/// semantics; edge ids are dense and double as indices into the edge list.
#[derive(Debug)]
pub struct TemporalGraph {
    directed: bool,
    labels: HashMap<NodeId, Label>,
    edges: Vec<Edge>,
    /// Out-adjacency when directed; the reciprocal adjacency when undirected.
    out: TimeIndex,
    /// In-adjacency when directed; unused (empty) when undirected.
    inn: TimeIndex,
}

impl TemporalGraph {
    /// Creates an empty graph with the given directedness.
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            labels: HashMap::new(),
            edges: Vec::new(),
            out: TimeIndex::new(),
            inn: TimeIndex::new(),
        }
    }

    /// Returns `true` if the graph was created directed.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Inserts a node. Idempotent: a second insertion with any label is a
    /// no-op (first write wins).
    pub fn add_node(&mut self, id: NodeId, label: Label) {
        self.labels.entry(id).or_insert(label);
    }

    /// Appends an edge, assigning it the next dense id, and registers it in
    /// the adjacency indices according to directedness.
    ///
    /// Endpoints are not required to have been declared via [`add_node`]
    /// first; the input reader enforces that separately. A write to an
    /// already-occupied `(node, timestamp, neighbor)` adjacency slot
    /// overwrites the stored edge id; the edge list keeps both edges.
    ///
    /// [`add_node`]: TemporalGraph::add_node
    pub fn add_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        timestamp: Timestamp,
        label: Label,
    ) -> EdgeId {
        let id = self.edges.len();
        self.edges.push(Edge {
            id,
            source,
            target,
            timestamp,
            label,
        });

        if self.directed {
            index_insert(&mut self.out, source, timestamp, target, id);
            index_insert(&mut self.inn, target, timestamp, source, id);
        } else {
            // Reciprocal index: the edge is visible from both endpoints.
            // For a self-loop both inserts hit the same slot.
            index_insert(&mut self.out, source, timestamp, target, id);
            index_insert(&mut self.out, target, timestamp, source, id);
        }

        id
    }

    /// Returns the number of distinct nodes.
    pub fn num_nodes(&self) -> usize {
        self.labels.len()
    }

    /// Returns the number of edges (dense id space size).
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Returns the label of `id`, or `None` if the node was never added.
    pub fn node_label(&self, id: NodeId) -> Option<Label> {
        self.labels.get(&id).copied()
    }

    /// Returns the edge with the given dense id, if it exists.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }

    /// Returns all edges in id (insertion) order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Iterates `(neighbor, timestamp, edge id)` entries adjacent to `node`
    /// whose timestamp lies in `[lo, hi]`, in ascending-timestamp order.
    ///
    /// This is the enumeration engine's hot loop. On a directed graph
    /// `direction` selects the out- or in-index; on an undirected graph both
    /// directions read the reciprocal index, so callers wanting "all
    /// incident edges" must scan it only once. An inverted window
    /// (`lo > hi`) yields nothing.
    pub fn neighbors_in_window(
        &self,
        node: NodeId,
        lo: Timestamp,
        hi: Timestamp,
        direction: Direction,
    ) -> impl Iterator<Item = (NodeId, Timestamp, EdgeId)> + '_ {
        let index = match direction {
            Direction::Out => &self.out,
            Direction::In => {
                if self.directed {
                    &self.inn
                } else {
                    &self.out
                }
            }
        };

        let buckets = if lo <= hi { index.get(&node) } else { None };

        buckets.into_iter().flat_map(move |by_time| {
            by_time.range(lo..=hi).flat_map(|(&timestamp, neighbors)| {
                neighbors
                    .iter()
                    .map(move |(&neighbor, &edge_id)| (neighbor, timestamp, edge_id))
            })
        })
    }

    /// Returns `true` if any edge connects `a` and `b` at any timestamp, in
    /// any direction the graph maintains.
    pub fn are_neighbors(&self, a: NodeId, b: NodeId) -> bool {
        if probe(&self.out, a, b) {
            return true;
        }
        self.directed && probe(&self.inn, a, b)
    }
}

/// Inserts `(neighbor → edge_id)` into the timestamp bucket for `node`,
/// overwriting any previous entry in the same slot.
fn index_insert(
    index: &mut TimeIndex,
    node: NodeId,
    timestamp: Timestamp,
    neighbor: NodeId,
    edge_id: EdgeId,
) {
    index
        .entry(node)
        .or_default()
        .entry(timestamp)
        .or_default()
        .insert(neighbor, edge_id);
}

/// Returns `true` if `index` records `to` as a neighbor of `from` in any
/// timestamp bucket.
fn probe(index: &TimeIndex, from: NodeId, to: NodeId) -> bool {
    index
        .get(&from)
        .is_some_and(|by_time| by_time.values().any(|n| n.contains_key(&to)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
