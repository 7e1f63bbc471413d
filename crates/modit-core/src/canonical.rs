//! Canonical labeling of temporal subgraph occurrences.
//!
//! [`canonicalize`] turns an occurrence into a [`CanonicalSubgraph`], a
//! deterministic key under which structurally-temporally equivalent
//! occurrences collapse: same unlabeled temporal structure, same node and
//! edge labels, same *relative* timestamp order. The procedure is:
//!
//! 1. replace each edge timestamp by its rank among the occurrence's
//!    distinct timestamps (invariance under time translation and gaps);
//! 2. build per-node signatures from the rank-normalized incident edges;
//! 3. assign canonical indices greedily, always picking the "largest" node
//!    from a frontier of candidates adjacent to the already-ordered part;
//! 4. emit per-index sorted edge lists through the resulting index map.
//!
//! This is a heuristic canonical form, not a graph isomorphism algorithm:
//! it is exact whenever the ranking tuple distinguishes the occurrence's
//! nodes up to automorphism, which holds for small labeled motifs with
//! distinct timestamps. Occurrences whose nodes tie on every ranking
//! component fall back to a node-id tiebreak, so fully symmetric motifs can
//! split into more than one class. Callers must not substitute a stronger
//! canonicalization; motif counts are defined in terms of this one.

use std::cmp::Ordering;
use std::collections::HashMap;

use itertools::Itertools as _;
use serde::Serialize;

use crate::graph::TemporalGraph;
use crate::subgraph::Subgraph;
use crate::types::{Label, NodeId, Timestamp};

// ---------------------------------------------------------------------------
// CanonicalSubgraph
// ---------------------------------------------------------------------------

/// One outgoing edge of a canonical node: destination index, normalized
/// timestamp rank, and edge label. The derived ordering is the sort order
/// of canonical edge lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CanonicalEdge {
    /// Canonical index of the destination node.
    pub dest: usize,
    /// Rank of the edge's timestamp among the occurrence's distinct
    /// timestamps (0-based).
    pub time_rank: usize,
    /// The edge label.
    pub label: Label,
}

/// The motif-class key: node labels and sorted outgoing edges per canonical
/// index.
///
/// Equality, hashing, and ordering are structural; the derived `Ord` makes
/// the key usable in a `BTreeMap` so result iteration is deterministic.
/// On an undirected occurrence every edge appears twice, once under each
/// endpoint.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CanonicalSubgraph {
    /// Node label per canonical index.
    pub labels: Vec<Label>,
    /// Sorted outgoing [`CanonicalEdge`] list per canonical index.
    pub adjacency: Vec<Vec<CanonicalEdge>>,
}

impl CanonicalSubgraph {
    /// Number of nodes in the motif.
    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    /// Total number of directed arcs in the key. For undirected motifs this
    /// is twice the edge count.
    pub fn arc_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }
}

// ---------------------------------------------------------------------------
// Per-node view used during ordering
// ---------------------------------------------------------------------------

/// Everything the greedy ordering needs to know about one occurrence node.
///
/// `arcs_out`/`arcs_in` hold `(time rank, edge label, local peer index)`
/// triples; the signatures replace the peer index with the peer's node
/// label and are kept sorted so `Vec`'s lexicographic `Ord` is the
/// signature order.
struct NodeView {
    id: NodeId,
    label: Label,
    arcs_out: Vec<(usize, Label, usize)>,
    arcs_in: Vec<(usize, Label, usize)>,
    out_sig: Vec<(usize, Label, Label)>,
    in_sig: Vec<(usize, Label, Label)>,
}

/// Ranking order for the greedy pick: larger is picked first on
/// out-degree, in-degree, node label, out-signature, and in-signature, in
/// that priority. Remaining ties break toward the smaller original node
/// id, which makes the pick deterministic across runs.
fn rank_order(a: &NodeView, b: &NodeView) -> Ordering {
    a.arcs_out
        .len()
        .cmp(&b.arcs_out.len())
        .then_with(|| a.arcs_in.len().cmp(&b.arcs_in.len()))
        .then_with(|| a.label.cmp(&b.label))
        .then_with(|| a.out_sig.cmp(&b.out_sig))
        .then_with(|| a.in_sig.cmp(&b.in_sig))
        .then_with(|| b.id.cmp(&a.id))
}

// ---------------------------------------------------------------------------
// canonicalize
// ---------------------------------------------------------------------------

/// Computes the canonical form of `occurrence` against `graph`.
///
/// `graph` supplies directedness and node labels; `occurrence` must be
/// drawn from it (every occurrence node present in the graph), which the
/// enumeration engine guarantees. On a directed graph each occurrence edge
/// contributes one out-arc and one in-arc; on an undirected graph it
/// contributes an out-arc under *both* endpoints and in-arcs are not used,
/// so an undirected self-loop contributes two coinciding arcs.
///
/// An occurrence that is disconnected in this view does not abort: when the
/// ordering frontier empties early it is reseeded with all remaining nodes,
/// keeping the result deterministic.
pub fn canonicalize(graph: &TemporalGraph, occurrence: &Subgraph) -> CanonicalSubgraph {
    let nodes = occurrence.nodes();
    let k = nodes.len();
    if k == 0 {
        return CanonicalSubgraph {
            labels: Vec::new(),
            adjacency: Vec::new(),
        };
    }
    let directed = graph.is_directed();

    // (a) Timestamp rank normalization over distinct timestamps.
    let rank_of: HashMap<Timestamp, usize> = occurrence
        .edges()
        .iter()
        .map(|e| e.timestamp)
        .sorted_unstable()
        .dedup()
        .enumerate()
        .map(|(rank, t)| (t, rank))
        .collect();

    let local_of: HashMap<NodeId, usize> =
        nodes.iter().enumerate().map(|(i, &id)| (id, i)).collect();

    let mut views: Vec<NodeView> = nodes
        .iter()
        .map(|&id| {
            debug_assert!(
                graph.node_label(id).is_some(),
                "occurrence node {id} missing from graph"
            );
            NodeView {
                id,
                label: graph.node_label(id).unwrap_or_default(),
                arcs_out: Vec::new(),
                arcs_in: Vec::new(),
                out_sig: Vec::new(),
                in_sig: Vec::new(),
            }
        })
        .collect();

    for e in occurrence.edges() {
        let s = local_of[&e.source];
        let t = local_of[&e.target];
        let r = rank_of[&e.timestamp];
        if directed {
            views[s].arcs_out.push((r, e.label, t));
            views[t].arcs_in.push((r, e.label, s));
        } else {
            views[s].arcs_out.push((r, e.label, t));
            views[t].arcs_out.push((r, e.label, s));
        }
    }

    // (b) Signatures: peer index replaced by peer label, sorted.
    let local_labels: Vec<Label> = views.iter().map(|v| v.label).collect();
    for v in &mut views {
        v.out_sig = v
            .arcs_out
            .iter()
            .map(|&(r, el, peer)| (r, el, local_labels[peer]))
            .sorted_unstable()
            .collect();
        v.in_sig = v
            .arcs_in
            .iter()
            .map(|&(r, el, peer)| (r, el, local_labels[peer]))
            .sorted_unstable()
            .collect();
    }

    // One-step neighborhood per local index, for frontier recomputation.
    let neighbors: Vec<Vec<usize>> = views
        .iter()
        .map(|v| {
            v.arcs_out
                .iter()
                .chain(v.arcs_in.iter())
                .map(|&(_, _, peer)| peer)
                .collect()
        })
        .collect();

    // (c) Greedy ordering.
    let mut canonical_of = vec![0usize; k];
    let mut used = vec![false; k];
    for next_index in 0..k {
        let mut frontier: Vec<usize> = if next_index == 0 {
            (0..k).collect()
        } else {
            let mut reachable = vec![false; k];
            for (i, picked) in used.iter().enumerate() {
                if *picked {
                    for &peer in &neighbors[i] {
                        reachable[peer] = true;
                    }
                }
            }
            (0..k).filter(|&i| !used[i] && reachable[i]).collect()
        };
        // A disconnected view strands nodes the frontier cannot reach;
        // reseed with everything unused so ordering still completes.
        if frontier.is_empty() {
            frontier = (0..k).filter(|&i| !used[i]).collect();
        }

        let Some(best) = frontier
            .into_iter()
            .max_by(|&a, &b| rank_order(&views[a], &views[b]))
        else {
            // Unreachable: the reseeded frontier holds every unused node
            // and `next_index < k` guarantees at least one remains.
            break;
        };
        used[best] = true;
        canonical_of[best] = next_index;
    }

    // (d) Remap arcs through the canonical index map.
    let mut labels: Vec<Label> = vec![0; k];
    let mut adjacency: Vec<Vec<CanonicalEdge>> = vec![Vec::new(); k];
    for (i, v) in views.iter().enumerate() {
        let ci = canonical_of[i];
        labels[ci] = v.label;
        let mut list: Vec<CanonicalEdge> = v
            .arcs_out
            .iter()
            .map(|&(r, el, peer)| CanonicalEdge {
                dest: canonical_of[peer],
                time_rank: r,
                label: el,
            })
            .collect();
        list.sort_unstable();
        adjacency[ci] = list;
    }

    CanonicalSubgraph { labels, adjacency }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
