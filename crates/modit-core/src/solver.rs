//! Subgraph enumeration and motif counting.
//!
//! [`MotifSolver`] grows connected occurrences outward from every edge of
//! the graph, subject to three admission rules: at most `n_max` nodes, at
//! most `e_max` edges, and a timestamp span of at most `delta`. Every
//! distinct occurrence (identified by its sorted edge-id list) is counted
//! exactly once under its canonical form; the result is the map from
//! canonical form to occurrence count.
//!
//! The engine is single-threaded. The graph is read-only during a run; the
//! only mutable state is the counted-occurrence set and the count map, both
//! owned by the running call.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::canonical::{CanonicalSubgraph, canonicalize};
use crate::graph::TemporalGraph;
use crate::subgraph::Subgraph;
use crate::types::{Direction, EdgeId, Timestamp};

// ---------------------------------------------------------------------------
// SolverError
// ---------------------------------------------------------------------------

/// Errors rejected at solver construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// The size bounds cannot admit any occurrence: an occurrence has at
    /// least one edge and (for a non-loop edge) two nodes.
    InvalidBounds {
        /// The rejected node bound.
        n_max: usize,
        /// The rejected edge bound.
        e_max: usize,
    },
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverError::InvalidBounds { n_max, e_max } => {
                write!(
                    f,
                    "invalid bounds: need n_max >= 2 and e_max >= 1, got n_max={n_max}, e_max={e_max}"
                )
            }
        }
    }
}

impl std::error::Error for SolverError {}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Snapshot handed to the progress observer once per seed edge.
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    /// Seeds fully processed so far.
    pub seeds_done: usize,
    /// Total number of seeds (= number of edges).
    pub seed_total: usize,
    /// Occurrences counted so far.
    pub occurrences: u64,
    /// Distinct motif classes so far.
    pub classes: usize,
}

// ---------------------------------------------------------------------------
// MotifSolver
// ---------------------------------------------------------------------------

/// The enumeration engine. Borrows the graph immutably for its lifetime;
/// bounds are validated once at construction.
#[derive(Debug)]
pub struct MotifSolver<'g> {
    graph: &'g TemporalGraph,
    n_max: usize,
    e_max: usize,
}

impl<'g> MotifSolver<'g> {
    /// Creates a solver over `graph` with the given size bounds.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::InvalidBounds`] when `n_max < 2` or
    /// `e_max < 1`.
    pub fn new(graph: &'g TemporalGraph, n_max: usize, e_max: usize) -> Result<Self, SolverError> {
        if n_max < 2 || e_max < 1 {
            return Err(SolverError::InvalidBounds { n_max, e_max });
        }
        Ok(Self {
            graph,
            n_max,
            e_max,
        })
    }

    /// Enumerates all occurrences within the bounds and the `delta` window
    /// and returns the count per canonical form.
    ///
    /// `delta` bounds the *span* `max_ts − min_ts` of an occurrence's
    /// edges: `0` restricts to simultaneous-edge motifs,
    /// [`DELTA_UNBOUNDED`] disables the constraint, and a negative value
    /// admits nothing. The `BTreeMap` result iterates in canonical-form
    /// order, so downstream output is deterministic.
    ///
    /// [`DELTA_UNBOUNDED`]: crate::types::DELTA_UNBOUNDED
    pub fn find_motifs(&self, delta: Timestamp) -> BTreeMap<CanonicalSubgraph, u64> {
        self.find_motifs_with_progress(delta, |_| true)
    }

    /// Like [`find_motifs`], invoking `observer` before each seed edge is
    /// processed. When the observer returns `false` the run stops between
    /// seeds and the counts accumulated so far are returned.
    ///
    /// [`find_motifs`]: MotifSolver::find_motifs
    pub fn find_motifs_with_progress(
        &self,
        delta: Timestamp,
        mut observer: impl FnMut(Progress) -> bool,
    ) -> BTreeMap<CanonicalSubgraph, u64> {
        let mut counts: BTreeMap<CanonicalSubgraph, u64> = BTreeMap::new();
        if delta < 0 {
            return counts;
        }

        // Occurrence identity is the sorted edge-id list; storing only the
        // lists keeps the set lean over combinatorial workloads.
        let mut counted: HashSet<Vec<EdgeId>> = HashSet::new();
        let mut occurrences: u64 = 0;
        let seed_total = self.graph.num_edges();
        let mut stack: Vec<Subgraph> = Vec::new();

        for (seeds_done, &seed_edge) in self.graph.edges().iter().enumerate() {
            let keep_going = observer(Progress {
                seeds_done,
                seed_total,
                occurrences,
                classes: counts.len(),
            });
            if !keep_going {
                break;
            }

            let mut seed = Subgraph::with_capacity(self.n_max, self.e_max);
            seed.add_node(seed_edge.source);
            seed.add_node(seed_edge.target);
            seed.add_edge(seed_edge);

            if counted.insert(seed.edge_ids().to_vec()) {
                *counts.entry(canonicalize(self.graph, &seed)).or_insert(0) += 1;
                occurrences += 1;
                if seed.edge_count() < self.e_max {
                    stack.push(seed);
                }
            }

            while let Some(current) = stack.pop() {
                for edge_id in self.frontier(&current, delta) {
                    let Some(&edge) = self.graph.edge(edge_id) else {
                        // Frontier ids come from the adjacency indices and
                        // always resolve.
                        continue;
                    };

                    let mut child = current.clone();
                    child.add_node(edge.source);
                    child.add_node(edge.target);
                    child.add_edge(edge);

                    if counted.insert(child.edge_ids().to_vec()) {
                        *counts.entry(canonicalize(self.graph, &child)).or_insert(0) += 1;
                        occurrences += 1;
                        if child.edge_count() < self.e_max {
                            stack.push(child);
                        }
                    }
                }
            }
        }

        counts
    }

    /// Collects the ids of all edges by which `current` may grow: incident
    /// to some node of the occurrence, not yet part of it, inside the
    /// admissible time window, and within the node bound.
    ///
    /// A timestamp `t` keeps the span within `delta` exactly when
    /// `t ∈ [t_max − delta, t_min + delta]`, so each occurrence node's
    /// adjacency is range-scanned over that window (saturating at the
    /// unbounded sentinel). The same edge may be reachable from both of its
    /// endpoints; the returned set holds it once.
    fn frontier(&self, current: &Subgraph, delta: Timestamp) -> BTreeSet<EdgeId> {
        let mut admissible = BTreeSet::new();
        let Some((t_min, t_max)) = current.time_span() else {
            return admissible;
        };
        let lo = t_max.saturating_sub(delta);
        let hi = t_min.saturating_add(delta);
        let may_add_node = current.node_count() < self.n_max;

        // On an undirected graph the reciprocal index is scanned once per
        // node; scanning it under both directions would be redundant.
        let directions: &[Direction] = if self.graph.is_directed() {
            &[Direction::Out, Direction::In]
        } else {
            &[Direction::Out]
        };

        for &node in current.nodes() {
            for &direction in directions {
                for (neighbor, _, edge_id) in
                    self.graph.neighbors_in_window(node, lo, hi, direction)
                {
                    if current.contains_edge(edge_id) {
                        continue;
                    }
                    if !may_add_node && !current.contains_node(neighbor) {
                        continue;
                    }
                    admissible.insert(edge_id);
                }
            }
        }

        admissible
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
