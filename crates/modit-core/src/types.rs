//! Scalar types shared across the crate.
//!
//! Node ids come from the input file and are arbitrary non-negative
//! integers; edge ids are dense and assigned in insertion order, so they
//! double as indices into the graph's edge list. Timestamps are kept signed
//! so that window arithmetic (`max − min ≤ Δ`) stays in one type, with
//! saturating operations at the [`DELTA_UNBOUNDED`] sentinel.

/// A node identifier as read from the input file. Sparse, not dense.
pub type NodeId = u64;

/// A dense edge identifier in `[0, |E|)`, assigned in insertion order.
/// Doubles as the index into [`TemporalGraph::edges`].
///
/// [`TemporalGraph::edges`]: crate::graph::TemporalGraph::edges
pub type EdgeId = usize;

/// An edge timestamp. Input values are non-negative; the signed type keeps
/// `max − min` subtraction free of wraparound concerns.
pub type Timestamp = i64;

/// An integer node or edge label.
pub type Label = u64;

/// Sentinel for "no window constraint": a span check against this value
/// always passes, since no two input timestamps are further apart.
pub const DELTA_UNBOUNDED: Timestamp = Timestamp::MAX;

/// Which adjacency index a neighborhood query reads.
///
/// On an undirected graph there is a single reciprocal index and both
/// variants read it; callers that scan both directions on a directed graph
/// should scan the reciprocal index only once for undirected graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Edges leaving the node (keyed by source).
    Out,
    /// Edges arriving at the node (keyed by destination).
    In,
}
