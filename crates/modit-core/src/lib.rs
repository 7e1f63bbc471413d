#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod canonical;
pub mod file_parse;
pub mod graph;
pub mod solver;
pub mod subgraph;
pub mod types;

pub use canonical::{CanonicalEdge, CanonicalSubgraph, canonicalize};
pub use file_parse::{ParseError, parse_graph};
pub use graph::{Edge, TemporalGraph};
pub use solver::{MotifSolver, Progress, SolverError};
pub use subgraph::Subgraph;
pub use types::{DELTA_UNBOUNDED, Direction, EdgeId, Label, NodeId, Timestamp};

/// Returns the current version of the modit-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn version_is_semver() {
        let v = version();
        let parts: Vec<&str> = v.split('.').collect();
        assert_eq!(parts.len(), 3, "version should have 3 parts: {v}");
        for part in parts {
            part.parse::<u32>().expect("each part should be a number");
        }
    }
}
