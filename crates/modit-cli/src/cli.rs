//! Clap CLI definition: the flat argument surface of the `modit` binary.
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use modit_core::Timestamp;

/// A CLI argument that is either a filesystem path or the stdin sentinel
/// `"-"`.
///
/// Parsing `"-"` yields [`PathOrStdin::Stdin`]; anything else yields
/// [`PathOrStdin::Path`]. This avoids stringly-typed handling of the stdin
/// sentinel throughout the codebase.
#[derive(Clone, Debug)]
pub enum PathOrStdin {
    /// Read from standard input.
    Stdin,
    /// Read from the given filesystem path.
    Path(PathBuf),
}

impl PathOrStdin {
    /// A human-readable label for error messages: the path, or `"-"`.
    pub fn label(&self) -> String {
        match self {
            PathOrStdin::Stdin => "-".to_owned(),
            PathOrStdin::Path(path) => path.display().to_string(),
        }
    }
}

impl std::str::FromStr for PathOrStdin {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(PathOrStdin::Stdin)
        } else {
            Ok(PathOrStdin::Path(PathBuf::from(s)))
        }
    }
}

/// Output format for the motif report.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable blocks, one per motif class (default).
    Human,
    /// A single JSON object holding every class and its count.
    Json,
}

/// Mine frequent temporal motifs in a labeled temporal network.
///
/// Reads a graph file (node count, `id label` node lines, then
/// `src dst timestamp label` edge lines), enumerates every connected
/// occurrence within the size bounds whose edge timestamps fit in the
/// sliding window, and reports the distinct motif classes with their
/// occurrence counts.
#[derive(Debug, Parser)]
#[command(name = "modit", version)]
pub struct Cli {
    /// Input graph file, or `-` for stdin.
    #[arg(short = 't', long = "target", value_name = "FILE")]
    pub target: PathOrStdin,

    /// Maximum timestamp span of an occurrence (default: unbounded).
    #[arg(short = 'd', long = "delta", value_name = "INT")]
    pub delta: Option<Timestamp>,

    /// Treat the graph as undirected (default: directed).
    #[arg(short = 'u', long = "undirected")]
    pub undirected: bool,

    /// Maximum nodes per occurrence.
    #[arg(short = 'n', long = "max-nodes", value_name = "INT", default_value_t = 5)]
    pub max_nodes: usize,

    /// Maximum edges per occurrence.
    #[arg(short = 'e', long = "max-edges", value_name = "INT", default_value_t = 5)]
    pub max_edges: usize,

    /// Output format: human (default) or json.
    #[arg(long, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Print graph statistics and periodic mining progress to stderr.
    #[arg(long)]
    pub verbose: bool,

    /// Suppress the trailing summary line in human output.
    #[arg(long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use clap::Parser as _;

    use super::*;

    /// Defaults: directed, bounds 5/5, unbounded window, human format.
    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["modit", "-t", "graph.txt"]).expect("valid args");
        assert!(matches!(cli.target, PathOrStdin::Path(_)));
        assert_eq!(cli.delta, None);
        assert!(!cli.undirected);
        assert_eq!(cli.max_nodes, 5);
        assert_eq!(cli.max_edges, 5);
        assert!(matches!(cli.format, OutputFormat::Human));
        assert!(!cli.verbose);
        assert!(!cli.quiet);
    }

    /// All short flags parse.
    #[test]
    fn short_flags() {
        let cli = Cli::try_parse_from(["modit", "-t", "g", "-d", "10", "-u", "-n", "3", "-e", "4"])
            .expect("valid args");
        assert_eq!(cli.delta, Some(10));
        assert!(cli.undirected);
        assert_eq!(cli.max_nodes, 3);
        assert_eq!(cli.max_edges, 4);
    }

    /// The stdin sentinel parses into its own variant.
    #[test]
    fn stdin_sentinel() {
        let cli = Cli::try_parse_from(["modit", "-t", "-"]).expect("valid args");
        assert!(matches!(cli.target, PathOrStdin::Stdin));
        assert_eq!(cli.target.label(), "-");
    }

    /// The target flag is required.
    #[test]
    fn missing_target_rejected() {
        assert!(Cli::try_parse_from(["modit"]).is_err());
    }

    /// A non-integer delta is rejected by clap.
    #[test]
    fn non_integer_delta_rejected() {
        assert!(Cli::try_parse_from(["modit", "-t", "g", "-d", "soon"]).is_err());
    }

    /// The json format value parses.
    #[test]
    fn json_format() {
        let cli =
            Cli::try_parse_from(["modit", "-t", "g", "--format", "json"]).expect("valid args");
        assert!(matches!(cli.format, OutputFormat::Json));
    }
}
