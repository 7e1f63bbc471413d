//! Text reader for the node/edge list graph format.
//!
//! The format has three sections in order:
//!
//! 1. a line holding the node count `M`;
//! 2. `M` lines of `<node id> <label>`;
//! 3. edge lines `<source> <target> <timestamp> <label>` until EOF.
//!
//! Values are non-negative integers separated by whitespace. Readers of the
//! original format accept arbitrary spacing, so this one splits each line
//! on any run of whitespace and skips blank (or whitespace-only) lines
//! entirely; the line-based structure is kept so every error can name the
//! 1-based offending line.
//!
//! A node line repeating an earlier id with the *same* label is accepted
//! (insertion is idempotent); repeating it with a different label is an
//! input error, as is an edge referencing an undeclared node.

use std::fmt;

use crate::graph::TemporalGraph;
use crate::types::{Label, NodeId, Timestamp};

// ---------------------------------------------------------------------------
// ParseError
// ---------------------------------------------------------------------------

/// Errors produced while reading a graph file.
///
/// Every variant that corresponds to a concrete input line carries the
/// 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input contains no non-blank line to read the node count from.
    MissingNodeCount,
    /// A token could not be parsed as an integer of the expected kind.
    InvalidInteger {
        /// 1-based line number.
        line: usize,
        /// The offending token.
        token: String,
    },
    /// A line holds the wrong number of whitespace-separated fields.
    WrongFieldCount {
        /// 1-based line number.
        line: usize,
        /// Fields the section requires.
        expected: usize,
        /// Fields actually present.
        found: usize,
    },
    /// The input ended inside the node section.
    MissingNodes {
        /// Node count announced by the header line.
        expected: usize,
        /// Node lines actually read.
        found: usize,
    },
    /// A node id was re-declared with a different label.
    ConflictingNodeLabel {
        /// 1-based line number of the re-declaration.
        line: usize,
        /// The re-declared node id.
        node: NodeId,
        /// The label from the first declaration.
        existing: Label,
        /// The conflicting label.
        conflicting: Label,
    },
    /// An edge references a node id that was never declared.
    UnknownEndpoint {
        /// 1-based line number of the edge.
        line: usize,
        /// The undeclared node id.
        node: NodeId,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingNodeCount => {
                write!(f, "missing node count: input has no non-blank lines")
            }
            ParseError::InvalidInteger { line, token } => {
                write!(f, "line {line}: invalid integer {token:?}")
            }
            ParseError::WrongFieldCount {
                line,
                expected,
                found,
            } => {
                write!(f, "line {line}: expected {expected} fields, found {found}")
            }
            ParseError::MissingNodes { expected, found } => {
                write!(
                    f,
                    "input ended inside the node section: expected {expected} node lines, found {found}"
                )
            }
            ParseError::ConflictingNodeLabel {
                line,
                node,
                existing,
                conflicting,
            } => {
                write!(
                    f,
                    "line {line}: node {node} re-declared with label {conflicting} (was {existing})"
                )
            }
            ParseError::UnknownEndpoint { line, node } => {
                write!(f, "line {line}: edge references undeclared node {node}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

// ---------------------------------------------------------------------------
// parse_graph
// ---------------------------------------------------------------------------

/// Parses `text` into a [`TemporalGraph`] with the given directedness.
///
/// # Errors
///
/// Returns a [`ParseError`] naming the offending line for any structural
/// problem: a bad integer, a malformed line, a truncated node section, a
/// conflicting node re-declaration, or an edge endpoint that was never
/// declared.
pub fn parse_graph(text: &str, directed: bool) -> Result<TemporalGraph, ParseError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l))
        .filter(|(_, l)| !l.trim().is_empty());

    let (header_line, header) = lines.next().ok_or(ParseError::MissingNodeCount)?;
    let node_count: usize = single_field(header_line, header)?;

    let mut graph = TemporalGraph::new(directed);

    for found in 0..node_count {
        let (line, content) = lines.next().ok_or(ParseError::MissingNodes {
            expected: node_count,
            found,
        })?;
        let fields = split_expecting(line, content, 2)?;
        let id: NodeId = parse_token(line, fields[0])?;
        let label: Label = parse_token(line, fields[1])?;

        if let Some(existing) = graph.node_label(id) {
            if existing != label {
                return Err(ParseError::ConflictingNodeLabel {
                    line,
                    node: id,
                    existing,
                    conflicting: label,
                });
            }
        }
        graph.add_node(id, label);
    }

    for (line, content) in lines {
        let fields = split_expecting(line, content, 4)?;
        let source: NodeId = parse_token(line, fields[0])?;
        let target: NodeId = parse_token(line, fields[1])?;
        // Timestamps are non-negative in the format; going through the
        // unsigned parse rejects a leading minus as an invalid integer.
        let timestamp_raw: u64 = parse_token(line, fields[2])?;
        let timestamp = Timestamp::try_from(timestamp_raw)
            .map_err(|_| ParseError::InvalidInteger {
                line,
                token: fields[2].to_owned(),
            })?;
        let label: Label = parse_token(line, fields[3])?;

        for endpoint in [source, target] {
            if graph.node_label(endpoint).is_none() {
                return Err(ParseError::UnknownEndpoint {
                    line,
                    node: endpoint,
                });
            }
        }

        graph.add_edge(source, target, timestamp, label);
    }

    Ok(graph)
}

/// Parses a line that must hold exactly one integer field.
fn single_field<T: std::str::FromStr>(line: usize, content: &str) -> Result<T, ParseError> {
    let fields: Vec<&str> = content.split_whitespace().collect();
    if fields.len() != 1 {
        return Err(ParseError::WrongFieldCount {
            line,
            expected: 1,
            found: fields.len(),
        });
    }
    parse_token(line, fields[0])
}

/// Splits a line on whitespace, requiring exactly `expected` fields.
fn split_expecting(line: usize, content: &str, expected: usize) -> Result<Vec<&str>, ParseError> {
    let fields: Vec<&str> = content.split_whitespace().collect();
    if fields.len() != expected {
        return Err(ParseError::WrongFieldCount {
            line,
            expected,
            found: fields.len(),
        });
    }
    Ok(fields)
}

/// Parses one token, mapping failure to [`ParseError::InvalidInteger`].
fn parse_token<T: std::str::FromStr>(line: usize, token: &str) -> Result<T, ParseError> {
    token.parse().map_err(|_| ParseError::InvalidInteger {
        line,
        token: token.to_owned(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
