//! Motif report formatting: human-readable blocks and JSON.
//!
//! Both writers iterate the `BTreeMap` result in its canonical-form order,
//! so output is byte-stable across runs for the same input.
//!
//! - **Human mode** (default): one block per motif class listing each
//!   canonical node with its label and sorted outgoing edges, then the
//!   occurrence count; a trailing summary line unless `--quiet`.
//! - **JSON mode**: a single object with a `classes` array (each class
//!   flattened together with its `count`) and `total_occurrences`.
use std::collections::BTreeMap;
use std::io::Write;

use modit_core::CanonicalSubgraph;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Human mode
// ---------------------------------------------------------------------------

/// Writes the motif report in human-readable blocks.
///
/// ```text
/// motif 0
///   node 0: label 1
///     -> (dest=1, t=0, label=7)
///   node 1: label 2
///   count: 1
///
/// 1 motif class, 1 occurrence
/// ```
///
/// # Errors
///
/// Returns an error only if writing to `out` fails.
pub fn write_human<W: Write>(
    out: &mut W,
    counts: &BTreeMap<CanonicalSubgraph, u64>,
    quiet: bool,
) -> std::io::Result<()> {
    for (index, (class, count)) in counts.iter().enumerate() {
        writeln!(out, "motif {index}")?;
        for (node, label) in class.labels.iter().enumerate() {
            writeln!(out, "  node {node}: label {label}")?;
            for arc in &class.adjacency[node] {
                writeln!(
                    out,
                    "    -> (dest={}, t={}, label={})",
                    arc.dest, arc.time_rank, arc.label
                )?;
            }
        }
        writeln!(out, "  count: {count}")?;
        writeln!(out)?;
    }

    if !quiet {
        let occurrences: u64 = counts.values().sum();
        writeln!(
            out,
            "{} {}, {} {}",
            counts.len(),
            plural(counts.len() as u64, "motif class", "motif classes"),
            occurrences,
            plural(occurrences, "occurrence", "occurrences"),
        )?;
    }
    Ok(())
}

/// Picks the singular or plural noun.
fn plural<'a>(n: u64, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 { one } else { many }
}

// ---------------------------------------------------------------------------
// JSON mode
// ---------------------------------------------------------------------------

/// One motif class together with its occurrence count.
#[derive(Serialize)]
struct ReportClass<'a> {
    #[serde(flatten)]
    class: &'a CanonicalSubgraph,
    count: u64,
}

/// The full JSON report.
#[derive(Serialize)]
struct Report<'a> {
    classes: Vec<ReportClass<'a>>,
    total_occurrences: u64,
}

/// Writes the motif report as a single JSON object followed by a newline.
///
/// # Errors
///
/// Returns an error only if serialization or writing to `out` fails.
pub fn write_json<W: Write>(
    out: &mut W,
    counts: &BTreeMap<CanonicalSubgraph, u64>,
) -> std::io::Result<()> {
    let report = Report {
        classes: counts
            .iter()
            .map(|(class, &count)| ReportClass { class, count })
            .collect(),
        total_occurrences: counts.values().sum(),
    };
    serde_json::to_writer(&mut *out, &report).map_err(std::io::Error::other)?;
    writeln!(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
