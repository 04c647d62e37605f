//! CSV layout loader.
//!
//! # CSV format
//!
//! Two tables.  Nodes, one row per node:
//!
//! ```csv
//! key,x,y,kind
//! aisle_65,61,65,aisle
//! aisle_60,61,60,aisle
//! altar_left,56,60,walkable
//! ```
//!
//! Edges, one undirected connection per row:
//!
//! ```csv
//! a,b
//! aisle_65,aisle_60
//! aisle_60,altar_left
//! ```
//!
//! **`kind`** is one of `walkable`, `aisle`, `seat`, `altar`
//! (case-insensitive).  A duplicate node key is an error.  Edge rows naming
//! unknown keys are skipped with a warning, mirroring `PathGraph::connect`.
//! Rows the CSV reader rejects surface as `GraphError::Csv`; an unknown
//! `kind` is `GraphError::Parse`.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use molt_core::NodeKind;

use crate::{GraphError, GraphResult, PathGraph};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NodeRecord {
    key:  String,
    x:    f32,
    y:    f32,
    kind: String,
}

#[derive(Deserialize)]
struct EdgeRecord {
    a: String,
    b: String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a layout from a node CSV file and an edge CSV file.
pub fn load_layout_csv(nodes: &Path, edges: &Path) -> GraphResult<PathGraph> {
    let nodes = std::fs::File::open(nodes)?;
    let edges = std::fs::File::open(edges)?;
    load_layout_reader(nodes, edges)
}

/// Like [`load_layout_csv`] but accepts any `Read` sources.
///
/// Useful for embedded layouts (pass a `std::io::Cursor`) and tests.
pub fn load_layout_reader<N: Read, E: Read>(nodes: N, edges: E) -> GraphResult<PathGraph> {
    let mut graph = PathGraph::new();

    // ── Nodes ─────────────────────────────────────────────────────────────
    let mut node_reader = csv::Reader::from_reader(nodes);
    for (line, result) in node_reader.deserialize::<NodeRecord>().enumerate() {
        let row = result?;
        let kind: NodeKind = row
            .kind
            .parse()
            .map_err(|e| GraphError::Parse(format!("node row {}: {e}", line + 1)))?;
        graph.add_node(row.key, row.x, row.y, kind)?;
    }

    // ── Edges ─────────────────────────────────────────────────────────────
    let mut edge_reader = csv::Reader::from_reader(edges);
    for result in edge_reader.deserialize::<EdgeRecord>() {
        let row = result?;
        if !graph.connect(&row.a, &row.b) {
            warn!(a = %row.a, b = %row.b, "layout edge skipped: unknown key or self-loop");
        }
    }

    Ok(graph)
}
