// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bounded IFC reference graph.
//!
//! Two passes over the text: the first discovers record definitions as
//! nodes (capped), the second turns cross-references between known records
//! into directed edges (capped). Both collections are append-only.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use crate::scan::{leading_id, parse_record_header, reference_ids};

/// Size caps for graph building. Pathological exports stop accumulating at
/// these bounds instead of exhausting memory.
#[derive(Debug, Clone, Copy)]
pub struct GraphLimits {
    pub max_nodes: usize,
    pub max_edges: usize,
}

impl Default for GraphLimits {
    fn default() -> Self {
        Self {
            max_nodes: 2000,
            max_edges: 4000,
        }
    }
}

/// One parsed IFC record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    /// Source-assigned identifier, e.g. `#123`.
    pub id: String,
    /// Declared IFC type string, e.g. `IFCWALL`.
    #[serde(rename = "type")]
    pub type_name: String,
}

/// Directed reference from one record's definition line to another record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
struct SizeCounts {
    nodes: usize,
    edges: usize,
}

/// The extracted graph with per-type counts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IfcGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    counts: SizeCounts,
    pub type_counts: FxHashMap<String, usize>,
}

impl IfcGraph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Count of records with exactly this type name.
    pub fn count_of(&self, type_name: &str) -> usize {
        self.type_counts.get(type_name).copied().unwrap_or(0)
    }

    /// Count of records whose type name starts with the prefix. Used for
    /// families like IFCRELSPACEBOUNDARY / ...1STLEVEL / ...2NDLEVEL.
    pub fn count_with_prefix(&self, prefix: &str) -> usize {
        self.type_counts
            .iter()
            .filter(|(name, _)| name.starts_with(prefix))
            .map(|(_, n)| n)
            .sum()
    }

    /// JSON wire form: `{nodes, edges, counts, typeCounts}`.
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Build the reference graph from IFC-like text, one record per line.
///
/// Garbage and empty input produce an empty graph; nothing here errors.
pub fn build_graph(text: &str, limits: &GraphLimits) -> IfcGraph {
    // Pass 1: record definitions become nodes, first max_nodes in file order.
    let mut nodes = Vec::new();
    let mut known: FxHashSet<u32> = FxHashSet::default();
    let mut type_counts: FxHashMap<String, usize> = FxHashMap::default();

    for line in text.lines() {
        if nodes.len() >= limits.max_nodes {
            break;
        }
        if let Some((id, type_name)) = parse_record_header(line) {
            if !known.insert(id) {
                continue; // duplicate definition keeps its first type
            }
            *type_counts.entry(type_name.to_string()).or_insert(0) += 1;
            nodes.push(GraphNode {
                id: format!("#{id}"),
                type_name: type_name.to_string(),
            });
        }
    }

    // Pass 2: references on a known record's line become directed edges.
    let mut edges = Vec::new();
    'lines: for line in text.lines() {
        if edges.len() >= limits.max_edges {
            break;
        }
        let Some(from) = leading_id(line) else {
            continue;
        };
        if !known.contains(&from) {
            continue;
        }

        for to in reference_ids(line) {
            if to == from || !known.contains(&to) {
                continue;
            }
            edges.push(GraphEdge {
                from: format!("#{from}"),
                to: format!("#{to}"),
            });
            if edges.len() >= limits.max_edges {
                continue 'lines;
            }
        }
    }

    let counts = SizeCounts {
        nodes: nodes.len(),
        edges: edges.len(),
    };
    IfcGraph {
        nodes,
        edges,
        counts,
        type_counts,
    }
}
