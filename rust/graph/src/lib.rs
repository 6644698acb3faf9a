// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Floorsense Graph
//!
//! Bounded reference-graph extraction from IFC text exports, plus the
//! topology validator that turns element and graph statistics into one
//! pass/fail report.
//!
//! The builder is deliberately line-oriented: it recognizes record headers
//! (`#123 = IFCWALL(`) and collects `#N` reference tokens without parsing
//! attribute structure, which keeps it robust across schema variants at the
//! cost of precision. Node and edge collections are append-only and capped
//! to bound memory on pathological inputs.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use floorsense_graph::{build_graph, GraphLimits, GraphMetrics};
//!
//! let graph = build_graph(ifc_text, &GraphLimits::default());
//! let metrics = GraphMetrics::from_graph(&graph);
//! println!("host match rate {:.2}", metrics.host_match_rate);
//! ```

pub mod error;
pub mod graph;
pub mod metrics;
pub mod report;
pub mod scan;

pub use error::{Error, Result};
pub use graph::{build_graph, GraphEdge, GraphLimits, GraphNode, IfcGraph};
pub use metrics::{GraphCounts, GraphMetrics};
pub use report::{validate, ElementCounts, RoomSummary, TopologyReport};
pub use scan::{leading_id, parse_record_header, reference_ids};
