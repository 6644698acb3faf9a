// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pipeline configuration loaded from environment variables.

use floorsense_graph::GraphLimits;

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum concurrent hosted-model calls across layers.
    pub ai_concurrency: usize,
    /// Classification cache capacity (distinct layer signatures).
    pub cache_capacity: usize,
    /// Node/edge caps for graph extraction.
    pub graph_limits: GraphLimits,
}

impl PipelineConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            ai_concurrency: std::env::var("AI_CONCURRENCY")
                .unwrap_or_else(|_| "4".into())
                .parse()
                .unwrap_or(4),
            cache_capacity: std::env::var("CLASSIFY_CACHE_CAPACITY")
                .unwrap_or_else(|_| "1024".into())
                .parse()
                .unwrap_or(1024),
            graph_limits: GraphLimits {
                max_nodes: std::env::var("GRAPH_MAX_NODES")
                    .unwrap_or_else(|_| "2000".into())
                    .parse()
                    .unwrap_or(2000),
                max_edges: std::env::var("GRAPH_MAX_EDGES")
                    .unwrap_or_else(|_| "4000".into())
                    .parse()
                    .unwrap_or(4000),
            },
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            ai_concurrency: 4,
            cache_capacity: 1024,
            graph_limits: GraphLimits::default(),
        }
    }
}
