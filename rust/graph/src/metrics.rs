// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structural-completeness metrics derived from the reference graph.

use serde::Serialize;

use crate::graph::IfcGraph;

/// Record counts the metrics are computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GraphCounts {
    pub doors: usize,
    pub windows: usize,
    /// IFCRELFILLSELEMENT records: openings explicitly hosted by a wall.
    pub fills: usize,
    pub spaces: usize,
    /// Space-boundary records, all levels.
    pub sb: usize,
    /// IFCRELVOIDSELEMENT records. Reported as a flag, not under `counts`.
    #[serde(skip)]
    pub voids: usize,
}

/// Completeness metrics consumed by the topology validator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphMetrics {
    /// Fraction of door/window openings with an explicit hosting relation.
    pub host_match_rate: f64,
    /// Average space-boundary records per space; 0 without spaces.
    pub sb_per_space: f64,
    pub counts: GraphCounts,
}

impl GraphMetrics {
    pub fn from_graph(graph: &IfcGraph) -> Self {
        let counts = GraphCounts {
            doors: graph.count_of("IFCDOOR"),
            windows: graph.count_of("IFCWINDOW"),
            fills: graph.count_of("IFCRELFILLSELEMENT"),
            spaces: graph.count_of("IFCSPACE"),
            sb: graph.count_with_prefix("IFCRELSPACEBOUNDARY"),
            voids: graph.count_of("IFCRELVOIDSELEMENT"),
        };
        Self::from_counts(counts)
    }

    pub fn from_counts(counts: GraphCounts) -> Self {
        let openings = counts.doors + counts.windows;
        // Denominator floors at 1 so zero openings stays a plain division;
        // clamped so stray fills records cannot push the rate past 1.
        let host_match_rate =
            (counts.fills as f64 / openings.max(1) as f64).min(1.0);
        let sb_per_space = if counts.spaces == 0 {
            0.0
        } else {
            counts.sb as f64 / counts.spaces as f64
        };

        Self {
            host_match_rate,
            sb_per_space,
            counts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{build_graph, GraphLimits};
    use approx::assert_relative_eq;

    #[test]
    fn test_host_match_rate() {
        let m = GraphMetrics::from_counts(GraphCounts {
            doors: 2,
            windows: 2,
            fills: 3,
            ..Default::default()
        });
        assert_relative_eq!(m.host_match_rate, 0.75);
    }

    #[test]
    fn test_host_match_rate_without_openings() {
        // fills / max(1, 0), a plain division rather than an error
        let m = GraphMetrics::from_counts(GraphCounts {
            fills: 1,
            ..Default::default()
        });
        assert_relative_eq!(m.host_match_rate, 1.0);

        let m = GraphMetrics::from_counts(GraphCounts::default());
        assert_relative_eq!(m.host_match_rate, 0.0);
    }

    #[test]
    fn test_host_match_rate_is_clamped() {
        let m = GraphMetrics::from_counts(GraphCounts {
            doors: 1,
            fills: 5,
            ..Default::default()
        });
        assert_relative_eq!(m.host_match_rate, 1.0);
    }

    #[test]
    fn test_sb_per_space() {
        let m = GraphMetrics::from_counts(GraphCounts {
            spaces: 4,
            sb: 10,
            ..Default::default()
        });
        assert_relative_eq!(m.sb_per_space, 2.5);

        let m = GraphMetrics::from_counts(GraphCounts {
            sb: 10,
            ..Default::default()
        });
        assert_relative_eq!(m.sb_per_space, 0.0);
    }

    #[test]
    fn test_from_graph_counts_boundary_levels() {
        let text = "\
#1=IFCSPACE('s1',$);
#2=IFCRELSPACEBOUNDARY('b1',#1);
#3=IFCRELSPACEBOUNDARY1STLEVEL('b2',#1);
#4=IFCRELSPACEBOUNDARY2NDLEVEL('b3',#1);
#5=IFCDOOR('d1',$);
#6=IFCRELVOIDSELEMENT('v1',#5);
";
        let graph = build_graph(text, &GraphLimits::default());
        let m = GraphMetrics::from_graph(&graph);

        assert_eq!(m.counts.spaces, 1);
        assert_eq!(m.counts.sb, 3);
        assert_eq!(m.counts.doors, 1);
        assert_eq!(m.counts.voids, 1);
        assert_relative_eq!(m.sb_per_space, 3.0);
    }
}
