// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Topology validation report.
//!
//! Pure aggregation: element counts from the classified document plus the
//! graph metrics become one report. A report with every flag false is a
//! valid, meaningful output; downstream consumers act on it (for example
//! by blocking publication); nothing here throws.

use serde::Serialize;

use crate::metrics::GraphMetrics;

/// Element counts from the classified document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElementCounts {
    pub walls: usize,
    pub floors: usize,
    pub ceilings: usize,
}

/// Summary of detected rooms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoomSummary {
    /// Rooms in the element set, authored or generated.
    pub total: usize,
    /// Rooms synthesized from wall geometry rather than authored.
    pub generated: usize,
}

/// The combined validation report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopologyReport {
    pub has_walls: bool,
    pub has_at_least_one_room_or_space: bool,
    pub has_floor_or_ceiling: bool,
    /// How many spaces were inferred rather than drawn.
    pub rooms_generated: usize,
    /// The whole room layout was inferred, none of it authored.
    pub has_only_generated_rooms: bool,
    pub ifc_space_boundaries: bool,
    pub ifc_voids_relations: bool,
    pub metrics: GraphMetrics,
}

/// Aggregate element, room and graph statistics into one report.
/// Pure: identical inputs always produce an identical report.
pub fn validate(
    elements: &ElementCounts,
    rooms: &RoomSummary,
    metrics: &GraphMetrics,
) -> TopologyReport {
    let spaces = rooms.total + metrics.counts.spaces;

    TopologyReport {
        has_walls: elements.walls > 0,
        has_at_least_one_room_or_space: spaces > 0,
        has_floor_or_ceiling: elements.floors + elements.ceilings > 0,
        rooms_generated: rooms.generated,
        has_only_generated_rooms: spaces > 0 && rooms.generated == spaces,
        ifc_space_boundaries: metrics.counts.sb > 0,
        ifc_voids_relations: metrics.counts.voids > 0,
        metrics: *metrics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::GraphCounts;

    fn metrics(counts: GraphCounts) -> GraphMetrics {
        GraphMetrics::from_counts(counts)
    }

    #[test]
    fn test_flags() {
        let report = validate(
            &ElementCounts {
                walls: 4,
                floors: 1,
                ceilings: 0,
            },
            &RoomSummary {
                total: 2,
                generated: 2,
            },
            &metrics(GraphCounts::default()),
        );

        assert!(report.has_walls);
        assert!(report.has_at_least_one_room_or_space);
        assert!(report.has_floor_or_ceiling);
        assert!(report.has_only_generated_rooms);
        assert_eq!(report.rooms_generated, 2);
    }

    #[test]
    fn test_all_false_report_is_valid() {
        let report = validate(
            &ElementCounts::default(),
            &RoomSummary::default(),
            &metrics(GraphCounts::default()),
        );

        assert!(!report.has_walls);
        assert!(!report.has_at_least_one_room_or_space);
        assert!(!report.has_floor_or_ceiling);
        assert!(!report.has_only_generated_rooms);
        assert!(!report.ifc_space_boundaries);
        assert!(!report.ifc_voids_relations);
    }

    #[test]
    fn test_authored_spaces_clear_only_generated() {
        // One generated room plus one authored IFCSPACE
        let report = validate(
            &ElementCounts {
                walls: 1,
                ..Default::default()
            },
            &RoomSummary {
                total: 1,
                generated: 1,
            },
            &metrics(GraphCounts {
                spaces: 1,
                ..Default::default()
            }),
        );

        assert!(report.has_at_least_one_room_or_space);
        assert!(!report.has_only_generated_rooms);
    }

    #[test]
    fn test_validator_is_pure() {
        let elements = ElementCounts {
            walls: 3,
            floors: 1,
            ceilings: 2,
        };
        let rooms = RoomSummary {
            total: 1,
            generated: 1,
        };
        let m = metrics(GraphCounts {
            doors: 2,
            windows: 1,
            fills: 2,
            spaces: 1,
            sb: 4,
            voids: 2,
        });

        let a = validate(&elements, &rooms, &m);
        let b = validate(&elements, &rooms, &m);
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_report_json_shape() {
        let report = validate(
            &ElementCounts {
                walls: 1,
                ..Default::default()
            },
            &RoomSummary::default(),
            &metrics(GraphCounts {
                doors: 1,
                fills: 1,
                ..Default::default()
            }),
        );
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&report).unwrap()).unwrap();

        assert_eq!(json["hasWalls"], true);
        assert_eq!(json["hasAtLeastOneRoomOrSpace"], false);
        assert_eq!(json["metrics"]["hostMatchRate"], 1.0);
        assert_eq!(json["metrics"]["counts"]["doors"], 1);
        assert!(json["metrics"]["counts"].get("voids").is_none());
    }
}
