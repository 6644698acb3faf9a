// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room detection from wall geometry.
//!
//! Every closed wall loop with enough area yields one region; with only
//! open wall runs, the outer extent of all walls yields a single region.
//! Non-wall elements are grouped into regions by centroid containment,
//! innermost region first. A document without walls yields no rooms;
//! that outcome is reported by the topology validator, not raised here.

use floorsense_core::{polygon_area, Bounds, Point};

use crate::types::{ClassifiedElement, ElementType, Room, RoomCategory};

/// Room detector with a configurable area floor.
#[derive(Debug, Clone, Copy)]
pub struct RoomDetector {
    /// Smallest enclosed area that counts as a room, in document units².
    pub min_room_area: f64,
}

impl Default for RoomDetector {
    fn default() -> Self {
        Self { min_room_area: 2.0 }
    }
}

impl RoomDetector {
    pub fn new(min_room_area: f64) -> Self {
        Self { min_room_area }
    }

    /// Derive rooms from the element set.
    pub fn detect(&self, elements: &[ClassifiedElement]) -> Vec<Room> {
        let walls: Vec<&ClassifiedElement> = elements
            .iter()
            .filter(|e| e.element_type == ElementType::Wall)
            .collect();
        if walls.is_empty() {
            return Vec::new();
        }

        // Closed wall loops each bound a region; nested loops each count.
        let mut regions: Vec<(Bounds, f64)> = walls
            .iter()
            .filter_map(|wall| {
                let points = &wall.geometry.points;
                if !is_closed(points) {
                    return None;
                }
                let area = polygon_area(points);
                (area >= self.min_room_area).then_some((wall.geometry.bounds, area))
            })
            .collect();

        // Only open wall runs: the outer extent bounds a single region.
        if regions.is_empty() {
            let mut outer = Bounds::new();
            for wall in &walls {
                outer.expand_bounds(&wall.geometry.bounds);
            }
            if outer.area() >= self.min_room_area {
                regions.push((outer, outer.area()));
            }
        }

        // Innermost first, so a nested region claims its members before the
        // loop that encloses it.
        regions.sort_by(|a, b| a.1.total_cmp(&b.1));

        let mut claimed = vec![false; elements.len()];
        let mut rooms: Vec<Room> = regions
            .iter()
            .enumerate()
            .map(|(i, (bounds, _area))| {
                let mut members = Vec::new();
                let mut mix = MemberMix::default();
                for (j, element) in elements.iter().enumerate() {
                    if claimed[j] || element.element_type == ElementType::Wall {
                        continue;
                    }
                    if bounds.contains(element.geometry.center) {
                        claimed[j] = true;
                        mix.add(element.element_type);
                        members.push(element.id.clone());
                    }
                }

                Room {
                    id: format!("room_{}", i + 1),
                    label: format!("Room {}", i + 1),
                    category: mix.category(bounds),
                    bounds: *bounds,
                    members,
                    generated: true,
                }
            })
            .collect();

        // Stable presentation order: biggest room first
        rooms.sort_by(|a, b| b.bounds.area().total_cmp(&a.bounds.area()));
        rooms
    }
}

/// Convenience wrapper using the default area floor.
pub fn detect_rooms(elements: &[ClassifiedElement]) -> Vec<Room> {
    RoomDetector::default().detect(elements)
}

fn is_closed(points: &[Point]) -> bool {
    match (points.first(), points.last()) {
        (Some(a), Some(b)) if points.len() >= 4 => {
            (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
        }
        _ => false,
    }
}

/// What lives in a region decides its coarse category. The upstream
/// contract carries no text labels, so this is the only signal available.
#[derive(Debug, Default)]
struct MemberMix {
    plumbing: usize,
    furniture: usize,
}

impl MemberMix {
    fn add(&mut self, element_type: ElementType) {
        match element_type {
            ElementType::Plumbing => self.plumbing += 1,
            ElementType::Furniture => self.furniture += 1,
            _ => {}
        }
    }

    fn category(&self, bounds: &Bounds) -> RoomCategory {
        if self.plumbing > 0 && self.furniture > 0 {
            return RoomCategory::Kitchen;
        }
        if self.plumbing > 0 {
            return RoomCategory::Bathroom;
        }
        if self.furniture > 0 {
            return RoomCategory::Living;
        }
        let (w, h) = (bounds.width(), bounds.height());
        if w > 0.0 && h > 0.0 && (w / h > 3.0 || h / w > 3.0) {
            return RoomCategory::Hallway;
        }
        RoomCategory::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Dimensions, ElementGeometry, ElementProperties};
    use floorsense_core::{Bounds, Point};

    fn element(id: &str, t: ElementType, points: &[(f64, f64)]) -> ClassifiedElement {
        let pts: Vec<Point> = points.iter().map(|&(x, y)| Point::new(x, y)).collect();
        let mut bounds = Bounds::new();
        for p in &pts {
            bounds.expand(*p);
        }
        let center = bounds.center();
        ClassifiedElement {
            id: id.into(),
            element_type: t,
            layer: "L".into(),
            geometry: ElementGeometry {
                points: pts,
                bounds,
                center,
            },
            dimensions: Dimensions::default(),
            properties: ElementProperties {
                thickness: None,
                material: None,
                sill_height: None,
                confidence: 85,
                structural: None,
                reasoning: "test".into(),
            },
        }
    }

    fn closed_wall(id: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> ClassifiedElement {
        element(
            id,
            ElementType::Wall,
            &[(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)],
        )
    }

    #[test]
    fn test_no_walls_no_rooms() {
        let elements = vec![element("d1", ElementType::Door, &[(0.0, 0.0), (0.9, 0.0)])];
        assert!(detect_rooms(&elements).is_empty());
    }

    #[test]
    fn test_closed_loop_yields_room_with_members() {
        let elements = vec![
            closed_wall("w1", 0.0, 0.0, 6.0, 4.0),
            element("d1", ElementType::Door, &[(1.0, 0.0), (1.9, 0.0)]),
            element("far", ElementType::Door, &[(40.0, 40.0), (40.9, 40.0)]),
        ];
        let rooms = detect_rooms(&elements);

        assert_eq!(rooms.len(), 1);
        assert!(rooms[0].generated);
        assert_eq!(rooms[0].members, vec!["d1".to_string()]);
    }

    #[test]
    fn test_open_walls_fall_back_to_outer_extent() {
        let elements = vec![
            element("w1", ElementType::Wall, &[(0.0, 0.0), (8.0, 0.0)]),
            element("w2", ElementType::Wall, &[(0.0, 0.0), (0.0, 5.0)]),
            element("f1", ElementType::Furniture, &[(2.0, 2.0), (3.0, 3.0)]),
        ];
        let rooms = detect_rooms(&elements);

        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].members, vec!["f1".to_string()]);
        assert_eq!(rooms[0].category, RoomCategory::Living);
    }

    #[test]
    fn test_nested_loop_claims_members_first() {
        let elements = vec![
            closed_wall("outer", 0.0, 0.0, 10.0, 10.0),
            closed_wall("inner", 2.0, 2.0, 5.0, 5.0),
            element("p1", ElementType::Plumbing, &[(3.0, 3.0), (3.5, 3.5)]),
            element("f1", ElementType::Furniture, &[(8.0, 8.0), (8.5, 8.5)]),
        ];
        let rooms = detect_rooms(&elements);
        assert_eq!(rooms.len(), 2);

        // Presented biggest-first; the inner room got the plumbing fixture
        let outer = &rooms[0];
        let inner = &rooms[1];
        assert_eq!(inner.members, vec!["p1".to_string()]);
        assert_eq!(inner.category, RoomCategory::Bathroom);
        assert_eq!(outer.members, vec!["f1".to_string()]);
    }

    #[test]
    fn test_tiny_loop_is_not_a_room() {
        let elements = vec![closed_wall("w1", 0.0, 0.0, 1.0, 1.0)];
        assert!(detect_rooms(&elements).is_empty());
    }

    #[test]
    fn test_hallway_by_aspect_ratio() {
        let elements = vec![closed_wall("w1", 0.0, 0.0, 12.0, 1.5)];
        let rooms = detect_rooms(&elements);
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].category, RoomCategory::Hallway);
    }
}
