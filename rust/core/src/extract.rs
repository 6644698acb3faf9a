// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry extraction.
//!
//! Normalizes a [`RawDocument`] into layers of [`Entity`] values with
//! bounds and centroid computed once. Malformed entities are dropped
//! silently and tallied; extraction itself never fails.

use smallvec::SmallVec;

use crate::document::{EntityKind, RawDocument, RawEntity};
use crate::geometry::{polyline_length, Bounds, Point};

/// A normalized entity. Immutable once extracted.
#[derive(Debug, Clone)]
pub struct Entity {
    pub kind: EntityKind,
    /// Vertex chain for lines/polylines, anchor for dimensions/text.
    /// Lines are exactly two points, so small chains stay on the stack.
    pub points: SmallVec<[Point; 2]>,
    /// Circle radius, when the entity is a circle.
    pub radius: Option<f64>,
    pub bounds: Bounds,
    /// Centroid of the bounding box.
    pub center: Point,
}

impl Entity {
    /// Chain length in document units. Circles report their diameter,
    /// the span an opening drawn as a circle occupies in plan.
    pub fn length(&self) -> f64 {
        match self.kind {
            EntityKind::Circle => self.radius.map(|r| r * 2.0).unwrap_or(0.0),
            _ => polyline_length(&self.points),
        }
    }

    /// True when the vertex chain closes on itself.
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(a), Some(b)) if self.points.len() >= 4 => {
                (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
            }
            _ => false,
        }
    }
}

/// A named layer of normalized entities.
#[derive(Debug, Clone)]
pub struct Layer {
    pub name: String,
    pub entities: Vec<Entity>,
}

/// Tally of the extraction pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    /// Entities present in the source document.
    pub seen: usize,
    /// Entities that survived normalization.
    pub kept: usize,
    /// Malformed entities dropped (too few points, bad radius).
    pub dropped: usize,
}

/// Extraction result: the document structure, normalized.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub layers: Vec<Layer>,
    /// Union bounds over all kept entities.
    pub bounds: Bounds,
    pub stats: ExtractStats,
}

/// Normalize a raw document.
///
/// Every kept entity exposes its bounding box and centroid. Entities that
/// cannot produce a valid box are dropped and counted in
/// [`ExtractStats::dropped`]; no error is raised for them.
pub fn extract(doc: &RawDocument) -> ExtractedDocument {
    let mut stats = ExtractStats::default();
    let mut bounds = Bounds::new();

    let layers = doc
        .layers
        .iter()
        .map(|layer| {
            let entities = layer
                .entities
                .iter()
                .filter_map(|raw| {
                    stats.seen += 1;
                    match normalize(raw) {
                        Some(entity) => {
                            stats.kept += 1;
                            bounds.expand_bounds(&entity.bounds);
                            Some(entity)
                        }
                        None => {
                            stats.dropped += 1;
                            None
                        }
                    }
                })
                .collect();

            Layer {
                name: layer.name.clone(),
                entities,
            }
        })
        .collect();

    ExtractedDocument {
        layers,
        bounds,
        stats,
    }
}

fn normalize(raw: &RawEntity) -> Option<Entity> {
    match raw.kind {
        EntityKind::Line | EntityKind::Lwpolyline => {
            if raw.points.len() < 2 {
                return None;
            }
            let points: SmallVec<[Point; 2]> =
                raw.points.iter().map(|&p| Point::from(p)).collect();
            if points.iter().any(|p| !p.is_finite()) {
                return None;
            }

            let mut bounds = Bounds::new();
            for p in &points {
                bounds.expand(*p);
            }
            let center = bounds.center();
            Some(Entity {
                kind: raw.kind,
                points,
                radius: None,
                bounds,
                center,
            })
        }
        EntityKind::Circle => {
            let center = Point::from(raw.center?);
            let radius = raw.radius?;
            if !center.is_finite() || !radius.is_finite() || radius <= 0.0 {
                return None;
            }

            let mut bounds = Bounds::new();
            bounds.expand(Point::new(center.x - radius, center.y - radius));
            bounds.expand(Point::new(center.x + radius, center.y + radius));
            Some(Entity {
                kind: raw.kind,
                points: SmallVec::new(),
                radius: Some(radius),
                bounds,
                center,
            })
        }
        EntityKind::Dimension | EntityKind::Text => {
            // Annotation marks carry at most an anchor; a markless record
            // still classifies, so it degenerates to the origin.
            let anchor = raw
                .points
                .first()
                .map(|&p| Point::from(p))
                .filter(Point::is_finite)
                .unwrap_or(Point::new(0.0, 0.0));

            let points = if raw.points.is_empty() {
                SmallVec::new()
            } else {
                SmallVec::from_slice(&[anchor])
            };
            Some(Entity {
                kind: raw.kind,
                points,
                radius: None,
                bounds: Bounds::at(anchor),
                center: anchor,
            })
        }
    }
}
