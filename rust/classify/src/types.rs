// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for element classification.

use std::fmt;

use floorsense_core::{Bounds, EntityKind, Layer, Point};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Semantic architectural element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElementType {
    Wall,
    Door,
    Window,
    Floor,
    Ceiling,
    Column,
    Beam,
    Stairs,
    Furniture,
    Plumbing,
    Electrical,
    Hvac,
    Annotation,
    Other,
}

impl ElementType {
    /// Parse the wire token ("WALL", "DOOR", ...). Case-insensitive, since
    /// hosted models are not reliable about casing.
    pub fn parse(token: &str) -> Option<Self> {
        let t = match token.trim().to_ascii_uppercase().as_str() {
            "WALL" => Self::Wall,
            "DOOR" => Self::Door,
            "WINDOW" => Self::Window,
            "FLOOR" => Self::Floor,
            "CEILING" => Self::Ceiling,
            "COLUMN" => Self::Column,
            "BEAM" => Self::Beam,
            "STAIRS" => Self::Stairs,
            "FURNITURE" => Self::Furniture,
            "PLUMBING" => Self::Plumbing,
            "ELECTRICAL" => Self::Electrical,
            "HVAC" => Self::Hvac,
            "ANNOTATION" => Self::Annotation,
            "OTHER" => Self::Other,
            _ => return None,
        };
        Some(t)
    }

    /// Wire token for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wall => "WALL",
            Self::Door => "DOOR",
            Self::Window => "WINDOW",
            Self::Floor => "FLOOR",
            Self::Ceiling => "CEILING",
            Self::Column => "COLUMN",
            Self::Beam => "BEAM",
            Self::Stairs => "STAIRS",
            Self::Furniture => "FURNITURE",
            Self::Plumbing => "PLUMBING",
            Self::Electrical => "ELECTRICAL",
            Self::Hvac => "HVAC",
            Self::Annotation => "ANNOTATION",
            Self::Other => "OTHER",
        }
    }

    /// Load-bearing by convention.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Wall | Self::Floor | Self::Column | Self::Beam)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying one layer.
///
/// Every classifier tier produces this same contract; only the reasoning
/// text reveals which tier ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    #[serde(rename = "type")]
    pub element_type: ElementType,
    /// 0..=100.
    pub confidence: u8,
    pub reasoning: String,
}

/// Summary of a layer handed to classifiers: the name, the entity count,
/// and how many entities of each kind it holds. Classification is a pure
/// function of this profile.
#[derive(Debug, Clone)]
pub struct LayerProfile {
    pub name: String,
    pub entity_count: usize,
    pub kind_counts: FxHashMap<EntityKind, usize>,
}

impl LayerProfile {
    pub fn from_layer(layer: &Layer) -> Self {
        let mut kind_counts = FxHashMap::default();
        for entity in &layer.entities {
            *kind_counts.entry(entity.kind).or_insert(0) += 1;
        }
        Self {
            name: layer.name.clone(),
            entity_count: layer.entities.len(),
            kind_counts,
        }
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.kind_counts.get(&kind).copied().unwrap_or(0)
    }

    /// Entities are exclusively of the given kind (and there is at least one).
    pub fn all_of(&self, kind: EntityKind) -> bool {
        self.entity_count > 0 && self.count(kind) == self.entity_count
    }

    /// Distinct entity kind names, sorted, comma-separated. Sent to the
    /// hosted model as context.
    pub fn kind_summary(&self) -> String {
        let mut kinds: Vec<&str> = self.kind_counts.keys().map(EntityKind::as_str).collect();
        kinds.sort_unstable();
        kinds.join(", ")
    }

    /// Stable cache key: classification depends only on name and shape mix.
    pub fn signature(&self) -> String {
        let mut parts: Vec<String> = self
            .kind_counts
            .iter()
            .map(|(k, n)| format!("{}:{}", k.as_str(), n))
            .collect();
        parts.sort_unstable();
        format!("{}|{}", self.name.to_lowercase(), parts.join(","))
    }
}

/// Geometry of a classified element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementGeometry {
    pub points: Vec<Point>,
    pub bounds: Bounds,
    pub center: Point,
}

/// Optional measured/assigned dimensions, in document units.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Dimensions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
}

/// Non-geometric element properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sill_height: Option<f64>,
    /// 0..=100, inherited from the layer classification.
    pub confidence: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structural: Option<bool>,
    /// Why the layer was classified this way.
    pub reasoning: String,
}

/// One classified element: a layer entity annotated with a semantic type.
///
/// Created by the validator; the dimension assigner fills empty fields
/// once, after which the element is never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedElement {
    pub id: String,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    pub layer: String,
    pub geometry: ElementGeometry,
    pub dimensions: Dimensions,
    pub properties: ElementProperties,
}

/// Coarse room category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomCategory {
    Living,
    Bedroom,
    Kitchen,
    Bathroom,
    Hallway,
    Other,
}

/// A detected bounded region.
///
/// Rooms reference member elements weakly by id; an element belongs to at
/// most one room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub label: String,
    pub category: RoomCategory,
    pub bounds: Bounds,
    pub members: Vec<String>,
    /// True when the region was inferred from wall geometry rather than
    /// authored in the source document.
    pub generated: bool,
}

/// Caller-supplied default dimensions, in document units (typically meters).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentParameters {
    pub wall_height: f64,
    pub door_height: f64,
    pub window_height: f64,
    pub window_sill_height: f64,
    pub ceiling_height: f64,
    pub floor_thickness: f64,
}

impl Default for AgentParameters {
    fn default() -> Self {
        Self {
            wall_height: 2.7,
            door_height: 2.1,
            window_height: 1.5,
            window_sill_height: 0.9,
            ceiling_height: 2.7,
            floor_thickness: 0.15,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_type_round_trip() {
        for token in [
            "WALL",
            "DOOR",
            "WINDOW",
            "FLOOR",
            "CEILING",
            "COLUMN",
            "BEAM",
            "STAIRS",
            "FURNITURE",
            "PLUMBING",
            "ELECTRICAL",
            "HVAC",
            "ANNOTATION",
            "OTHER",
        ] {
            let t = ElementType::parse(token).unwrap();
            assert_eq!(t.as_str(), token);
        }
        assert_eq!(ElementType::parse("wall"), Some(ElementType::Wall));
        assert_eq!(ElementType::parse("GAZEBO"), None);
    }

    #[test]
    fn test_element_type_serde_token() {
        let json = serde_json::to_string(&ElementType::Hvac).unwrap();
        assert_eq!(json, "\"HVAC\"");
        let back: ElementType = serde_json::from_str("\"WALL\"").unwrap();
        assert_eq!(back, ElementType::Wall);
    }

    #[test]
    fn test_layer_profile_signature_is_order_independent() {
        let mut a = FxHashMap::default();
        a.insert(EntityKind::Line, 3);
        a.insert(EntityKind::Circle, 1);
        let p1 = LayerProfile {
            name: "A-Wall".into(),
            entity_count: 4,
            kind_counts: a,
        };

        let mut b = FxHashMap::default();
        b.insert(EntityKind::Circle, 1);
        b.insert(EntityKind::Line, 3);
        let p2 = LayerProfile {
            name: "a-wall".into(),
            entity_count: 4,
            kind_counts: b,
        };

        assert_eq!(p1.signature(), p2.signature());
    }

    #[test]
    fn test_agent_parameters_camel_case() {
        let params: AgentParameters =
            serde_json::from_str(r#"{"wallHeight": 3.0, "doorHeight": 2.0}"#).unwrap();
        assert_eq!(params.wall_height, 3.0);
        assert_eq!(params.door_height, 2.0);
        // Unspecified fields keep their defaults
        assert_eq!(params.window_sill_height, 0.9);
    }
}
