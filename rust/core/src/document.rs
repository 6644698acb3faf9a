// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Upstream document contract.
//!
//! The conversion frontend hands us a JSON document of named layers, each
//! holding raw entity records. Lines and polylines carry an ordered point
//! list; circles carry a center and radius; dimensions and text marks may
//! carry an anchor point. Entities belong to exactly one layer and are
//! immutable once extracted.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Raw entity kind as it appears in the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Line,
    Lwpolyline,
    Circle,
    Dimension,
    Text,
}

impl EntityKind {
    /// Stable lowercase name, matching the wire format.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Line => "line",
            EntityKind::Lwpolyline => "lwpolyline",
            EntityKind::Circle => "circle",
            EntityKind::Dimension => "dimension",
            EntityKind::Text => "text",
        }
    }
}

/// One raw geometric primitive from a CAD layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEntity {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    /// Ordered vertex list for lines/polylines; optional anchor for
    /// dimensions and text.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<[f64; 2]>,
    /// Circle center.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<[f64; 2]>,
    /// Circle radius.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

/// A named group of entities as it appeared in the source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLayer {
    pub name: String,
    #[serde(default)]
    pub entities: Vec<RawEntity>,
}

/// The full source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDocument {
    pub layers: Vec<RawLayer>,
    /// Drawing units per meter hint from the source file.
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Unit name from the source file header, e.g. "meters".
    #[serde(default)]
    pub units: String,
}

fn default_scale() -> f64 {
    1.0
}

impl RawDocument {
    /// Parse a document from its JSON wire form.
    ///
    /// A payload that does not conform to the layer/entity shape is the
    /// single fatal input condition and is returned as
    /// [`Error::InvalidDocument`].
    pub fn from_json(payload: &str) -> Result<Self> {
        serde_json::from_str(payload).map_err(|e| Error::InvalidDocument(e.to_string()))
    }

    /// Total entity count across layers.
    pub fn entity_count(&self) -> usize {
        self.layers.iter().map(|l| l.entities.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document() {
        let payload = r#"{
            "layers": [
                {"name": "A-WALL", "entities": [
                    {"type": "line", "points": [[0.0, 0.0], [5.0, 0.0]]},
                    {"type": "circle", "center": [1.0, 1.0], "radius": 0.3}
                ]},
                {"name": "A-ANNO", "entities": [{"type": "text", "points": [[2.0, 2.0]]}]}
            ],
            "scale": 1.0,
            "units": "meters"
        }"#;

        let doc = RawDocument::from_json(payload).unwrap();
        assert_eq!(doc.layers.len(), 2);
        assert_eq!(doc.entity_count(), 3);
        assert_eq!(doc.layers[0].entities[0].kind, EntityKind::Line);
        assert_eq!(doc.layers[0].entities[1].radius, Some(0.3));
    }

    #[test]
    fn test_missing_layers_is_fatal() {
        let err = RawDocument::from_json(r#"{"scale": 1.0}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidDocument(_)));

        let err = RawDocument::from_json("[]").unwrap_err();
        assert!(matches!(err, Error::InvalidDocument(_)));
    }

    #[test]
    fn test_scale_defaults_to_one() {
        let doc = RawDocument::from_json(r#"{"layers": []}"#).unwrap();
        assert_eq!(doc.scale, 1.0);
        assert!(doc.units.is_empty());
    }
}
