// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Deterministic rule-based classifier.
//!
//! Tier 1 matches the lower-cased layer name against substring patterns in
//! a fixed priority order (drafting conventions put the discipline in the
//! layer name far more often than not). Tier 2, for layers whose names say
//! nothing, guesses from the entity shape mix. The final answer is always
//! OTHER, so this tier is total.

use async_trait::async_trait;

use floorsense_core::EntityKind;

use crate::classifier::Classifier;
use crate::error::Result;
use crate::types::{Classification, ElementType, LayerProfile};

/// Name patterns in priority order. First hit wins.
const NAME_RULES: &[(&[&str], ElementType)] = &[
    (&["wall", "exterior", "interior"], ElementType::Wall),
    (&["door", "opening"], ElementType::Door),
    (&["window", "glazing"], ElementType::Window),
    (&["column", "post", "support"], ElementType::Column),
    (&["beam", "lintel", "header"], ElementType::Beam),
    (&["floor", "slab"], ElementType::Floor),
    (&["ceiling", "overhead"], ElementType::Ceiling),
    (&["stair", "step"], ElementType::Stairs),
    (&["furniture", "fixture", "equipment"], ElementType::Furniture),
    (&["plumbing", "sanitary", "toilet", "sink"], ElementType::Plumbing),
    (&["electrical", "outlet", "switch"], ElementType::Electrical),
    (&["hvac", "duct", "vent"], ElementType::Hvac),
    (&["dim", "text", "note", "annotation"], ElementType::Annotation),
];

/// Confidence for a name-pattern hit.
const NAME_CONFIDENCE: u8 = 85;
/// Confidence for an annotation-only shape mix.
const ANNOTATION_CONFIDENCE: u8 = 90;
/// Confidence for a shape guess (columns from circles, walls from polylines).
const SHAPE_CONFIDENCE: u8 = 70;
/// Confidence when nothing matched.
const DEFAULT_CONFIDENCE: u8 = 50;

/// A layer of mostly circles reads as a column grid only while the count is
/// plausible for one; above this it is more likely a furniture/fixture array.
const COLUMN_CIRCLE_LIMIT: usize = 10;
/// More polylines than this on an unnamed layer reads as wall outlines.
const WALL_POLYLINE_THRESHOLD: usize = 5;

/// Rule-based layer classifier. Stateless; classification is a pure
/// function of the layer profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleClassifier;

impl RuleClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous classification used directly by tests and wrapped by the
    /// [`Classifier`] impl.
    pub fn classify_profile(&self, layer: &LayerProfile) -> Classification {
        if let Some(c) = self.match_name(layer) {
            return c;
        }
        self.match_shape(layer)
    }

    fn match_name(&self, layer: &LayerProfile) -> Option<Classification> {
        let name = layer.name.to_lowercase();
        for (patterns, element_type) in NAME_RULES {
            if let Some(hit) = patterns.iter().find(|p| name.contains(*p)) {
                return Some(Classification {
                    element_type: *element_type,
                    confidence: NAME_CONFIDENCE,
                    reasoning: format!("layer name contains \"{hit}\""),
                });
            }
        }
        None
    }

    fn match_shape(&self, layer: &LayerProfile) -> Classification {
        let circles = layer.count(EntityKind::Circle);
        let polylines = layer.count(EntityKind::Lwpolyline);
        let dimensions = layer.count(EntityKind::Dimension);
        let text = layer.count(EntityKind::Text);

        if layer.entity_count > 0 && dimensions + text == layer.entity_count {
            return Classification {
                element_type: ElementType::Annotation,
                confidence: ANNOTATION_CONFIDENCE,
                reasoning: "layer holds only dimension/text entities".into(),
            };
        }

        if layer.entity_count > 0 && text * 2 > layer.entity_count {
            return Classification {
                element_type: ElementType::Annotation,
                confidence: ANNOTATION_CONFIDENCE,
                reasoning: "layer holds mostly text entities".into(),
            };
        }

        if layer.all_of(EntityKind::Circle) && circles < COLUMN_CIRCLE_LIMIT {
            return Classification {
                element_type: ElementType::Column,
                confidence: SHAPE_CONFIDENCE,
                reasoning: format!("{circles} circle entities suggest a column grid"),
            };
        }

        if polylines > WALL_POLYLINE_THRESHOLD {
            return Classification {
                element_type: ElementType::Wall,
                confidence: SHAPE_CONFIDENCE,
                reasoning: format!("{polylines} polyline entities suggest wall outlines"),
            };
        }

        Classification {
            element_type: ElementType::Other,
            confidence: DEFAULT_CONFIDENCE,
            reasoning: "no name or shape rule matched".into(),
        }
    }
}

#[async_trait]
impl Classifier for RuleClassifier {
    async fn classify(&self, layer: &LayerProfile) -> Result<Classification> {
        Ok(self.classify_profile(layer))
    }
}
