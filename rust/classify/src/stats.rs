// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Element set statistics.

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::types::{ClassifiedElement, ElementType};

/// Aggregate statistics over a classified element set. Recomputed per run;
/// never stored independently of its inputs.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementStats {
    pub total_elements: usize,
    pub type_counts: FxHashMap<ElementType, usize>,
    pub total_length: f64,
    pub total_area: f64,
    pub average_confidence: f64,
    /// confidence >= 75
    pub high_confidence: usize,
    /// 50 <= confidence < 75
    pub medium_confidence: usize,
    /// confidence < 50
    pub low_confidence: usize,
}

impl ElementStats {
    pub fn from_elements(elements: &[ClassifiedElement]) -> Self {
        let mut stats = Self {
            total_elements: elements.len(),
            ..Default::default()
        };

        let mut confidence_sum = 0u64;
        for element in elements {
            *stats.type_counts.entry(element.element_type).or_insert(0) += 1;
            if let Some(length) = element.dimensions.length {
                stats.total_length += length;
            }
            stats.total_area += element.geometry.bounds.area();

            let c = element.properties.confidence;
            confidence_sum += c as u64;
            match c {
                75.. => stats.high_confidence += 1,
                50..=74 => stats.medium_confidence += 1,
                _ => stats.low_confidence += 1,
            }
        }

        if !elements.is_empty() {
            stats.average_confidence = confidence_sum as f64 / elements.len() as f64;
        }
        stats
    }

    pub fn count(&self, element_type: ElementType) -> usize {
        self.type_counts.get(&element_type).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Dimensions, ElementGeometry, ElementProperties};
    use floorsense_core::{Bounds, Point};

    fn element(t: ElementType, confidence: u8, length: Option<f64>) -> ClassifiedElement {
        ClassifiedElement {
            id: "e".into(),
            element_type: t,
            layer: "L".into(),
            geometry: ElementGeometry {
                points: vec![],
                bounds: Bounds::at(Point::new(0.0, 0.0)),
                center: Point::new(0.0, 0.0),
            },
            dimensions: Dimensions {
                width: None,
                height: None,
                length,
            },
            properties: ElementProperties {
                thickness: None,
                material: None,
                sill_height: None,
                confidence,
                structural: None,
                reasoning: String::new(),
            },
        }
    }

    #[test]
    fn test_counts_and_bands() {
        let elements = vec![
            element(ElementType::Wall, 85, Some(4.0)),
            element(ElementType::Wall, 70, Some(2.0)),
            element(ElementType::Door, 95, None),
            element(ElementType::Other, 40, None),
        ];
        let stats = ElementStats::from_elements(&elements);

        assert_eq!(stats.total_elements, 4);
        assert_eq!(stats.count(ElementType::Wall), 2);
        assert_eq!(stats.count(ElementType::Door), 1);
        assert_eq!(stats.count(ElementType::Window), 0);
        assert_eq!(stats.total_length, 6.0);
        assert_eq!(stats.high_confidence, 2);
        assert_eq!(stats.medium_confidence, 1);
        assert_eq!(stats.low_confidence, 1);
        assert_eq!(stats.average_confidence, 72.5);
    }

    #[test]
    fn test_empty_set() {
        let stats = ElementStats::from_elements(&[]);
        assert_eq!(stats.total_elements, 0);
        assert_eq!(stats.average_confidence, 0.0);
    }
}
