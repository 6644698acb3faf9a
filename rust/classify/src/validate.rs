// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Element validation and dimension assignment.
//!
//! Expands a classified layer into one element per qualifying entity.
//! Candidates that fail their type's geometric gate are dropped, not
//! errored, and tallied so the review sheet can ask a human about them.
//! Survivors receive defaults (thickness, material, structural flag) and
//! caller-supplied heights. The fill-in only touches empty fields, so
//! running it twice changes nothing.

use rustc_hash::FxHashMap;
use serde::Serialize;

use floorsense_core::{Entity, EntityKind, Layer};

use crate::types::{
    AgentParameters, Classification, ClassifiedElement, Dimensions, ElementGeometry,
    ElementProperties, ElementType,
};

/// Geometric gates and default thicknesses, in document units.
///
/// Explicit configuration rather than module constants, so deployments and
/// tests can override per call site.
#[derive(Debug, Clone)]
pub struct DimensionRules {
    /// Shortest stretch of drawing that still reads as a wall.
    pub wall_min_length: f64,
    pub door_width_range: (f64, f64),
    pub door_standard_widths: Vec<f64>,
    pub window_width_range: (f64, f64),
    pub window_standard_widths: Vec<f64>,
    /// Minimum footprint for kitchen fixture regions.
    pub kitchen_min_area: f64,
    /// Minimum footprint for sanitary fixture regions.
    pub sanitary_min_area: f64,
    pub wall_thickness: f64,
    pub ceiling_thickness: f64,
    /// Minimum enclosed area that counts as a room.
    pub min_room_area: f64,
    /// Confidence bonus for catalog-standard opening widths.
    pub standard_width_bonus: u8,
}

impl Default for DimensionRules {
    fn default() -> Self {
        Self {
            wall_min_length: 0.5,
            door_width_range: (0.6, 1.2),
            door_standard_widths: vec![0.6, 0.7, 0.8, 0.9, 1.0, 1.1, 1.2],
            window_width_range: (0.5, 3.0),
            window_standard_widths: vec![0.6, 0.8, 1.0, 1.2, 1.5, 1.8, 2.0, 2.4, 3.0],
            kitchen_min_area: 2.0,
            sanitary_min_area: 1.0,
            wall_thickness: 0.2,
            ceiling_thickness: 0.1,
            min_room_area: 2.0,
            standard_width_bonus: 10,
        }
    }
}

/// Default material per element type.
#[derive(Debug, Clone)]
pub struct MaterialDefaults {
    table: FxHashMap<ElementType, &'static str>,
}

impl Default for MaterialDefaults {
    fn default() -> Self {
        let mut table = FxHashMap::default();
        table.insert(ElementType::Wall, "concrete");
        table.insert(ElementType::Floor, "concrete");
        table.insert(ElementType::Ceiling, "gypsum");
        table.insert(ElementType::Door, "wood");
        table.insert(ElementType::Window, "glass");
        table.insert(ElementType::Column, "concrete");
        table.insert(ElementType::Beam, "steel");
        Self { table }
    }
}

impl MaterialDefaults {
    pub fn get(&self, element_type: ElementType) -> Option<&'static str> {
        self.table.get(&element_type).copied()
    }

    pub fn set(&mut self, element_type: ElementType, material: &'static str) {
        self.table.insert(element_type, material);
    }
}

/// Per-type count of rejected candidates, for the external review sheet.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RejectionTally {
    counts: FxHashMap<ElementType, usize>,
}

impl RejectionTally {
    pub fn record(&mut self, element_type: ElementType) {
        *self.counts.entry(element_type).or_insert(0) += 1;
    }

    pub fn count(&self, element_type: ElementType) -> usize {
        self.counts.get(&element_type).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn merge(&mut self, other: &RejectionTally) {
        for (t, n) in &other.counts {
            *self.counts.entry(*t).or_insert(0) += n;
        }
    }
}

/// Expands classified layers into validated, dimensioned elements.
#[derive(Debug, Clone, Default)]
pub struct ElementValidator {
    pub rules: DimensionRules,
    pub materials: MaterialDefaults,
}

impl ElementValidator {
    pub fn new(rules: DimensionRules, materials: MaterialDefaults) -> Self {
        Self { rules, materials }
    }

    /// One element per entity that passes its type gate. The returned tally
    /// holds the candidates that were dropped.
    pub fn expand_layer(
        &self,
        classification: &Classification,
        layer: &Layer,
        params: &AgentParameters,
    ) -> (Vec<ClassifiedElement>, RejectionTally) {
        let mut elements = Vec::with_capacity(layer.entities.len());
        let mut rejections = RejectionTally::default();

        for (index, entity) in layer.entities.iter().enumerate() {
            match self.gate(classification, entity) {
                Gate::Accept { bonus } => {
                    let mut element =
                        self.build_element(classification, layer, entity, index, bonus);
                    self.assign_dimensions(&mut element, entity, params);
                    elements.push(element);
                }
                Gate::Reject => rejections.record(classification.element_type),
            }
        }

        (elements, rejections)
    }

    fn gate(&self, classification: &Classification, entity: &Entity) -> Gate {
        let r = &self.rules;
        match classification.element_type {
            ElementType::Wall => {
                if entity.length() >= r.wall_min_length {
                    Gate::Accept { bonus: 0 }
                } else {
                    Gate::Reject
                }
            }
            ElementType::Door => {
                Self::gate_opening(entity.length(), r.door_width_range, &r.door_standard_widths, r.standard_width_bonus)
            }
            ElementType::Window => {
                Self::gate_opening(entity.length(), r.window_width_range, &r.window_standard_widths, r.standard_width_bonus)
            }
            ElementType::Plumbing => Self::gate_area(entity, r.sanitary_min_area),
            ElementType::Furniture => Self::gate_area(entity, r.kitchen_min_area),
            _ => Gate::Accept { bonus: 0 },
        }
    }

    fn gate_opening(length: f64, range: (f64, f64), standards: &[f64], bonus: u8) -> Gate {
        if length < range.0 || length > range.1 {
            return Gate::Reject;
        }
        // Standard widths are catalog sizes on a 0.1 grid
        let rounded = (length * 10.0).round() / 10.0;
        let standard = standards.iter().any(|w| (rounded - w).abs() < 1e-6);
        Gate::Accept {
            bonus: if standard { bonus } else { 0 },
        }
    }

    /// The area gate only applies to candidates that enclose area; open
    /// line work of these types has none to measure and passes ungated.
    fn gate_area(entity: &Entity, min_area: f64) -> Gate {
        let encloses = entity.kind == EntityKind::Circle || entity.is_closed();
        if !encloses || entity.bounds.area() >= min_area {
            Gate::Accept { bonus: 0 }
        } else {
            Gate::Reject
        }
    }

    fn build_element(
        &self,
        classification: &Classification,
        layer: &Layer,
        entity: &Entity,
        index: usize,
        bonus: u8,
    ) -> ClassifiedElement {
        let element_type = classification.element_type;
        ClassifiedElement {
            id: format!("{}_{}", layer.name, index),
            element_type,
            layer: layer.name.clone(),
            geometry: ElementGeometry {
                points: entity.points.to_vec(),
                bounds: entity.bounds,
                center: entity.center,
            },
            dimensions: Dimensions::default(),
            properties: ElementProperties {
                thickness: None,
                material: self.materials.get(element_type).map(str::to_string),
                sill_height: None,
                confidence: classification.confidence.saturating_add(bonus).min(100),
                structural: element_type.is_structural().then_some(true),
                reasoning: classification.reasoning.clone(),
            },
        }
    }

    /// Fill empty dimension fields from the rules and caller parameters.
    /// The only mutation an element sees after creation; idempotent because
    /// it never overwrites a present value.
    pub fn assign_dimensions(
        &self,
        element: &mut ClassifiedElement,
        entity: &Entity,
        params: &AgentParameters,
    ) {
        let r = &self.rules;
        let d = &mut element.dimensions;
        let p = &mut element.properties;

        match element.element_type {
            ElementType::Wall => {
                p.thickness.get_or_insert(r.wall_thickness);
                d.height.get_or_insert(params.wall_height);
                d.length.get_or_insert(entity.length());
            }
            ElementType::Floor => {
                p.thickness.get_or_insert(params.floor_thickness);
            }
            ElementType::Ceiling => {
                p.thickness.get_or_insert(r.ceiling_thickness);
                d.height.get_or_insert(params.ceiling_height);
            }
            ElementType::Door => {
                d.width.get_or_insert(entity.length());
                d.height.get_or_insert(params.door_height);
            }
            ElementType::Window => {
                d.width.get_or_insert(entity.length());
                d.height.get_or_insert(params.window_height);
                p.sill_height.get_or_insert(params.window_sill_height);
            }
            _ => {
                d.length.get_or_insert(entity.length());
            }
        }
    }
}

enum Gate {
    Accept { bonus: u8 },
    Reject,
}
