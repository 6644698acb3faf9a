// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Floorsense Classify
//!
//! Semantic classification of CAD layers into typed architectural elements.
//!
//! A normalized document goes through three stages here:
//!
//! 1. **Classification**: each layer is assigned an [`ElementType`] with a
//!    confidence score and a reasoning string. The [`Classifier`] trait has
//!    two implementations: a deterministic [`RuleClassifier`] (layer-name
//!    patterns, then entity-shape heuristics) and an [`AiClassifier`]
//!    backed by a hosted text-classification model. They are composed with
//!    [`FallbackClassifier`], so an unavailable or misbehaving model
//!    degrades to rules without the caller noticing anything but the
//!    reasoning text.
//! 2. **Validation**: each classified layer is expanded into one
//!    [`ClassifiedElement`] per qualifying entity. Candidates that violate
//!    type-specific geometric gates (a wall shorter than the minimum, a
//!    door outside the standard width band) are rejected and tallied.
//!    Survivors get default thickness/material and caller-supplied heights.
//! 3. **Room detection**: bounded regions are derived from wall geometry
//!    and non-wall elements are grouped into them by centroid containment.

pub mod ai;
pub mod cache;
pub mod classifier;
pub mod error;
pub mod rooms;
pub mod rules;
pub mod stats;
pub mod types;
pub mod validate;

pub use ai::{AiClassifier, AiConfig};
pub use cache::{LayerCache, MemoryCache};
pub use classifier::{Classifier, FallbackClassifier};
pub use error::{Error, Result};
pub use rooms::{detect_rooms, RoomDetector};
pub use rules::RuleClassifier;
pub use stats::ElementStats;
pub use types::{
    AgentParameters, Classification, ClassifiedElement, Dimensions, ElementGeometry,
    ElementProperties, ElementType, LayerProfile, Room, RoomCategory,
};
pub use validate::{DimensionRules, ElementValidator, MaterialDefaults, RejectionTally};
