// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Floorsense Core
//!
//! Document model and geometry extraction for 2D CAD floor plans.
//!
//! This crate is the first stage of the Floorsense pipeline: it takes the
//! upstream JSON document contract (named layers holding raw lines,
//! polylines, circles, dimensions and text marks) and normalizes every
//! entity into a form the classifier can work with: points as typed
//! coordinates, an axis-aligned bounding box, and a centroid, each computed
//! exactly once.
//!
//! ## Overview
//!
//! - **Document model**: serde types for the upstream contract
//! - **Geometry primitives**: points, bounds, lengths and areas
//! - **Extraction**: normalization with silent drop of malformed entities
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use floorsense_core::{extract, RawDocument};
//!
//! let doc: RawDocument = serde_json::from_str(payload)?;
//! let extracted = extract(&doc);
//! println!("kept {} of {} entities", extracted.stats.kept, extracted.stats.seen);
//! ```
//!
//! Malformed entities (a line with fewer than two points, a circle with a
//! non-finite radius) never raise: they are dropped and tallied in
//! [`ExtractStats`] so callers can report them.

pub mod document;
pub mod error;
pub mod extract;
pub mod geometry;
pub mod units;

pub use document::{EntityKind, RawDocument, RawEntity, RawLayer};
pub use error::{Error, Result};
pub use extract::{extract, Entity, ExtractStats, ExtractedDocument, Layer};
pub use geometry::{polygon_area, polyline_length, Bounds, Point};
pub use units::meters_per_unit;
