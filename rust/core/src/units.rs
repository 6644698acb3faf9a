// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Drawing unit lookup.
//!
//! Source documents name their units in the header. The factor returned
//! here is used for logging and sanity reporting only; classification
//! gates operate in document units.

/// Meters per drawing unit for a named unit, `None` when unknown.
pub fn meters_per_unit(name: &str) -> Option<f64> {
    match name.to_ascii_lowercase().as_str() {
        "meters" | "meter" | "m" => Some(1.0),
        "millimeters" | "millimeter" | "mm" => Some(0.001),
        "centimeters" | "centimeter" | "cm" => Some(0.01),
        "feet" | "foot" | "ft" => Some(0.3048),
        "inches" | "inch" | "in" => Some(0.0254),
        _ => None,
    }
}
