// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pipeline error types.
//!
//! Only two conditions reach the caller: a document that cannot be read at
//! all, and a conversion-service failure. Everything else in the pipeline
//! degrades locally (classifier fallback, silent drops, rejection tallies).

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input document does not conform to the layer/entity contract.
    #[error(transparent)]
    InvalidDocument(#[from] floorsense_core::Error),

    /// The external CAD conversion service failed. Surfaced as-is; the
    /// pipeline does not retry on the caller's behalf.
    #[error("conversion service failed: {0}")]
    Conversion(String),

    /// Result serialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
