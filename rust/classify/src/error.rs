// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for classification.

/// Result type alias for classification operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while classifying a layer.
///
/// These never escape the pipeline: the fallback decorator converts every
/// primary-tier failure into a rule-based result.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The classification service is not configured (no credentials).
    #[error("classification service not configured: {0}")]
    NotConfigured(&'static str),

    /// The classification service call failed.
    #[error("classification request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("classification service returned status {0}")]
    Status(u16),

    /// The service response did not contain a usable type/confidence pair.
    #[error("malformed classification response: {0}")]
    MalformedResponse(String),
}
