// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for document parsing and extraction.

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The payload does not conform to the layer/entity contract at all.
    /// This is the only fatal input condition: nothing can be classified
    /// from a document without layers.
    #[error("invalid document: {0}")]
    InvalidDocument(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidDocument(err.to_string())
    }
}
