// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! External CAD conversion service interface.
//!
//! The heavy CAD-to-IFC/GLB conversion runs out of process; this crate only
//! defines the seam. One blocking call per document, no internal retry:
//! a failure surfaces as [`crate::Error::Conversion`] and the caller
//! decides whether to retry, never the pipeline.

use async_trait::async_trait;

use crate::error::Result;

/// Artifacts returned by the conversion service.
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    /// IFC text export, input to graph extraction.
    pub ifc_text: String,
    /// Binary GLB scene for the viewer.
    pub glb: Vec<u8>,
}

/// The external conversion collaborator.
#[async_trait]
pub trait ConversionService: Send + Sync {
    /// Convert an uploaded CAD file. The implementation owns transport,
    /// authentication and timeouts; errors come back as strings suitable
    /// for [`crate::Error::Conversion`].
    async fn convert(&self, cad_bytes: &[u8]) -> Result<ConversionOutput>;
}
