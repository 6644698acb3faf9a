// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Classifier capability trait and fallback composition.
//!
//! Each tier (hosted model, deterministic rules) is a [`Classifier`] of its
//! own, so each is testable in isolation. [`FallbackClassifier`] composes a
//! fallible primary with an infallible-in-practice fallback; callers see a
//! single contract either way.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Classification, LayerProfile};

/// Assigns a semantic type to a layer.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify one layer from its profile. Pure apart from any network
    /// call an implementation makes.
    async fn classify(&self, layer: &LayerProfile) -> Result<Classification>;
}

/// Decorator: try `primary`, fall back to `fallback` on any error.
///
/// The two tiers share the output contract, so a primary failure is
/// invisible to the caller except through the reasoning text.
pub struct FallbackClassifier<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> FallbackClassifier<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl<P, F> Classifier for FallbackClassifier<P, F>
where
    P: Classifier,
    F: Classifier,
{
    async fn classify(&self, layer: &LayerProfile) -> Result<Classification> {
        match self.primary.classify(layer).await {
            Ok(classification) => Ok(classification),
            Err(err) => {
                tracing::debug!(layer = %layer.name, error = %err, "primary classifier failed, falling back");
                self.fallback.classify(layer).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::ElementType;

    struct Fails;

    #[async_trait]
    impl Classifier for Fails {
        async fn classify(&self, _layer: &LayerProfile) -> Result<Classification> {
            Err(Error::NotConfigured("no api key"))
        }
    }

    struct Fixed(ElementType);

    #[async_trait]
    impl Classifier for Fixed {
        async fn classify(&self, _layer: &LayerProfile) -> Result<Classification> {
            Ok(Classification {
                element_type: self.0,
                confidence: 50,
                reasoning: "fixed".into(),
            })
        }
    }

    fn profile(name: &str) -> LayerProfile {
        LayerProfile {
            name: name.into(),
            entity_count: 0,
            kind_counts: Default::default(),
        }
    }

    #[tokio::test]
    async fn test_fallback_on_error() {
        let classifier = FallbackClassifier::new(Fails, Fixed(ElementType::Wall));
        let result = classifier.classify(&profile("L1")).await.unwrap();
        assert_eq!(result.element_type, ElementType::Wall);
    }

    #[tokio::test]
    async fn test_primary_wins_when_it_succeeds() {
        let classifier =
            FallbackClassifier::new(Fixed(ElementType::Door), Fixed(ElementType::Wall));
        let result = classifier.classify(&profile("L1")).await.unwrap();
        assert_eq!(result.element_type, ElementType::Door);
    }
}
