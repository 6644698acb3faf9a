// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hosted-model layer classifier.
//!
//! Sends the layer name, the distinct entity kinds and the entity count to
//! a chat-completion endpoint in JSON mode and expects back one element
//! type token plus an integer confidence. Anything else (missing
//! credentials, non-2xx status, timeout, unparseable body, out-of-range
//! confidence) is an error, which the fallback decorator turns into a
//! rule-based answer. Correctness never depends on this path.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::classifier::Classifier;
use crate::error::{Error, Result};
use crate::types::{Classification, ElementType, LayerProfile};

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-5-mini";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

const SYSTEM_PROMPT: &str = "You classify CAD layers from architectural floor plans. \
Given a layer name, its entity kinds and entity count, answer with JSON: \
{\"type\": one of WALL, DOOR, WINDOW, FLOOR, CEILING, COLUMN, BEAM, STAIRS, \
FURNITURE, PLUMBING, ELECTRICAL, HVAC, ANNOTATION, OTHER, \
\"confidence\": integer 0-100, \"reasoning\": short string}. Return only JSON.";

/// Configuration for the hosted classifier.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    /// Per-call timeout; on expiry the rule tier takes over.
    pub timeout: Duration,
}

impl AiConfig {
    /// Read configuration from the environment. `None` when no API key is
    /// set, which callers treat as "run rules only".
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty())?;
        Some(Self {
            endpoint: std::env::var("OPENAI_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.into()),
            api_key,
            model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into()),
            timeout: Duration::from_secs(
                std::env::var("AI_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        })
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f64,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// The JSON body the model is asked to produce.
#[derive(Debug, Deserialize)]
struct ModelVerdict {
    #[serde(rename = "type")]
    type_token: String,
    confidence: i64,
    #[serde(default)]
    reasoning: Option<String>,
}

/// Classifier backed by a hosted text-classification model.
pub struct AiClassifier {
    config: AiConfig,
    http: reqwest::Client,
}

impl AiClassifier {
    pub fn new(config: AiConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_default();
        Self { config, http }
    }

    /// Build from the environment, `None` without credentials.
    pub fn from_env() -> Option<Self> {
        AiConfig::from_env().map(Self::new)
    }

    fn user_prompt(layer: &LayerProfile) -> String {
        format!(
            "layerName: {}\nentityTypes: {}\nentityCount: {}",
            layer.name,
            layer.kind_summary(),
            layer.entity_count
        )
    }

    /// Validate the model output into the shared contract. Rejects unknown
    /// type tokens and confidences outside 0..=100 so a misbehaving model
    /// can never widen the invariant.
    fn into_classification(verdict: ModelVerdict) -> Result<Classification> {
        let element_type = ElementType::parse(&verdict.type_token).ok_or_else(|| {
            Error::MalformedResponse(format!("unknown type token {:?}", verdict.type_token))
        })?;

        let confidence: u8 = verdict
            .confidence
            .try_into()
            .ok()
            .filter(|c| *c <= 100u8)
            .ok_or_else(|| {
                Error::MalformedResponse(format!("confidence {} out of range", verdict.confidence))
            })?;

        Ok(Classification {
            element_type,
            confidence,
            reasoning: verdict
                .reasoning
                .unwrap_or_else(|| "model classification".into()),
        })
    }
}

#[async_trait]
impl Classifier for AiClassifier {
    async fn classify(&self, layer: &LayerProfile) -> Result<Classification> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                Message {
                    role: "system",
                    content: SYSTEM_PROMPT.into(),
                },
                Message {
                    role: "user",
                    content: Self::user_prompt(layer),
                },
            ],
            temperature: 0.1,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let resp = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(Error::Status(resp.status().as_u16()));
        }

        let body: ChatResponse = resp
            .json()
            .await
            .map_err(|e| Error::MalformedResponse(e.to_string()))?;
        let content = body
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| Error::MalformedResponse("empty choices".into()))?;

        let verdict: ModelVerdict = serde_json::from_str(content)
            .map_err(|e| Error::MalformedResponse(e.to_string()))?;

        Self::into_classification(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_validation() {
        let ok = ModelVerdict {
            type_token: "wall".into(),
            confidence: 92,
            reasoning: Some("name looks structural".into()),
        };
        let c = AiClassifier::into_classification(ok).unwrap();
        assert_eq!(c.element_type, ElementType::Wall);
        assert_eq!(c.confidence, 92);
    }

    #[test]
    fn test_verdict_rejects_unknown_token() {
        let bad = ModelVerdict {
            type_token: "PERGOLA".into(),
            confidence: 80,
            reasoning: None,
        };
        assert!(matches!(
            AiClassifier::into_classification(bad),
            Err(Error::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_verdict_rejects_out_of_range_confidence() {
        for confidence in [-1, 101, 900] {
            let bad = ModelVerdict {
                type_token: "WALL".into(),
                confidence,
                reasoning: None,
            };
            assert!(
                matches!(
                    AiClassifier::into_classification(bad),
                    Err(Error::MalformedResponse(_))
                ),
                "confidence {confidence} should be rejected"
            );
        }
    }

    #[test]
    fn test_user_prompt_contents() {
        let mut kind_counts = rustc_hash::FxHashMap::default();
        kind_counts.insert(floorsense_core::EntityKind::Line, 4);
        kind_counts.insert(floorsense_core::EntityKind::Circle, 1);
        let layer = LayerProfile {
            name: "A-WALL".into(),
            entity_count: 5,
            kind_counts,
        };
        let prompt = AiClassifier::user_prompt(&layer);
        assert!(prompt.contains("layerName: A-WALL"));
        assert!(prompt.contains("circle, line"));
        assert!(prompt.contains("entityCount: 5"));
    }
}
