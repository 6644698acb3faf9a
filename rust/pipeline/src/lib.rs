// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Floorsense Pipeline
//!
//! Single-pass, per-document analysis: one raw CAD document in, one
//! (elements, rooms, stats) tuple out; independently, IFC text in, a
//! bounded reference graph out; both feed one combined topology report.
//!
//! Invocations share no mutable state apart from the classification cache,
//! so documents can be processed in parallel. The only suspension point is
//! the optional hosted-model call per layer, issued concurrently across
//! layers under a configurable bound, with the rule tier standing in on
//! any failure or timeout. A classification problem is never fatal; only
//! an unreadable document or a conversion-service failure errors out.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use floorsense_pipeline::{Pipeline, PipelineConfig};
//! use floorsense_classify::AgentParameters;
//!
//! let pipeline = Pipeline::new(PipelineConfig::from_env());
//! let analysis = pipeline.analyze_json(payload, ifc_text, &AgentParameters::default()).await?;
//! println!("{}", serde_json::to_string_pretty(&analysis.report)?);
//! ```

pub mod config;
pub mod convert;
pub mod error;

use std::sync::{Arc, Mutex};

use futures::stream::{self, StreamExt};
use serde::Serialize;

use floorsense_classify::{
    AgentParameters, AiClassifier, Classification, ClassifiedElement, Classifier, ElementStats,
    ElementType, ElementValidator, FallbackClassifier, LayerCache, LayerProfile, MemoryCache,
    RejectionTally, Room, RoomDetector, RuleClassifier,
};
use floorsense_core::{extract, RawDocument};
use floorsense_graph::{
    build_graph, validate, ElementCounts, GraphMetrics, IfcGraph, RoomSummary, TopologyReport,
};

pub use config::PipelineConfig;
pub use convert::{ConversionOutput, ConversionService};
pub use error::{Error, Result};

/// Result of analyzing one CAD document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentAnalysis {
    pub elements: Vec<ClassifiedElement>,
    pub rooms: Vec<Room>,
    pub stats: ElementStats,
    /// Candidates dropped by geometric gates, for the review sheet.
    pub rejections: RejectionTally,
    /// Malformed source entities dropped during extraction.
    pub dropped_entities: usize,
}

/// Combined result of the document and IFC passes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub document: DocumentAnalysis,
    pub graph: IfcGraph,
    pub report: TopologyReport,
}

/// The per-document analysis pipeline.
pub struct Pipeline {
    classifier: Arc<dyn Classifier>,
    validator: ElementValidator,
    detector: RoomDetector,
    cache: Mutex<MemoryCache>,
    config: PipelineConfig,
}

impl Pipeline {
    /// Build a pipeline with the default classifier stack: the hosted
    /// model (when credentials are present) decorated with the rule tier,
    /// or rules alone otherwise.
    pub fn new(config: PipelineConfig) -> Self {
        let classifier: Arc<dyn Classifier> = match AiClassifier::from_env() {
            Some(ai) => {
                tracing::info!("hosted classifier enabled with rule fallback");
                Arc::new(FallbackClassifier::new(ai, RuleClassifier::new()))
            }
            None => {
                tracing::info!("no model credentials, rule classifier only");
                Arc::new(RuleClassifier::new())
            }
        };
        Self::with_classifier(config, classifier)
    }

    /// Build a pipeline around an explicit classifier (used by tests and
    /// callers with their own tier stack).
    pub fn with_classifier(config: PipelineConfig, classifier: Arc<dyn Classifier>) -> Self {
        let validator = ElementValidator::default();
        let detector = RoomDetector::new(validator.rules.min_room_area);
        Self {
            classifier,
            validator,
            detector,
            cache: Mutex::new(MemoryCache::new(config.cache_capacity)),
            config,
        }
    }

    /// Analyze a document already parsed from the wire contract.
    pub async fn process_document(
        &self,
        doc: &RawDocument,
        params: &AgentParameters,
    ) -> DocumentAnalysis {
        match floorsense_core::meters_per_unit(&doc.units) {
            Some(factor) => {
                tracing::debug!(units = %doc.units, meters_per_unit = factor, "document units")
            }
            None if !doc.units.is_empty() => {
                tracing::warn!(units = %doc.units, "unrecognized document units")
            }
            None => {}
        }

        let extracted = extract(doc);
        tracing::debug!(
            layers = extracted.layers.len(),
            kept = extracted.stats.kept,
            dropped = extracted.stats.dropped,
            "extracted document geometry"
        );

        let profiles: Vec<LayerProfile> = extracted
            .layers
            .iter()
            .map(LayerProfile::from_layer)
            .collect();
        let classifications = self.classify_layers(&profiles).await;

        let mut elements = Vec::new();
        let mut rejections = RejectionTally::default();
        for (layer, classification) in extracted.layers.iter().zip(&classifications) {
            let (mut layer_elements, layer_rejections) =
                self.validator.expand_layer(classification, layer, params);
            rejections.merge(&layer_rejections);
            elements.append(&mut layer_elements);
        }

        let rooms = self.detector.detect(&elements);
        let stats = ElementStats::from_elements(&elements);
        tracing::info!(
            elements = elements.len(),
            rooms = rooms.len(),
            rejected = rejections.total(),
            "document analysis complete"
        );

        DocumentAnalysis {
            elements,
            rooms,
            stats,
            rejections,
            dropped_entities: extracted.stats.dropped,
        }
    }

    /// Classify every layer, cache-first, with bounded concurrency for the
    /// misses. Output order matches input order. A classifier error falls
    /// back to the rule tier, so every layer gets a classification.
    async fn classify_layers(&self, profiles: &[LayerProfile]) -> Vec<Classification> {
        let mut resolved: Vec<Option<Classification>> = vec![None; profiles.len()];
        let mut misses: Vec<(usize, LayerProfile)> = Vec::new();

        {
            let cache = self.cache.lock().expect("cache lock poisoned");
            for (i, profile) in profiles.iter().enumerate() {
                match cache.get(&profile.signature()) {
                    Some(hit) => resolved[i] = Some(hit),
                    None => misses.push((i, profile.clone())),
                }
            }
        }

        let classifier = Arc::clone(&self.classifier);
        let fresh: Vec<(usize, LayerProfile, Classification)> = stream::iter(misses)
            .map(|(i, profile)| {
                let classifier = Arc::clone(&classifier);
                async move {
                    let classification = match classifier.classify(&profile).await {
                        Ok(c) => c,
                        Err(err) => {
                            tracing::debug!(layer = %profile.name, error = %err, "classifier error, using rules");
                            RuleClassifier::new().classify_profile(&profile)
                        }
                    };
                    (i, profile, classification)
                }
            })
            .buffered(self.config.ai_concurrency.max(1))
            .collect()
            .await;

        {
            let mut cache = self.cache.lock().expect("cache lock poisoned");
            for (i, profile, classification) in fresh {
                cache.put(profile.signature(), classification.clone());
                resolved[i] = Some(classification);
            }
        }

        resolved.into_iter().flatten().collect()
    }

    /// Analyze a document from its JSON wire form.
    pub async fn process_json(
        &self,
        payload: &str,
        params: &AgentParameters,
    ) -> Result<DocumentAnalysis> {
        let doc = RawDocument::from_json(payload)?;
        Ok(self.process_document(&doc, params).await)
    }

    /// Extract the bounded reference graph from IFC text.
    pub fn build_graph(&self, ifc_text: &str) -> IfcGraph {
        let graph = build_graph(ifc_text, &self.config.graph_limits);
        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built reference graph"
        );
        graph
    }

    /// Combine document statistics and the graph into the topology report.
    pub fn topology_report(&self, document: &DocumentAnalysis, graph: &IfcGraph) -> TopologyReport {
        let elements = ElementCounts {
            walls: document.stats.count(ElementType::Wall),
            floors: document.stats.count(ElementType::Floor),
            ceilings: document.stats.count(ElementType::Ceiling),
        };
        let rooms = RoomSummary {
            total: document.rooms.len(),
            generated: document.rooms.iter().filter(|r| r.generated).count(),
        };
        let metrics = GraphMetrics::from_graph(graph);
        validate(&elements, &rooms, &metrics)
    }

    /// Full pass: document analysis, graph extraction, combined report.
    pub async fn analyze(
        &self,
        doc: &RawDocument,
        ifc_text: &str,
        params: &AgentParameters,
    ) -> Analysis {
        let document = self.process_document(doc, params).await;
        let graph = self.build_graph(ifc_text);
        let report = self.topology_report(&document, &graph);
        Analysis {
            document,
            graph,
            report,
        }
    }

    /// Full pass from the JSON wire form.
    pub async fn analyze_json(
        &self,
        payload: &str,
        ifc_text: &str,
        params: &AgentParameters,
    ) -> Result<Analysis> {
        let doc = RawDocument::from_json(payload)?;
        Ok(self.analyze(&doc, ifc_text, params).await)
    }

    /// Run the external conversion for a raw CAD upload, then the full
    /// pass over its IFC output. The conversion error, if any, surfaces
    /// unchanged, with no silent retry.
    pub async fn convert_and_analyze(
        &self,
        service: &dyn ConversionService,
        cad_bytes: &[u8],
        doc: &RawDocument,
        params: &AgentParameters,
    ) -> Result<Analysis> {
        let output = service.convert(cad_bytes).await?;
        Ok(self.analyze(doc, &output.ifc_text, params).await)
    }
}
