pub mod config;
pub mod error;
pub mod metrics;
pub mod recognizer;

pub use config::{AppConfig, RecognizerConfig, CONFIG_ENV_VAR};
pub use error::AnalysisError;
pub use metrics::{Metrics, MetricsSnapshot, TimedOperation};
pub use recognizer::ConfiguredRecognizer;

use anyhow::Result;
use compliance::{ComplianceEngine, ComplianceFinding};
use extract::{EntityRecognizer, Extractor};
use ingest::{BlankFieldDetector, ClauseBlock, ClauseSegmenter, InputConfig};
use opinion::{Opinion, OpinionComposer};
use serde::Serialize;
use std::sync::Arc;
use store::{ContractGraph, GraphId, GraphStore, StoreError};
use tracing::{info, warn};

/// Full result of reviewing one contract.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub graph: Arc<ContractGraph>,
    pub clauses: Vec<ClauseBlock>,
    pub finding: ComplianceFinding,
    pub opinion: Opinion,
    /// Unfilled template fields; informational only.
    pub blank_fields: Vec<String>,
    pub source_digest: String,
}

/// Owns every pipeline stage and the graph store. Shared by `&self`, so
/// concurrent analyses may run over one instance.
pub struct Analyzer<R> {
    input: InputConfig,
    segmenter: ClauseSegmenter,
    blank_fields: BlankFieldDetector,
    extractor: Extractor,
    engine: ComplianceEngine,
    composer: OpinionComposer,
    store: GraphStore,
    recognizer: R,
    metrics: Metrics,
}

impl<R: EntityRecognizer> Analyzer<R> {
    pub fn new(config: AppConfig, recognizer: R) -> Result<Self> {
        let AppConfig {
            input,
            segmenter,
            blank_fields,
            extractor,
            rules,
            opinion,
            store,
            recognizer: _,
        } = config;

        Ok(Self {
            input,
            segmenter: ClauseSegmenter::new(segmenter)?,
            blank_fields: BlankFieldDetector::new(&blank_fields)?,
            extractor: Extractor::new(extractor)?,
            engine: ComplianceEngine::new(rules)?,
            composer: OpinionComposer::new(opinion),
            store: GraphStore::new(&store),
            recognizer,
            metrics: Metrics::new(),
        })
    }

    pub async fn analyze(&self, text: &str) -> Result<Analysis, AnalysisError> {
        let result = self.run(text).await;
        if result.is_err() {
            self.metrics.record_failure();
        }
        result
    }

    /// Decode raw bytes at the boundary, then analyze.
    pub async fn analyze_bytes(&self, bytes: &[u8]) -> Result<Analysis, AnalysisError> {
        let text = match ingest::decode_input(bytes, &self.input) {
            Ok(text) => text,
            Err(e) => {
                self.metrics.record_failure();
                return Err(e.into());
            }
        };
        self.analyze(&text).await
    }

    async fn run(&self, text: &str) -> Result<Analysis, AnalysisError> {
        let timer = TimedOperation::start();
        ingest::validate_text(text, &self.input)?;

        let clauses = self.segmenter.segment(text);

        let spans = match self.recognizer.recognize(text).await {
            Ok(spans) => spans,
            Err(e) => {
                warn!(error = %e, "Entity recognizer failed, continuing with pattern extraction");
                self.metrics.record_degradation();
                Vec::new()
            }
        };

        let extraction = self.extractor.extract(text, &clauses, &spans);
        let graph = self.store.create(extraction.entities, extraction.relations)?;

        let finding = self.engine.evaluate(&graph, &clauses);
        let opinion = self.composer.compose(&graph.entities, &graph.relations, &finding);
        let blank_fields = self.blank_fields.detect(text);

        let elapsed = timer.elapsed();
        self.metrics.record_analysis(
            elapsed,
            clauses.len(),
            graph.entities.len(),
            finding.requires_review(),
        );

        info!(
            graph_id = %graph.id,
            clauses = clauses.len(),
            entities = graph.entities.len(),
            relations = graph.relations.len(),
            status = %finding.status,
            elapsed_ms = elapsed.as_millis() as u64,
            "Contract analyzed"
        );

        Ok(Analysis {
            graph,
            clauses,
            finding,
            opinion,
            blank_fields,
            source_digest: ingest::document_digest(text),
        })
    }

    pub fn graph(&self, id: &GraphId) -> Result<Arc<ContractGraph>, StoreError> {
        self.store.get(id)
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}
