pub mod config;
pub mod llm;
pub mod normalizer;
pub mod patterns;
pub mod prompt;
pub mod recognizer;
pub mod relations;
pub mod schema;

pub use config::{DeclarationRule, ExtractorConfig, PatternRule};
pub use llm::{OllamaClient, OllamaRecognizer};
pub use normalizer::EntityNormalizer;
pub use patterns::PatternExtractor;
pub use recognizer::{EntityRecognizer, NoRecognizer, RecognizedSpan, SpanCategory};
pub use relations::derive_relations;
pub use schema::{Entity, EntityLabel, EntityRef, ExtractionResult, Relation, RelationType};

use anyhow::Result;
use ingest::{truncate_graphemes, ClauseBlock};
use std::collections::HashSet;

pub struct Extractor {
    patterns: PatternExtractor,
    normalizer: EntityNormalizer,
    clause_text_limit: usize,
    min_named_entity_chars: usize,
    generic_object_terms: HashSet<String>,
    organization_blacklist: Vec<String>,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Result<Self> {
        let patterns = PatternExtractor::new(&config)?;

        Ok(Self {
            patterns,
            normalizer: EntityNormalizer::new(),
            clause_text_limit: config.clause_text_limit,
            min_named_entity_chars: config.min_named_entity_chars,
            generic_object_terms: config
                .generic_object_terms
                .iter()
                .map(|t| t.trim().to_lowercase())
                .collect(),
            organization_blacklist: config
                .organization_blacklist
                .iter()
                .map(|t| t.trim().to_uppercase())
                .collect(),
        })
    }

    /// Extract entities and relations from contract text.
    ///
    /// `spans` are the recognizer's output for the same text; an empty slice
    /// is a valid degraded input.
    pub fn extract(
        &self,
        text: &str,
        blocks: &[ClauseBlock],
        spans: &[RecognizedSpan],
    ) -> ExtractionResult {
        let entities = self.extract_entities(text, blocks, spans);
        let relations = derive_relations(&entities);

        tracing::debug!(
            entities = entities.len(),
            relations = relations.len(),
            "Extracted entities and relations"
        );

        ExtractionResult { entities, relations }
    }

    /// Normalize, deduplicate, then apply label-specific filters.
    pub fn extract_entities(
        &self,
        text: &str,
        blocks: &[ClauseBlock],
        spans: &[RecognizedSpan],
    ) -> Vec<Entity> {
        let mut raw = self.patterns.declarations(text);
        raw.extend(self.named_entities(spans));
        raw.extend(self.patterns.formats(text));
        raw.extend(self.patterns.markers(text));
        raw.extend(self.clause_entities(blocks));

        let mut seen = HashSet::new();
        raw.into_iter()
            .map(|e| self.normalizer.normalize_entity(e))
            .filter(|e| !e.text.is_empty())
            .filter(|e| seen.insert((e.label, e.text.clone())))
            .filter(|e| self.keep(e))
            .collect()
    }

    fn named_entities(&self, spans: &[RecognizedSpan]) -> Vec<Entity> {
        spans
            .iter()
            .filter_map(|span| {
                let label = match span.category {
                    SpanCategory::Organization => EntityLabel::Empresa,
                    SpanCategory::Person => EntityLabel::Pessoa,
                    SpanCategory::Other => return None,
                };
                let text = self.normalizer.normalize(&span.text, label);
                (text.chars().count() >= self.min_named_entity_chars)
                    .then(|| Entity::new(text, label))
            })
            .collect()
    }

    fn clause_entities(&self, blocks: &[ClauseBlock]) -> Vec<Entity> {
        blocks
            .iter()
            .filter_map(|block| {
                let label = EntityLabel::from_clause(block.inferred_type)?;
                Some(Entity::new(
                    truncate_graphemes(&block.full_text(), self.clause_text_limit),
                    label,
                ))
            })
            .collect()
    }

    fn keep(&self, entity: &Entity) -> bool {
        match entity.label {
            EntityLabel::Valor => entity.text.chars().any(|c| c.is_ascii_digit()),
            EntityLabel::Objeto => !self.generic_object_terms.contains(&entity.text.to_lowercase()),
            EntityLabel::Empresa | EntityLabel::Pessoa => !self.is_blacklisted(&entity.text),
            _ => true,
        }
    }

    fn is_blacklisted(&self, text: &str) -> bool {
        self.organization_blacklist
            .iter()
            .any(|term| text == term || text.starts_with(&format!("{} ", term)))
    }
}
