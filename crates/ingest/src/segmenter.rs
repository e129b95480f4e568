use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::clause::{ClauseBlock, ClauseType};

/// Maps a keyword set to the clause type it signals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationRule {
    pub clause: ClauseType,
    pub keywords: Vec<String>,
}

impl ClassificationRule {
    fn new(clause: ClauseType, keywords: &[&str]) -> Self {
        Self {
            clause,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Regex locating the start of a clause heading.
    pub heading_pattern: String,
    pub max_heading_chars: usize,
    /// Ordered table, first match wins.
    pub classification: Vec<ClassificationRule>,
    pub matched_confidence: f32,
    pub fallback_confidence: f32,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            heading_pattern: r"(?im)^[ \t]*CL[ÁA]USULA\b".to_string(),
            max_heading_chars: 100,
            classification: vec![
                ClassificationRule::new(ClauseType::Objeto, &["objeto", "escopo"]),
                ClassificationRule::new(ClauseType::Prazo, &["prazo", "vigência", "vigencia"]),
                ClassificationRule::new(
                    ClauseType::Pagamento,
                    &["pagamento", "remuneração", "remuneracao", "preço", "preco"],
                ),
                ClassificationRule::new(ClauseType::Multa, &["multa", "penalidade"]),
                ClassificationRule::new(
                    ClauseType::Rescisao,
                    &["rescisão", "rescisao", "rescindir"],
                ),
                ClassificationRule::new(ClauseType::Foro, &["foro"]),
                ClassificationRule::new(
                    ClauseType::Confidencialidade,
                    &["sigilo", "confidencialidade"],
                ),
                ClassificationRule::new(
                    ClauseType::ObrigacoesContratado,
                    &["obrigações do contratado", "obrigações da contratada"],
                ),
                ClassificationRule::new(
                    ClauseType::ObrigacoesContratante,
                    &["obrigações do contratante", "obrigações da contratante"],
                ),
                ClassificationRule::new(ClauseType::DisposicoesGerais, &["disposições gerais"]),
            ],
            matched_confidence: 0.90,
            fallback_confidence: 0.65,
        }
    }
}

pub struct ClauseSegmenter {
    heading: Regex,
    config: SegmenterConfig,
}

impl ClauseSegmenter {
    pub fn new(mut config: SegmenterConfig) -> Result<Self> {
        let heading = Regex::new(&config.heading_pattern).with_context(|| {
            format!("Invalid clause heading pattern: {}", config.heading_pattern)
        })?;

        for rule in &mut config.classification {
            for keyword in &mut rule.keywords {
                *keyword = keyword.to_lowercase();
            }
        }

        Ok(Self { heading, config })
    }

    /// Split contract text into clause blocks, one per heading marker.
    ///
    /// Text without any marker yields no blocks; callers treat that as
    /// "no structured clauses found".
    pub fn segment(&self, text: &str) -> Vec<ClauseBlock> {
        let starts: Vec<usize> = self.heading.find_iter(text).map(|m| m.start()).collect();
        let mut blocks = Vec::with_capacity(starts.len());

        for (i, &start) in starts.iter().enumerate() {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            let section = text[start..end].trim();

            let (heading_line, body) = match section.split_once('\n') {
                Some((heading_line, body)) => (heading_line.trim(), body.trim()),
                None => (section, ""),
            };

            let (inferred_type, confidence) = self.classify(heading_line, body);

            blocks.push(ClauseBlock {
                heading: truncate_graphemes(heading_line, self.config.max_heading_chars),
                body: body.to_string(),
                inferred_type,
                confidence,
            });
        }

        tracing::debug!(blocks = blocks.len(), "Segmented contract text");
        blocks
    }

    /// Classify a block by keywords, heading first, then the whole block.
    pub fn classify(&self, heading: &str, body: &str) -> (ClauseType, f32) {
        let heading_lower = heading.to_lowercase();
        let full_lower = format!("{} {}", heading_lower, body.to_lowercase());

        let matched = self
            .first_match(&heading_lower)
            .or_else(|| self.first_match(&full_lower));

        match matched {
            Some(clause) => (clause, self.config.matched_confidence),
            None => (ClauseType::Outros, self.config.fallback_confidence),
        }
    }

    fn first_match(&self, text_lower: &str) -> Option<ClauseType> {
        self.config
            .classification
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| text_lower.contains(k.as_str())))
            .map(|rule| rule.clause)
    }
}

/// Truncate to at most `max` grapheme clusters.
pub fn truncate_graphemes(text: &str, max: usize) -> String {
    text.graphemes(true).take(max).collect()
}
