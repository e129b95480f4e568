use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::future::Future;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SpanCategory {
    Organization,
    Person,
    #[serde(other)]
    Other,
}

/// A `(spanText, category)` pair returned by a named-entity recognizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognizedSpan {
    pub text: String,
    pub category: SpanCategory,
}

impl RecognizedSpan {
    pub fn new(text: impl Into<String>, category: SpanCategory) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }
}

/// External named-entity recognition capability.
pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, text: &str) -> impl Future<Output = Result<Vec<RecognizedSpan>>> + Send;
}

/// Recognizer for deployments without an NER backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRecognizer;

impl EntityRecognizer for NoRecognizer {
    async fn recognize(&self, _text: &str) -> Result<Vec<RecognizedSpan>> {
        Ok(Vec::new())
    }
}
