use anyhow::Result;
use extract::{EntityRecognizer, NoRecognizer, OllamaClient, OllamaRecognizer, RecognizedSpan};
use std::time::Duration;
use tracing::info;

use crate::config::RecognizerConfig;

/// Recognizer selected at runtime from configuration.
pub enum ConfiguredRecognizer {
    Disabled(NoRecognizer),
    Ollama(OllamaRecognizer),
}

impl ConfiguredRecognizer {
    pub fn from_config(config: &RecognizerConfig) -> Result<Self> {
        if !config.enabled {
            return Ok(ConfiguredRecognizer::Disabled(NoRecognizer));
        }

        let client = OllamaClient::new(
            config.base_url.clone(),
            config.model.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;
        info!(base_url = %config.base_url, model = %config.model, "Using Ollama recognizer");

        Ok(ConfiguredRecognizer::Ollama(OllamaRecognizer::new(client, config.max_retries)))
    }
}

impl EntityRecognizer for ConfiguredRecognizer {
    async fn recognize(&self, text: &str) -> Result<Vec<RecognizedSpan>> {
        match self {
            ConfiguredRecognizer::Disabled(r) => r.recognize(text).await,
            ConfiguredRecognizer::Ollama(r) => r.recognize(text).await,
        }
    }
}
