use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::prompt;
use crate::recognizer::{EntityRecognizer, RecognizedSpan};

#[derive(Clone)]
pub struct OllamaClient {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
    format: String, // "json" for structured output
}

#[derive(Deserialize)]
struct OllamaResponse {
    response: String,
}

impl OllamaClient {
    pub fn new(base_url: String, model: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url,
            model,
            client,
        })
    }

    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);

        let request = OllamaRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            format: "json".to_string(), // Force JSON output
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Ollama")?;

        if !response.status().is_success() {
            anyhow::bail!("Ollama request failed: {}", response.status());
        }

        let ollama_response: OllamaResponse = response
            .json()
            .await
            .context("Failed to parse Ollama response")?;

        Ok(ollama_response.response)
    }

    /// Generate, asking the model to repair invalid JSON once per attempt
    pub async fn generate_json_with_retry(
        &self,
        prompt: &str,
        max_retries: usize,
    ) -> Result<String> {
        for attempt in 0..max_retries {
            let response = self.generate(prompt).await?;

            if serde_json::from_str::<serde_json::Value>(&response).is_ok() {
                return Ok(response);
            }

            if attempt + 1 < max_retries {
                tracing::debug!(
                    attempt = attempt + 1,
                    "Recognizer returned invalid JSON, asking for repair"
                );
                let corrected = self.generate(&prompt::build_retry_prompt(&response)).await?;
                if serde_json::from_str::<serde_json::Value>(&corrected).is_ok() {
                    return Ok(corrected);
                }
            }
        }

        anyhow::bail!("Failed to get valid JSON after {} retries", max_retries)
    }
}

#[derive(Deserialize)]
struct RecognitionPayload {
    #[serde(default)]
    entities: Vec<RecognizedSpan>,
}

/// Named-entity recognizer backed by a local Ollama model.
#[derive(Clone)]
pub struct OllamaRecognizer {
    client: OllamaClient,
    max_retries: usize,
}

impl OllamaRecognizer {
    pub fn new(client: OllamaClient, max_retries: usize) -> Self {
        Self {
            client,
            max_retries: max_retries.max(1),
        }
    }
}

impl EntityRecognizer for OllamaRecognizer {
    async fn recognize(&self, text: &str) -> Result<Vec<RecognizedSpan>> {
        let prompt = prompt::build_recognition_prompt(text);

        let json_str = self
            .client
            .generate_json_with_retry(&prompt, self.max_retries)
            .await
            .context("Failed to recognize entities after retries")?;

        parse_spans(&json_str)
    }
}

fn parse_spans(json_str: &str) -> Result<Vec<RecognizedSpan>> {
    let payload: RecognitionPayload =
        serde_json::from_str(json_str).context("Failed to parse recognition result")?;
    Ok(payload.entities)
}
