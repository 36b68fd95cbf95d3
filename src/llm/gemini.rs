//! Gemini REST backend for the `TextCompletion` trait.
//!
//! Calls the `generateContent` endpoint with the generation settings from
//! `ModelConfig`. All failures (transport, quota, empty candidates) surface
//! as `Err`; callers are expected to fall back deterministically.

use crate::config::ModelConfig;
use crate::llm::TextCompletion;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini text-completion client.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: ModelConfig,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: ModelConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{GEMINI_API_BASE}/{}:generateContent?key={}",
            self.model.model_name, self.api_key
        )
    }
}

#[async_trait]
impl TextCompletion for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": self.model.temperature,
                "topP": self.model.top_p,
                "topK": self.model.top_k,
                "maxOutputTokens": self.model.max_output_tokens,
            }
        });

        let response = self
            .http
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .context("gemini request failed")?
            .error_for_status()
            .context("gemini returned an error status")?;

        let payload: Value = response
            .json()
            .await
            .context("gemini response was not valid JSON")?;

        let text = extract_candidate_text(&payload)?;
        debug!(chars = text.len(), "gemini completion received");
        Ok(text)
    }

    fn backend_name(&self) -> &'static str {
        "gemini"
    }
}

/// Pull the first candidate's text out of a `generateContent` payload.
fn extract_candidate_text(payload: &Value) -> Result<String> {
    let text = payload
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .unwrap_or_default();

    if text.trim().is_empty() {
        bail!("gemini returned no candidate text");
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_candidate_text() {
        let payload = json!({
            "candidates": [
                { "content": { "parts": [{ "text": "ranked areas" }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        });
        assert_eq!(extract_candidate_text(&payload).unwrap(), "ranked areas");
    }

    #[test]
    fn empty_candidates_are_an_error() {
        assert!(extract_candidate_text(&json!({ "candidates": [] })).is_err());
        assert!(extract_candidate_text(&json!({})).is_err());

        let blank = json!({
            "candidates": [{ "content": { "parts": [{ "text": "   " }] } }]
        });
        assert!(extract_candidate_text(&blank).is_err());
    }
}
