// src/chat/gemini.rs
// Google Gemini generateContent client

use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use super::backend::CompletionBackend;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Default model for the portfolio assistant.
pub const DEFAULT_MODEL: &str = "gemini-pro";

/// Google Gemini API client. Non-streaming: one prompt in, one text
/// reply out. Authenticates via query-string key, not a Bearer header.
pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    http: Client,
}

impl GeminiClient {
    /// Create a new Gemini client with the default model.
    pub fn new(api_key: String) -> Self {
        Self::with_model(api_key, DEFAULT_MODEL.to_string())
    }

    /// Create a new Gemini client with a custom model.
    pub fn with_model(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            base_url: GEMINI_API_BASE.to_string(),
            http: Client::new(),
        }
    }

    /// Point the client at a different endpoint (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn request_url(&self) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }
}

#[async_trait]
impl CompletionBackend for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request_id = Uuid::new_v4().to_string();
        let start = Instant::now();

        info!(
            request_id = %request_id,
            model = %self.model,
            prompt_len = prompt.len(),
            "Starting Gemini request"
        );

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .http
            .post(self.request_url())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = match status.as_u16() {
                401 | 403 => "Invalid API key. Please check your Google API key.".to_string(),
                code => format!("Gemini API error {code}: {error_text}"),
            };
            return Err(anyhow!(message));
        }

        let data: GeminiResponse = response
            .json()
            .await
            .context("Failed to parse Gemini response")?;
        let text = extract_text(&data);

        debug!(
            request_id = %request_id,
            duration_ms = start.elapsed().as_millis() as u64,
            reply_len = text.len(),
            "Gemini request finished"
        );

        Ok(text)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
}

/// Concatenated text of the first candidate; empty when the response
/// carries no candidates at all.
fn extract_text(response: &GeminiResponse) -> String {
    response
        .candidates
        .as_deref()
        .and_then(|c| c.first())
        .and_then(|candidate| candidate.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .map(|p| p.text.as_str())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
}
