//! Generative text collaborator
//!
//! [`TextGenerator`] is the seam the plan synthesizer depends on.
//! [`OllamaClient`] talks to an Ollama-compatible `/api/generate` endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::AiConfig;

const CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Error, Debug)]
pub enum AiError {
    #[error("HTTP client error: {0}")]
    Client(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("empty response")]
    Empty,
}

/// Produces free text from a prompt
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, AiError>;

    /// Model identifier for logs
    fn model(&self) -> &str;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Client for Ollama's non-streaming generate API
#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: &str, timeout: Duration) -> Result<Self, AiError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(timeout)
            .build()
            .map_err(|e| AiError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    pub fn from_config(config: &AiConfig) -> Result<Self, AiError> {
        Self::new(&config.base_url, &config.model, config.timeout())
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        let url = format!("{}/api/generate", self.base_url);
        debug!(url = %url, model = %self.model, prompt_len = prompt.len(), "Sending generate request");

        let response = self
            .client
            .post(&url)
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                stream: false,
                format: "json",
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: GenerateResponse = response.json().await?;
        if body.response.trim().is_empty() {
            return Err(AiError::Empty);
        }

        debug!(response_len = body.response.len(), "Received generate response");
        Ok(body.response)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
