//! Ollama `/api/generate` adapter.

use crate::inference::ports::{
    GenerationConstraints, InferenceError, InferencePort, InferenceResult,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Default Ollama base URL.
pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// Non-streaming Ollama text generation client.
#[derive(Debug, Clone)]
pub struct OllamaInference {
    client: Client,
    base_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaInference {
    /// Creates a client for `model` served at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        let base: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base.trim_end_matches('/').to_owned(),
            model: model.into(),
        }
    }

    /// Creates a client for `model` on a local Ollama daemon.
    #[must_use]
    pub fn local(model: impl Into<String>) -> Self {
        Self::new(DEFAULT_OLLAMA_BASE_URL, model)
    }

    /// Replaces the underlying HTTP client.
    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Returns the model name sent with each request.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }
}

#[async_trait]
impl InferencePort for OllamaInference {
    async fn generate(
        &self,
        prompt: &str,
        constraints: GenerationConstraints,
    ) -> InferenceResult<String> {
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: constraints.temperature,
                num_predict: constraints.max_tokens,
            },
        };

        tracing::debug!(
            provider = "ollama",
            model = %self.model,
            prompt_chars = prompt.chars().count(),
            "sending generation request"
        );

        let response = self
            .client
            .post(self.generate_url())
            .json(&body)
            .send()
            .await
            .map_err(InferenceError::transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(InferenceError::Status {
                code: status.as_u16(),
            });
        }

        let decoded: GenerateResponse = response
            .json()
            .await
            .map_err(|err| InferenceError::Decode(err.to_string()))?;

        Ok(decoded.response)
    }
}
