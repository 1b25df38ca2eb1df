//! Text generation port.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for inference operations.
pub type InferenceResult<T> = Result<T, InferenceError>;

/// Sampling constraints passed with every generation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationConstraints {
    /// Sampling temperature.
    pub temperature: f32,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
}

impl GenerationConstraints {
    /// Creates generation constraints.
    #[must_use]
    pub const fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
        }
    }

    /// Low-temperature constraints for structured output.
    #[must_use]
    pub const fn deterministic(max_tokens: u32) -> Self {
        Self::new(0.1, max_tokens)
    }
}

impl Default for GenerationConstraints {
    fn default() -> Self {
        Self::new(0.7, 1024)
    }
}

/// Opaque text generation backend.
///
/// Callers apply their own deadline around [`InferencePort::generate`].
#[async_trait]
pub trait InferencePort: Send + Sync {
    /// Generates a completion for `prompt`.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError`] when the backend cannot be reached, rejects
    /// the request, or answers with an undecodable body.
    async fn generate(
        &self,
        prompt: &str,
        constraints: GenerationConstraints,
    ) -> InferenceResult<String>;
}

#[async_trait]
impl<T: InferencePort + ?Sized> InferencePort for Arc<T> {
    async fn generate(
        &self,
        prompt: &str,
        constraints: GenerationConstraints,
    ) -> InferenceResult<String> {
        (**self).generate(prompt, constraints).await
    }
}

/// Errors returned by inference adapters.
#[derive(Debug, Clone, Error)]
pub enum InferenceError {
    /// The backend did not answer before the caller's deadline.
    #[error("inference timed out after {0:?}")]
    Timeout(Duration),

    /// The request could not be delivered.
    #[error("inference request failed: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The backend answered with a non-success HTTP status.
    #[error("inference backend returned HTTP {code}")]
    Status {
        /// HTTP status code.
        code: u16,
    },

    /// The backend response did not have the expected shape.
    #[error("inference response could not be decoded: {0}")]
    Decode(String),

    /// The backend has nothing to serve.
    #[error("inference backend unavailable: {0}")]
    Unavailable(String),
}

impl InferenceError {
    /// Wraps a transport error.
    #[must_use]
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Returns whether the failure was a deadline expiry.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}
