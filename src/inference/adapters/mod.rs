//! Inference adapter implementations.

pub mod ollama;
pub mod scripted;

pub use ollama::{DEFAULT_OLLAMA_BASE_URL, OllamaInference};
pub use scripted::{ScriptedInference, ScriptedReply};
