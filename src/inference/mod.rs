//! Text generation capability.
//!
//! Every LLM-backed component talks to the model through
//! [`ports::InferencePort`]. Adapters cover a local Ollama daemon and a
//! scripted in-memory backend.

pub mod adapters;
pub mod ports;
