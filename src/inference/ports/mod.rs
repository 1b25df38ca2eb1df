//! Port contracts for text generation.

pub mod generator;

pub use generator::{GenerationConstraints, InferenceError, InferencePort, InferenceResult};
