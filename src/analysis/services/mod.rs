//! Service layer for query analysis.

mod analyzer;
mod config;

pub use analyzer::QueryAnalyzer;
pub use config::AnalyzerConfig;
