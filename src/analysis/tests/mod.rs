//! Unit tests for query analysis.
