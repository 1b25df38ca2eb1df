//! Unit tests for agent selection.
