//! Unit tests for handover execution.
