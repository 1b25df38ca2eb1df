//! Unit tests for the A2A protocol.

mod messenger_tests;
