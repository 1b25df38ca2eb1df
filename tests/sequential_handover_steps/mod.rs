//! Step definitions for sequential handover BDD scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
