//! Port contracts for the agent registry.
//!
//! The catalog port keeps the registry service independent of where
//! descriptors are held.

pub mod catalog;

pub use catalog::{
    AgentCatalog, CatalogError, CatalogResult, CatalogSnapshot, DescriptorChange, UpsertOutcome,
};
