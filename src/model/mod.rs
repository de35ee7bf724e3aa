//! Host model implementations
//!
//! The search reads models only through [`ModelProvider`](crate::graph::ModelProvider).
//! [`MemoryModel`] is a small arena-backed implementation for callers that
//! build their models programmatically.

pub mod memory;

pub use memory::{MemoryModel, ObjectId, Relation, RelationDef};
