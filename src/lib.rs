//! Modelpath Library
//!
//! Shortest paths between elements of a structured model. Elements are
//! nodes; cross-references, containment, and back-references to containers
//! are edges derived lazily from the host model. A single Dijkstra search
//! from a source answers path queries to any number of targets.

pub mod config;
pub mod error;
pub mod graph;
pub mod logging;
pub mod model;
pub mod space;

pub use config::PathConfig;
pub use error::{ModelPathError, Result};
pub use graph::{
    Edge, EdgeKind, HopCost, ModelPath, ModelProvider, RelationWeights, ShortestPathSearch,
};
pub use space::ObjectSpace;
