//! Graph algorithm implementations
//!
//! - `dijkstra`: single-source weighted shortest paths over a lazily
//!   expanded model graph

pub mod dijkstra;

pub use dijkstra::ShortestPathSearch;
