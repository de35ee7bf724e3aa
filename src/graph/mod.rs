//! Graph view of a model and shortest-path search over it
//!
//! Model elements are nodes. Edges are derived on demand from three
//! sources: cross-references, containment of children, and the reference
//! from a child back to its container when the model declares one.
//! - `traversal`: the [`ModelProvider`] trait a host model implements
//! - `generator`: per-node edge derivation
//! - `algos`: Dijkstra search and path reconstruction

pub mod algos;
pub mod edge;
pub mod generator;
pub mod path;
pub mod traversal;
pub mod types;
pub mod weights;

pub use algos::ShortestPathSearch;
pub use edge::Edge;
pub use generator::{EdgeGenerator, ModelEdge};
pub use path::{ModelPath, PathReport, PathStep};
pub use traversal::{ModelProvider, RelationInfo, RelationValue};
pub use types::{EdgeKind, HopCost, SearchStats};
pub use weights::{RelationWeights, WeightFn, WeightInput};
