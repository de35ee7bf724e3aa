//! Reconstructed shortest paths

use crate::error::Result;
use crate::graph::edge::Edge;
use crate::graph::types::{EdgeKind, HopCost};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Ordered edges from `source` to `target`.
///
/// An empty path means the target was not reached, or is the source itself.
pub struct ModelPath<N, R> {
    source: N,
    target: N,
    edges: Vec<Arc<Edge<N, R>>>,
}

impl<N, R> ModelPath<N, R> {
    /// `edges` must be ordered from source to target
    pub(crate) fn new(source: N, target: N, edges: Vec<Arc<Edge<N, R>>>) -> Self {
        Self {
            source,
            target,
            edges,
        }
    }

    pub fn source(&self) -> &N {
        &self.source
    }

    pub fn target(&self) -> &N {
        &self.target
    }

    pub fn edges(&self) -> &[Arc<Edge<N, R>>] {
        &self.edges
    }

    /// Edges from target back to source. The path itself is unchanged.
    pub fn reversed_edges(&self) -> Vec<Arc<Edge<N, R>>> {
        self.edges.iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl<N: PartialEq, R> ModelPath<N, R> {
    /// True when the edges start at the search source. A path from a node
    /// to itself has no edges and is therefore not reachable.
    pub fn is_reachable(&self) -> bool {
        self.edges
            .first()
            .is_some_and(|first| *first.source() == self.source)
    }
}

impl<N: Clone, R> ModelPath<N, R> {
    /// Nodes along the path, source first; empty for an empty path
    pub fn nodes(&self) -> Vec<N> {
        let Some(first) = self.edges.first() else {
            return Vec::new();
        };
        std::iter::once(first.source().clone())
            .chain(self.edges.iter().map(|edge| edge.target().clone()))
            .collect()
    }
}

impl<N, R: fmt::Display> ModelPath<N, R> {
    /// Sum of the edge distances; zero for an empty path
    pub fn distance(&self) -> HopCost {
        self.edges.iter().map(|edge| edge.distance()).sum()
    }
}

impl<N: PartialEq + fmt::Display, R: fmt::Display> ModelPath<N, R> {
    pub fn report(&self) -> PathReport {
        PathReport {
            from: self.source.to_string(),
            to: self.target.to_string(),
            found: self.is_reachable(),
            distance: self.distance().value(),
            steps: self
                .edges
                .iter()
                .map(|edge| PathStep {
                    from: edge.source().to_string(),
                    to: edge.target().to_string(),
                    relation: edge.relation().to_string(),
                    kind: edge.kind(),
                    index: edge.index(),
                    distance: edge.distance().value(),
                })
                .collect(),
        }
    }
}

impl<N: fmt::Debug, R: fmt::Debug> fmt::Debug for ModelPath<N, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelPath")
            .field("source", &self.source)
            .field("target", &self.target)
            .field("edges", &self.edges)
            .finish()
    }
}

/// One step of a [`PathReport`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathStep {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub relation: String,
    pub kind: EdgeKind,
    pub index: usize,
    pub distance: f32,
}

/// Serializable summary of a path
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathReport {
    pub from: String,
    pub to: String,
    pub found: bool,
    pub distance: f32,
    pub steps: Vec<PathStep>,
}

impl PathReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
