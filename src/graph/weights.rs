//! Edge weighting by relation
//!
//! Resolution order for an edge's distance:
//! 1. a weight registered for the relation name (constant or function)
//! 2. the cost registered for the edge kind (containment, cross-reference, container)
//! 3. the global default (1.0 unless configured)

use crate::graph::types::{EdgeKind, HopCost};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// What a weight function gets to see about the edge being weighed
#[derive(Debug, Clone, Copy)]
pub struct WeightInput<'a> {
    pub relation: &'a str,
    pub kind: EdgeKind,
    pub index: usize,
}

/// Computes the distance of one edge
pub type WeightFn = Arc<dyn Fn(&WeightInput<'_>) -> HopCost + Send + Sync>;

#[derive(Clone)]
enum Weight {
    Fixed(HopCost),
    Computed(WeightFn),
}

/// Per-relation distance strategy shared by all edges of a search
#[derive(Clone, Default)]
pub struct RelationWeights {
    default: HopCost,
    by_kind: HashMap<EdgeKind, HopCost>,
    by_relation: HashMap<String, Weight>,
}

impl RelationWeights {
    /// Every edge costs 1.0
    pub fn uniform() -> Self {
        Self::default()
    }

    pub fn with_default(mut self, cost: HopCost) -> Self {
        self.default = cost;
        self
    }

    pub fn with_kind_cost(mut self, kind: EdgeKind, cost: HopCost) -> Self {
        self.by_kind.insert(kind, cost);
        self
    }

    pub fn with_relation_cost(mut self, relation: impl Into<String>, cost: HopCost) -> Self {
        self.by_relation.insert(relation.into(), Weight::Fixed(cost));
        self
    }

    pub fn with_relation_fn<F>(mut self, relation: impl Into<String>, f: F) -> Self
    where
        F: Fn(&WeightInput<'_>) -> HopCost + Send + Sync + 'static,
    {
        self.by_relation
            .insert(relation.into(), Weight::Computed(Arc::new(f)));
        self
    }

    pub fn default_cost(&self) -> HopCost {
        self.default
    }

    /// Distance of an edge labeled `relation`, produced by rule `kind`
    pub fn distance(&self, relation: &str, kind: EdgeKind, index: usize) -> HopCost {
        match self.by_relation.get(relation) {
            Some(Weight::Fixed(cost)) => *cost,
            Some(Weight::Computed(f)) => f(&WeightInput {
                relation,
                kind,
                index,
            }),
            None => self.by_kind.get(&kind).copied().unwrap_or(self.default),
        }
    }
}

impl fmt::Debug for RelationWeights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut relations: Vec<&str> = self.by_relation.keys().map(String::as_str).collect();
        relations.sort_unstable();
        f.debug_struct("RelationWeights")
            .field("default", &self.default)
            .field("by_kind", &self.by_kind)
            .field("relations", &relations)
            .finish()
    }
}
