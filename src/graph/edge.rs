//! A single traversable step of the derived model graph

use crate::error::{ModelPathError, Result};
use crate::graph::traversal::{ModelProvider, RelationValue};
use crate::graph::types::{EdgeKind, HopCost};
use crate::graph::weights::RelationWeights;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Directed, labeled connection from `source` to `target` via `relation`.
///
/// Edges have identity semantics: two edges built separately between the
/// same nodes are distinct. Compare with [`Edge::same`].
pub struct Edge<N, R> {
    source: N,
    relation: R,
    target: N,
    index: usize,
    kind: EdgeKind,
    weights: Arc<RelationWeights>,
    distance: OnceLock<HopCost>,
}

impl<N, R> Edge<N, R> {
    pub fn new(
        source: N,
        relation: R,
        target: N,
        index: usize,
        kind: EdgeKind,
        weights: Arc<RelationWeights>,
    ) -> Self {
        Self {
            source,
            relation,
            target,
            index,
            kind,
            weights,
            distance: OnceLock::new(),
        }
    }

    pub fn source(&self) -> &N {
        &self.source
    }

    pub fn relation(&self) -> &R {
        &self.relation
    }

    pub fn target(&self) -> &N {
        &self.target
    }

    /// Position of `target` in the relation value when it was multi-valued
    /// at construction time, else 0
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    /// Identity comparison
    pub fn same(a: &Arc<Self>, b: &Arc<Self>) -> bool {
        Arc::ptr_eq(a, b)
    }
}

impl<N, R: fmt::Display> Edge<N, R> {
    /// Weight of this edge, computed on first use and cached
    pub fn distance(&self) -> HopCost {
        *self.distance.get_or_init(|| {
            self.weights
                .distance(&self.relation.to_string(), self.kind, self.index)
        })
    }
}

impl<N, R> Edge<N, R>
where
    N: Clone + Eq + std::hash::Hash + fmt::Debug,
    R: Clone + Eq + std::hash::Hash + fmt::Debug + fmt::Display,
{
    /// Build an edge from `(source, relation, target)` alone, looking up the
    /// relation on the model to find its kind and the target's position.
    ///
    /// For a multi-valued relation the index is the first position holding
    /// `target`. Fails when the relation does not currently hold `target`.
    pub fn resolve<M>(
        model: &M,
        weights: Arc<RelationWeights>,
        source: N,
        relation: R,
        target: N,
    ) -> Result<Self>
    where
        M: ModelProvider<Node = N, Relation = R>,
    {
        let info = model
            .outgoing_relations(&source)?
            .into_iter()
            .find(|info| info.relation == relation)
            .ok_or_else(|| ModelPathError::not_applicable(&relation, format!("{:?}", source)))?;

        let index = match model.relation_value(&source, &relation)? {
            RelationValue::Many(targets) => targets.iter().position(|n| *n == target),
            RelationValue::Single(held) => (held.as_ref() == Some(&target)).then_some(0),
        };
        let index = index.ok_or_else(|| {
            ModelPathError::invalid_value(
                "edge target",
                format!("{:?} is not held by {} of {:?}", target, relation, source),
            )
        })?;

        let kind = if info.containment {
            EdgeKind::Containment
        } else if info.container {
            EdgeKind::Container
        } else {
            EdgeKind::CrossReference
        };

        Ok(Self::new(source, relation, target, index, kind, weights))
    }
}

impl<N: fmt::Debug, R: fmt::Debug> fmt::Debug for Edge<N, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Edge")
            .field("source", &self.source)
            .field("relation", &self.relation)
            .field("target", &self.target)
            .field("index", &self.index)
            .field("kind", &self.kind)
            .finish()
    }
}
