//! Lazy adjacency: the outgoing edges of one node, derived from the model

use crate::error::Result;
use crate::graph::edge::Edge;
use crate::graph::traversal::{ModelProvider, RelationInfo};
use crate::graph::types::EdgeKind;
use crate::graph::weights::RelationWeights;
use std::sync::Arc;

/// Edge type produced for a model
pub type ModelEdge<M> = Edge<<M as ModelProvider>::Node, <M as ModelProvider>::Relation>;

/// Produces outgoing edges node by node. The union of:
/// - one edge per cross-referenced node,
/// - one edge per directly contained node,
/// - one edge to the container, only when the containment has an inverse.
pub struct EdgeGenerator<'m, M: ModelProvider> {
    model: &'m M,
    weights: Arc<RelationWeights>,
}

impl<'m, M: ModelProvider> EdgeGenerator<'m, M> {
    pub fn new(model: &'m M, weights: Arc<RelationWeights>) -> Self {
        Self { model, weights }
    }

    pub fn outgoing_edges(&self, node: &M::Node) -> Result<Vec<Arc<ModelEdge<M>>>> {
        let relations = self.model.outgoing_relations(node)?;

        let mut edges = self.relation_edges(node, &relations, EdgeKind::CrossReference)?;
        edges.extend(self.relation_edges(node, &relations, EdgeKind::Containment)?);
        if let Some(edge) = self.container_edge(node)? {
            edges.push(edge);
        }

        Ok(edges)
    }

    /// Cross-reference or containment edges, one per target
    fn relation_edges(
        &self,
        node: &M::Node,
        relations: &[RelationInfo<M::Relation>],
        kind: EdgeKind,
    ) -> Result<Vec<Arc<ModelEdge<M>>>> {
        let wanted = |info: &RelationInfo<M::Relation>| match kind {
            EdgeKind::Containment => info.containment,
            EdgeKind::CrossReference => !info.containment && !info.container,
            EdgeKind::Container => false,
        };

        let mut edges = Vec::new();
        for info in relations.iter().filter(|info| wanted(*info)) {
            let value = self.model.relation_value(node, &info.relation)?;
            for (index, target) in value.into_indexed() {
                let index = if info.many { index } else { 0 };
                edges.push(Arc::new(Edge::new(
                    node.clone(),
                    info.relation.clone(),
                    target,
                    index,
                    kind,
                    Arc::clone(&self.weights),
                )));
            }
        }
        Ok(edges)
    }

    fn container_edge(&self, node: &M::Node) -> Result<Option<Arc<ModelEdge<M>>>> {
        let Some(container) = self.model.container_of(node)? else {
            return Ok(None);
        };
        let Some(containment) = self.model.containment_relation_of(node)? else {
            return Ok(None);
        };
        let Some(inverse) = self.model.inverse_of(&containment)? else {
            return Ok(None);
        };

        // A container reference is always single-valued.
        Ok(Some(Arc::new(Edge::new(
            node.clone(),
            inverse,
            container,
            0,
            EdgeKind::Container,
            Arc::clone(&self.weights),
        ))))
    }
}
