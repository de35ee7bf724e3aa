use crate::error::Result;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// One relation a node can hold, as declared by the model's schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationInfo<R> {
    pub relation: R,
    /// Ordered, multi-valued relation
    pub many: bool,
    /// The node owns its targets through this relation
    pub containment: bool,
    /// Opposite of a containment: points from a child to its container.
    /// Never reported as a cross-reference.
    pub container: bool,
}

/// Current value of a relation on one node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationValue<N> {
    Single(Option<N>),
    Many(Vec<N>),
}

impl<N> RelationValue<N> {
    /// Targets in order, paired with their position in the relation value
    pub fn into_indexed(self) -> Vec<(usize, N)> {
        match self {
            RelationValue::Single(target) => target.into_iter().map(|n| (0, n)).collect(),
            RelationValue::Many(targets) => targets.into_iter().enumerate().collect(),
        }
    }
}

/// Trait for inspecting the relational structure of a host model.
///
/// The search only ever reads through this trait, one node at a time, so
/// adjacency is derived on demand and never materialized up front.
pub trait ModelProvider {
    /// Identity handle of a model element
    type Node: Clone + Eq + Hash + Debug;
    /// A relation of the schema; `Display` yields its name
    type Relation: Clone + Eq + Hash + Debug + Display;

    fn outgoing_relations(&self, node: &Self::Node) -> Result<Vec<RelationInfo<Self::Relation>>>;

    fn relation_value(
        &self,
        node: &Self::Node,
        relation: &Self::Relation,
    ) -> Result<RelationValue<Self::Node>>;

    fn container_of(&self, node: &Self::Node) -> Result<Option<Self::Node>>;

    /// Relation through which the node's container holds it; `None` for roots
    fn containment_relation_of(&self, node: &Self::Node) -> Result<Option<Self::Relation>>;

    fn inverse_of(&self, relation: &Self::Relation) -> Result<Option<Self::Relation>>;

    /// Every node in the tree below `root`, including `root` itself
    fn all_nodes_of(&self, root: &Self::Node) -> Result<Vec<Self::Node>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_value_indexed_at_zero() {
        let value = RelationValue::Single(Some("b"));
        assert_eq!(value.into_indexed(), vec![(0, "b")]);
    }

    #[test]
    fn test_unset_single_value_is_empty() {
        let value: RelationValue<&str> = RelationValue::Single(None);
        assert!(value.into_indexed().is_empty());
    }

    #[test]
    fn test_many_value_keeps_positions() {
        let value = RelationValue::Many(vec!["x", "y", "x"]);
        assert_eq!(value.into_indexed(), vec![(0, "x"), (1, "y"), (2, "x")]);
    }
}
