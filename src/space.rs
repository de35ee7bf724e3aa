//! Snapshot of the objects present before a model transformation

use crate::error::Result;
use crate::graph::{ModelPath, ModelProvider, ShortestPathSearch};
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

/// Objects found below a root at capture time.
///
/// Anything not in the snapshot is treated as created afterwards.
#[derive(Debug, Clone)]
pub struct ObjectSpace<N> {
    root: N,
    initial: HashSet<N>,
}

impl<N: Clone + Eq + Hash + Debug> ObjectSpace<N> {
    pub fn capture<M>(model: &M, root: N) -> Result<Self>
    where
        M: ModelProvider<Node = N>,
    {
        let initial: HashSet<N> = model.all_nodes_of(&root)?.into_iter().collect();
        tracing::debug!(objects = initial.len(), "object_space_captured");
        Ok(Self { root, initial })
    }

    pub fn root(&self) -> &N {
        &self.root
    }

    pub fn is_initial_object(&self, node: &N) -> bool {
        self.initial.contains(node)
    }

    pub fn is_new_object(&self, node: &N) -> bool {
        !self.is_initial_object(node)
    }

    pub fn len(&self) -> usize {
        self.initial.len()
    }

    pub fn is_empty(&self) -> bool {
        self.initial.is_empty()
    }

    /// Run a fresh search from `source` and return its path to `target`
    pub fn find_shortest_path<M>(
        &self,
        model: &M,
        source: N,
        target: &N,
    ) -> Result<ModelPath<N, M::Relation>>
    where
        M: ModelProvider<Node = N>,
    {
        let search = ShortestPathSearch::new(model, source)?;
        Ok(search.shortest_path_to(target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MemoryModel;

    #[test]
    fn test_capture_snapshots_tree() {
        let mut model = MemoryModel::new();
        let owned = model.define_relation("owned", true, true).unwrap();
        let root = model.create_object("Package");
        let child = model.create_object("Class");
        let outside = model.create_object("Class");
        model.contain(root, &owned, child).unwrap();

        let space = ObjectSpace::capture(&model, root).unwrap();
        assert_eq!(space.len(), 2);
        assert!(!space.is_empty());
        assert_eq!(*space.root(), root);
        assert!(space.is_initial_object(&root));
        assert!(space.is_initial_object(&child));
        assert!(space.is_new_object(&outside));

        let later = model.create_object("Class");
        model.contain(root, &owned, later).unwrap();
        assert!(space.is_new_object(&later));
    }

    #[test]
    fn test_find_shortest_path_runs_search() {
        let mut model = MemoryModel::new();
        let owned = model.define_relation("owned", true, true).unwrap();
        let root = model.create_object("Package");
        let child = model.create_object("Class");
        model.contain(root, &owned, child).unwrap();

        let space = ObjectSpace::capture(&model, root).unwrap();
        let path = space.find_shortest_path(&model, root, &child).unwrap();
        assert!(path.is_reachable());
        assert_eq!(path.len(), 1);

        let back = space.find_shortest_path(&model, child, &root).unwrap();
        assert!(!back.is_reachable());
    }
}
