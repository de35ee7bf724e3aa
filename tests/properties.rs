//! Property-based tests for shortest distances
//!
//! Random containment trees with cross-references are searched and the
//! results compared against a Bellman-Ford relaxation over an explicitly
//! enumerated edge list.

use modelpath::graph::{HopCost, RelationWeights, ShortestPathSearch};
use modelpath::model::{MemoryModel, ObjectId};
use proptest::prelude::*;
use std::sync::Arc;

const REFERENCES: usize = 3;

#[derive(Debug, Clone)]
struct Shape {
    nodes: usize,
    /// Container of each node; always an earlier node
    parents: Vec<Option<usize>>,
    /// (from, to, reference relation)
    references: Vec<(usize, usize, usize)>,
    /// Costs of r0, r1, r2, children, parent
    costs: [u32; 5],
    with_inverse: bool,
    source: usize,
}

fn shape() -> impl Strategy<Value = Shape> {
    (2..12usize)
        .prop_flat_map(|n| {
            (
                Just(n),
                prop::collection::vec(prop::option::of(any::<prop::sample::Index>()), n),
                prop::collection::vec((0..n, 0..n, 0..REFERENCES), 0..(n * 2)),
                prop::array::uniform5(0..5u32),
                any::<bool>(),
                0..n,
            )
        })
        .prop_map(|(nodes, parents, references, costs, with_inverse, source)| {
            let parents = parents
                .into_iter()
                .enumerate()
                .map(|(i, parent)| {
                    if i == 0 {
                        None
                    } else {
                        parent.map(|index| index.index(i))
                    }
                })
                .collect();
            Shape {
                nodes,
                parents,
                references,
                costs,
                with_inverse,
                source,
            }
        })
}

fn build(shape: &Shape) -> (MemoryModel, Vec<ObjectId>, RelationWeights) {
    let mut model = MemoryModel::new();
    let children = model.define_relation("children", true, true).unwrap();
    let parent = model.define_relation("parent", false, false).unwrap();
    if shape.with_inverse {
        model.set_inverse(&children, &parent).unwrap();
    }
    let references: Vec<_> = (0..REFERENCES)
        .map(|k| model.define_relation(&format!("r{k}"), false, true).unwrap())
        .collect();

    let objects: Vec<ObjectId> = (0..shape.nodes)
        .map(|_| model.create_object("Node"))
        .collect();
    for (child, container) in shape.parents.iter().enumerate() {
        if let Some(container) = container {
            model
                .contain(objects[*container], &children, objects[child])
                .unwrap();
        }
    }
    for &(from, to, k) in &shape.references {
        model.add_to(objects[from], &references[k], objects[to]).unwrap();
    }

    let mut weights = RelationWeights::uniform()
        .with_relation_cost("children", HopCost::from(shape.costs[3]))
        .with_relation_cost("parent", HopCost::from(shape.costs[4]));
    for k in 0..REFERENCES {
        weights = weights.with_relation_cost(format!("r{k}"), HopCost::from(shape.costs[k]));
    }

    (model, objects, weights)
}

/// Shortest distances by repeated relaxation of every edge
fn oracle(shape: &Shape) -> Vec<Option<u32>> {
    let mut edges: Vec<(usize, usize, u32)> = shape
        .references
        .iter()
        .map(|&(from, to, k)| (from, to, shape.costs[k]))
        .collect();
    for (child, container) in shape.parents.iter().enumerate() {
        if let Some(container) = *container {
            edges.push((container, child, shape.costs[3]));
            if shape.with_inverse {
                edges.push((child, container, shape.costs[4]));
            }
        }
    }

    let mut distance = vec![None; shape.nodes];
    distance[shape.source] = Some(0);
    for _ in 0..shape.nodes {
        for &(from, to, cost) in &edges {
            if let Some(base) = distance[from] {
                let candidate = base + cost;
                if distance[to].is_none_or(|known| candidate < known) {
                    distance[to] = Some(candidate);
                }
            }
        }
    }
    distance
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn distances_match_oracle(shape in shape()) {
        let (model, objects, weights) = build(&shape);
        let source = objects[shape.source];
        let search = ShortestPathSearch::with_weights(&model, source, Arc::new(weights)).unwrap();
        let expected = oracle(&shape);

        for (i, object) in objects.iter().enumerate() {
            let actual = search.distance_to(object).map(|cost| cost.value());
            prop_assert_eq!(actual, expected[i].map(|d| d as f32), "node {}", i);
        }
        prop_assert_eq!(search.stats().reopened, 0);
    }

    #[test]
    fn paths_chain_from_source(shape in shape()) {
        let (model, objects, weights) = build(&shape);
        let source = objects[shape.source];
        let search = ShortestPathSearch::with_weights(&model, source, Arc::new(weights)).unwrap();

        let to_self = search.shortest_path_to(&source);
        prop_assert!(to_self.is_empty());
        prop_assert!(!to_self.is_reachable());

        for object in objects.iter().filter(|object| **object != source) {
            let path = search.shortest_path_to(object);
            match search.distance_to(object) {
                Some(distance) => {
                    prop_assert!(path.is_reachable());
                    prop_assert_eq!(*path.edges()[0].source(), source);
                    prop_assert_eq!(path.edges()[path.len() - 1].target(), object);
                    for pair in path.edges().windows(2) {
                        prop_assert_eq!(pair[0].target(), pair[1].source());
                    }
                    prop_assert_eq!(path.distance(), distance);
                }
                None => {
                    prop_assert!(path.is_empty());
                    prop_assert!(!path.is_reachable());
                }
            }
        }
    }
}
