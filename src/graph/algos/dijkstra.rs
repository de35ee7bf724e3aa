use crate::error::Result;
use crate::graph::edge::Edge;
use crate::graph::generator::EdgeGenerator;
use crate::graph::path::ModelPath;
use crate::graph::traversal::ModelProvider;
use crate::graph::types::{HopCost, SearchStats};
use crate::graph::weights::RelationWeights;
use crate::trace_time;
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::sync::Arc;
use std::time::Instant;

/// Wrapper for BinaryHeap to use as min-heap (ordered by accumulated cost)
#[derive(Debug, Clone)]
pub(crate) struct HeapEntry<N> {
    pub node: N,
    pub accumulated_cost: HopCost,
}

impl<N> PartialEq for HeapEntry<N> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N> Eq for HeapEntry<N> {}

impl<N> PartialOrd for HeapEntry<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N> Ord for HeapEntry<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.accumulated_cost.total_cmp(&other.accumulated_cost)
    }
}

/// State tracked while the search runs
struct DijkstraState<N, R> {
    visited: HashSet<N>,
    /// Frontier membership; `heap` may still hold stale entries
    unvisited: HashSet<N>,
    heap: BinaryHeap<Reverse<HeapEntry<N>>>,
    distance: HashMap<N, HopCost>,
    predecessors: HashMap<N, Arc<Edge<N, R>>>,
    stats: SearchStats,
}

impl<N, R> DijkstraState<N, R>
where
    N: Clone + Eq + Hash,
    R: Display,
{
    fn seeded(source: &N) -> Self {
        let mut state = Self {
            visited: HashSet::new(),
            unvisited: HashSet::new(),
            heap: BinaryHeap::new(),
            distance: HashMap::new(),
            predecessors: HashMap::new(),
            stats: SearchStats::default(),
        };
        state.distance.insert(source.clone(), HopCost::ZERO);
        state.push_unvisited(source.clone(), HopCost::ZERO);
        state
    }

    fn push_unvisited(&mut self, node: N, cost: HopCost) {
        self.unvisited.insert(node.clone());
        self.heap.push(Reverse(HeapEntry {
            node,
            accumulated_cost: cost,
        }));
    }

    /// Unvisited node with the smallest known distance
    fn pop_nearest(&mut self) -> Option<(N, HopCost)> {
        while let Some(Reverse(HeapEntry {
            node,
            accumulated_cost,
        })) = self.heap.pop()
        {
            // Stale: already settled, or a shorter distance was recorded later.
            if !self.unvisited.contains(&node) {
                continue;
            }
            if self
                .distance
                .get(&node)
                .is_some_and(|known| known.total_cmp(&accumulated_cost) == Ordering::Less)
            {
                continue;
            }
            return Some((node, accumulated_cost));
        }
        None
    }

    fn set_visited(&mut self, node: &N) {
        self.unvisited.remove(node);
        self.visited.insert(node.clone());
        self.stats.settled += 1;
    }

    fn is_shorter_than_known(&self, target: &N, candidate: HopCost) -> bool {
        match self.distance.get(target) {
            Some(known) => candidate.total_cmp(known) == Ordering::Less,
            None => true,
        }
    }

    fn relax(&mut self, edge: Arc<Edge<N, R>>, base: HopCost) {
        let candidate = base + edge.distance();
        if !self.is_shorter_than_known(edge.target(), candidate) {
            return;
        }

        let target = edge.target().clone();
        self.distance.insert(target.clone(), candidate);
        self.predecessors.insert(target.clone(), edge);
        self.stats.relaxations += 1;

        // A visited node goes back on the frontier but stays in `visited`.
        if self.visited.contains(&target) {
            self.stats.reopened += 1;
        }
        self.push_unvisited(target, candidate);
    }
}

/// Completed single-source shortest-path search over a model.
///
/// Construction runs Dijkstra's algorithm to exhaustion from `source`,
/// asking the model for outgoing edges one settled node at a time. Paths to
/// any number of targets are then read from the predecessor map without
/// searching again.
pub struct ShortestPathSearch<N, R> {
    source: N,
    visited: HashSet<N>,
    distance: HashMap<N, HopCost>,
    predecessors: HashMap<N, Arc<Edge<N, R>>>,
    stats: SearchStats,
}

impl<N, R> ShortestPathSearch<N, R>
where
    N: Clone + Eq + Hash + Debug,
    R: Clone + Eq + Hash + Debug + Display,
{
    /// Search with every edge weighing 1
    pub fn new<M>(model: &M, source: N) -> Result<Self>
    where
        M: ModelProvider<Node = N, Relation = R>,
    {
        Self::with_weights(model, source, Arc::new(RelationWeights::uniform()))
    }

    #[tracing::instrument(
        level = "debug",
        skip(model, source, weights),
        fields(source = ?source, default_cost = %weights.default_cost())
    )]
    pub fn with_weights<M>(model: &M, source: N, weights: Arc<RelationWeights>) -> Result<Self>
    where
        M: ModelProvider<Node = N, Relation = R>,
    {
        let start = Instant::now();
        let generator = EdgeGenerator::new(model, weights);
        let mut state = DijkstraState::seeded(&source);

        while let Some((node, accumulated_cost)) = state.pop_nearest() {
            state.set_visited(&node);

            let edges = generator.outgoing_edges(&node)?;
            state.stats.edges_generated += edges.len();
            for edge in edges {
                state.relax(edge, accumulated_cost);
            }
        }

        let stats = state.stats;
        tracing::debug!(
            settled = stats.settled,
            edges_generated = stats.edges_generated,
            relaxations = stats.relaxations,
            reopened = stats.reopened,
            "shortest_path_search"
        );
        trace_time!(start, "shortest_path_search", settled = stats.settled);

        Ok(Self {
            source,
            visited: state.visited,
            distance: state.distance,
            predecessors: state.predecessors,
            stats,
        })
    }

    pub fn source(&self) -> &N {
        &self.source
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Shortest known distance from the source; `None` if never reached
    pub fn distance_to(&self, node: &N) -> Option<HopCost> {
        self.distance.get(node).copied()
    }

    pub fn is_reached(&self, node: &N) -> bool {
        self.distance.contains_key(node)
    }

    /// Every node reached, the source included, in no particular order
    pub fn reached_nodes(&self) -> impl Iterator<Item = &N> {
        self.distance.keys()
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Backtrack from `target` through the predecessor edges.
    ///
    /// Unreached targets and the source itself yield an empty path.
    pub fn shortest_path_to(&self, target: &N) -> ModelPath<N, R> {
        let mut edges: Vec<Arc<Edge<N, R>>> = Vec::new();
        let mut next = self.predecessors.get(target);

        while let Some(edge) = next {
            edges.push(Arc::clone(edge));
            // A well-formed chain never repeats a node.
            if *edge.source() == self.source || edges.len() > self.predecessors.len() {
                break;
            }
            next = self.predecessors.get(edge.source());
        }

        edges.reverse();
        ModelPath::new(self.source.clone(), target.clone(), edges)
    }
}

impl<N: Debug, R> Debug for ShortestPathSearch<N, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShortestPathSearch")
            .field("source", &self.source)
            .field("reached", &self.distance.len())
            .field("stats", &self.stats)
            .finish()
    }
}
