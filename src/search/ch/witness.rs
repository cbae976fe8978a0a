use ahash::{HashMap, HashMapExt, HashSet, HashSetExt};

use crate::{
    graphs::{
        contraction_graph::ContractionGraph, HasOutgoingEdges, HasReverseEdges, VertexId, Weight,
    },
    search::collections::radix_queue::RadixQueue,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchRangeLimits {
    pub max_cost: Weight,
    pub max_hop_count: u32,
}

/// Range limited Dijkstra used to look for witness paths. It never enters
/// the vertex under contraction or any contracted vertex.
#[derive(Clone, Default)]
pub struct WitnessSearch {
    touched: HashMap<VertexId, Weight>,
    found: HashSet<VertexId>,
    queue: RadixQueue,
    ignored: Option<VertexId>,
    settled_vertices: usize,
}

impl WitnessSearch {
    pub fn new() -> WitnessSearch {
        WitnessSearch {
            touched: HashMap::new(),
            found: HashSet::new(),
            queue: RadixQueue::new(),
            ignored: None,
            settled_vertices: 0,
        }
    }

    /// Runs from `source` until every target is settled or the popped cost
    /// exceeds `limits.max_cost`. Vertices more than `limits.max_hop_count`
    /// hops away are reached but never expanded.
    ///
    /// Returns true if the search stopped because of one of those two
    /// conditions, false if the queue ran empty.
    pub fn run(
        &mut self,
        graph: &ContractionGraph,
        source: VertexId,
        ignored: VertexId,
        limits: SearchRangeLimits,
        targets: &HashSet<VertexId>,
    ) -> bool {
        self.touched.clear();
        self.found.clear();
        self.queue.clear();
        self.ignored = Some(ignored);
        self.settled_vertices = 0;

        self.touched.insert(source, 0);
        self.queue.push(0, source, 0);

        while let Some((cost, vertex, hops)) = self.queue.pop() {
            if self.touched.get(&vertex).is_some_and(|&best| best < cost) {
                continue;
            }
            self.settled_vertices += 1;

            if targets.contains(&vertex) {
                self.found.insert(vertex);
            }
            if self.found.len() == targets.len() || cost > limits.max_cost {
                return true;
            }

            for edge in graph.vertex(vertex).edges() {
                let neighbour = edge.to();
                if neighbour == ignored || graph.vertex(neighbour).is_contracted() {
                    continue;
                }

                let alternative = cost + edge.length();
                if self
                    .touched
                    .get(&neighbour)
                    .map_or(true, |&current| alternative < current)
                {
                    self.touched.insert(neighbour, alternative);
                    if hops + 1 < limits.max_hop_count {
                        self.queue.push(alternative, neighbour, hops + 1);
                    }
                }
            }
        }

        false
    }

    /// Cost of the best witness found to `vertex`, if any.
    pub fn path_length(&self, vertex: VertexId) -> Option<Weight> {
        self.touched.get(&vertex).copied()
    }

    /// Best witness cost to `target` allowing one more hop over its backward
    /// edges, which the hop limited search may not have taken.
    pub fn one_hop_backward_search(
        &self,
        graph: &ContractionGraph,
        target: VertexId,
    ) -> Option<Weight> {
        let relaxed = graph
            .vertex(target)
            .reverse_edges()
            .iter()
            .filter(|edge| Some(edge.to()) != self.ignored)
            .filter_map(|edge| {
                self.path_length(edge.to())
                    .map(|cost| cost + edge.length())
            })
            .min();

        match (self.path_length(target), relaxed) {
            (Some(direct), Some(relaxed)) => Some(direct.min(relaxed)),
            (direct, relaxed) => direct.or(relaxed),
        }
    }

    /// Vertices settled by the last run.
    pub fn settled_vertices(&self) -> usize {
        self.settled_vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphs::edge::Edge;

    fn square() -> ContractionGraph {
        // 0 -> 1 -> 2 is the path through the vertex under contraction,
        // 0 -> 3 -> 2 a witness.
        let mut graph = ContractionGraph::new();
        graph.add_edge(Edge::new(0, 0, 1, 1));
        graph.add_edge(Edge::new(1, 1, 2, 1));
        graph.add_edge(Edge::new(2, 0, 3, 1));
        graph.add_edge(Edge::new(3, 3, 2, 1));
        graph
    }

    #[test]
    fn finds_witness_avoiding_ignored_vertex() {
        let graph = square();
        let targets = HashSet::from_iter([2]);
        let mut search = WitnessSearch::new();
        let limits = SearchRangeLimits {
            max_cost: 10,
            max_hop_count: 4,
        };

        assert!(search.run(&graph, 0, 1, limits, &targets));
        assert_eq!(search.path_length(2), Some(2));
        assert_eq!(search.path_length(1), None);
    }

    #[test]
    fn hop_limit_is_completed_by_one_hop_backward_search() {
        let graph = square();
        let targets = HashSet::from_iter([2]);
        let mut search = WitnessSearch::new();
        let limits = SearchRangeLimits {
            max_cost: 10,
            max_hop_count: 1,
        };

        search.run(&graph, 0, 1, limits, &targets);
        assert_eq!(search.path_length(3), Some(1));
        assert_eq!(search.path_length(2), None);
        assert_eq!(search.one_hop_backward_search(&graph, 2), Some(2));
    }

    #[test]
    fn contracted_vertices_are_not_entered() {
        let mut graph = square();
        graph.set_ordering_rank(3, 1);
        let targets = HashSet::from_iter([2]);
        let mut search = WitnessSearch::new();
        let limits = SearchRangeLimits {
            max_cost: 10,
            max_hop_count: 4,
        };

        assert!(!search.run(&graph, 0, 1, limits, &targets));
        assert_eq!(search.one_hop_backward_search(&graph, 2), None);
    }
}
