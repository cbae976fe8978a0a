use ahash::HashSet;

use super::{
    shortcut_filter::{
        classify_shortcuts, filter_duplicate_shortcuts, merge_twoway_shortcuts, ShortcutContainer,
    },
    witness::{SearchRangeLimits, WitnessSearch},
    ContractionParameters,
};
use crate::graphs::{
    contraction_graph::ContractionGraph, edge::Edge, EdgeId, HasOutgoingEdges, HasReverseEdges,
    VertexId, Weight,
};

/// Longest edge from `vertex` to an uncontracted target other than `source`.
fn max_outgoing_length(
    graph: &ContractionGraph,
    source: VertexId,
    vertex: VertexId,
) -> Option<Weight> {
    graph
        .vertex(vertex)
        .edges()
        .iter()
        .filter(|edge| edge.to() != source && !graph.vertex(edge.to()).is_contracted())
        .map(Edge::length)
        .max()
}

/// Cheapest uncontracted backward edge into any uncontracted target of `vertex`.
fn targets_min_ingoing_length(graph: &ContractionGraph, vertex: VertexId) -> Option<Weight> {
    graph
        .vertex(vertex)
        .edges()
        .iter()
        .filter(|edge| !graph.vertex(edge.to()).is_contracted())
        .flat_map(|edge| graph.vertex(edge.to()).reverse_edges().iter())
        .filter(|edge| !graph.vertex(edge.to()).is_contracted())
        .map(Edge::length)
        .min()
}

/// Decides which shortcuts the contraction of a vertex needs.
#[derive(Clone)]
pub struct ShortcutFinder {
    parameters: ContractionParameters,
    witness_search: WitnessSearch,
    last_edge_id: EdgeId,
    search_space_size: usize,
}

impl ShortcutFinder {
    /// Shortcut uids continue after `last_edge_id`.
    pub fn new(parameters: ContractionParameters, last_edge_id: EdgeId) -> ShortcutFinder {
        ShortcutFinder {
            parameters,
            witness_search: WitnessSearch::new(),
            last_edge_id,
            search_space_size: 0,
        }
    }

    /// Settled vertices summed over all witness searches of the last call to
    /// [`ShortcutFinder::find_shortcuts`].
    pub fn search_space_size(&self) -> usize {
        self.search_space_size
    }

    pub fn last_edge_id(&self) -> EdgeId {
        self.last_edge_id
    }

    fn next_edge_id(&mut self) -> EdgeId {
        self.last_edge_id += 1;
        self.last_edge_id
    }

    /// Shortcuts needed to keep all distances between the uncontracted
    /// neighbours of `vertex` once it is contracted.
    pub fn find_shortcuts(&mut self, graph: &ContractionGraph, vertex: VertexId) -> Vec<Edge> {
        self.search_space_size = 0;

        let mut shortcuts = Vec::new();
        for reverse_edge in graph.vertex(vertex).reverse_edges() {
            let found = self.find_shortcuts_from(graph, vertex, reverse_edge);
            shortcuts.extend(filter_duplicate_shortcuts(found));
        }

        merge_twoway_shortcuts(filter_duplicate_shortcuts(shortcuts))
    }

    /// Shortcuts through `vertex`, sorted into new and improving ones against
    /// the current state of `graph`.
    pub fn find_classified_shortcuts(
        &mut self,
        graph: &ContractionGraph,
        vertex: VertexId,
    ) -> ShortcutContainer {
        let shortcuts = self.find_shortcuts(graph, vertex);
        classify_shortcuts(graph, shortcuts, || self.next_edge_id())
    }

    /// Shortcuts through `vertex` starting at the tail of `reverse_edge`.
    fn find_shortcuts_from(
        &mut self,
        graph: &ContractionGraph,
        vertex: VertexId,
        reverse_edge: &Edge,
    ) -> Vec<Edge> {
        let source = reverse_edge.to();
        if graph.vertex(source).is_contracted() {
            return Vec::new();
        }
        let Some(max_outgoing) = max_outgoing_length(graph, source, vertex) else {
            return Vec::new();
        };
        let min_ingoing = targets_min_ingoing_length(graph, vertex).unwrap_or(0);

        let limits = SearchRangeLimits {
            max_cost: (reverse_edge.length() + max_outgoing).saturating_sub(min_ingoing),
            max_hop_count: self.parameters.hop_count.saturating_sub(1),
        };
        let targets: HashSet<VertexId> = graph
            .vertex(vertex)
            .edges()
            .iter()
            .map(Edge::to)
            .filter(|&target| target != source && !graph.vertex(target).is_contracted())
            .collect();

        self.witness_search
            .run(graph, source, vertex, limits, &targets);
        self.search_space_size += self.witness_search.settled_vertices();

        let mut shortcuts = Vec::new();
        for edge in graph.vertex(vertex).edges() {
            let target = edge.to();
            if target == source || graph.vertex(target).is_contracted() {
                continue;
            }

            let length = reverse_edge.length() + edge.length();
            let witness = self
                .witness_search
                .one_hop_backward_search(graph, target);
            if witness.map_or(true, |witness| length < witness) {
                let uid = self.next_edge_id();
                shortcuts.push(Edge::shortcut(uid, source, target, length, vertex));
            }
        }
        shortcuts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parameters() -> ContractionParameters {
        ContractionParameters {
            hop_count: 5,
            edge_difference: 1,
            deleted_neighbours: 1,
            space_size: 0,
        }
    }

    #[test]
    fn shortcut_without_witness() {
        let mut graph = ContractionGraph::new();
        graph.add_edge(Edge::new(0, 0, 1, 2));
        graph.add_edge(Edge::new(1, 1, 2, 3));
        graph.add_edge(Edge::new(2, 0, 2, 9));

        let mut finder = ShortcutFinder::new(parameters(), 2);
        let shortcuts = finder.find_shortcuts(&graph, 1);

        assert_eq!(shortcuts, vec![Edge::shortcut(3, 0, 2, 5, 1)]);
        assert!(finder.search_space_size() > 0);
    }

    #[test]
    fn witness_prevents_shortcut() {
        let mut graph = ContractionGraph::new();
        graph.add_edge(Edge::new(0, 0, 1, 2));
        graph.add_edge(Edge::new(1, 1, 2, 3));
        graph.add_edge(Edge::new(2, 0, 3, 1));
        graph.add_edge(Edge::new(3, 3, 2, 4));

        let mut finder = ShortcutFinder::new(parameters(), 3);
        assert!(finder.find_shortcuts(&graph, 1).is_empty());
    }

    #[test]
    fn no_shortcut_back_to_predecessor() {
        let mut graph = ContractionGraph::new();
        graph.add_edge(Edge::twoway(0, 0, 1, 2));

        let mut finder = ShortcutFinder::new(parameters(), 0);
        assert!(finder.find_shortcuts(&graph, 1).is_empty());
    }

    #[test]
    fn symmetric_shortcuts_are_merged() {
        let mut graph = ContractionGraph::new();
        graph.add_edge(Edge::twoway(0, 0, 1, 2));
        graph.add_edge(Edge::twoway(1, 1, 2, 3));

        let mut finder = ShortcutFinder::new(parameters(), 1);
        let shortcuts = finder.find_shortcuts(&graph, 1);

        assert_eq!(shortcuts.len(), 1);
        assert!(shortcuts[0].is_twoway());
        assert_eq!((shortcuts[0].from(), shortcuts[0].to()), (0, 2));
        assert_eq!(shortcuts[0].length(), 5);
        assert_eq!(shortcuts[0].contracted_vertex(), Some(1));
    }
}
