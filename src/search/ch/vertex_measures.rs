use ahash::{HashSet, HashSetExt};

use super::ContractionParameters;
use crate::graphs::{
    contraction_graph::ContractionGraph, edge::Edge, HasOutgoingEdges, HasReverseEdges,
    VertexId,
};

/// Number of edges the shortcuts add to the graph. A twoway shortcut is
/// stored once per direction.
pub fn stored_edge_count(shortcuts: &[Edge]) -> usize {
    shortcuts
        .iter()
        .map(|shortcut| if shortcut.is_twoway() { 2 } else { 1 })
        .sum()
}

/// Shortcuts added minus edges adjacent to `vertex`.
pub fn edge_difference(graph: &ContractionGraph, vertex: VertexId, shortcuts: &[Edge]) -> i64 {
    let vertex = graph.vertex(vertex);
    let adjacent = vertex.edges().len() + vertex.reverse_edges().len();
    stored_edge_count(shortcuts) as i64 - adjacent as i64
}

/// Distinct already contracted vertices reachable over one outgoing edge.
pub fn deleted_neighbours(graph: &ContractionGraph, vertex: VertexId) -> i64 {
    let mut neighbours = HashSet::new();
    for edge in graph.vertex(vertex).edges() {
        if graph.vertex(edge.to()).is_contracted() {
            neighbours.insert(edge.to());
        }
    }
    neighbours.len() as i64
}

#[derive(Clone, Copy, Debug)]
pub struct VertexMeasures {
    parameters: ContractionParameters,
}

impl VertexMeasures {
    pub fn new(parameters: ContractionParameters) -> VertexMeasures {
        VertexMeasures { parameters }
    }

    /// Contraction priority, lower means contract sooner.
    pub fn contraction_attractivity(
        &self,
        graph: &ContractionGraph,
        vertex: VertexId,
        shortcuts: &[Edge],
        search_space_size: usize,
    ) -> i64 {
        edge_difference(graph, vertex, shortcuts) * self.parameters.edge_difference as i64
            + deleted_neighbours(graph, vertex) * self.parameters.deleted_neighbours as i64
            + search_space_size as i64 * self.parameters.space_size as i64
    }
}
