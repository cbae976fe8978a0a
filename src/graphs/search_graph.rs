use log::info;
use serde::{Deserialize, Serialize};

use super::{
    contraction_graph::ContractionGraph, edge::Edge, EdgeId, HasOutgoingEdges, HasReverseEdges,
    OrderingRank, UpwardGraph, VertexId,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRange {
    pub begin: usize,
    pub end: usize,
}

impl EdgeRange {
    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct SearchVertex {
    pub id: VertexId,
    pub ordering_rank: OrderingRank,
    pub forward: EdgeRange,
    pub backward: EdgeRange,
}

/// Immutable query graph. All retained edges live in one array, each vertex
/// owns a forward and a backward range into it. Only upward edges are kept.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchGraph {
    vertices: Vec<SearchVertex>,
    edges: Vec<Edge>,
}

fn is_upward(graph: &ContractionGraph, edge: &Edge) -> bool {
    graph.vertex(edge.from()).ordering_rank() < graph.vertex(edge.to()).ordering_rank()
}

impl SearchGraph {
    pub fn load(graph: &ContractionGraph) -> SearchGraph {
        let capacity: usize = graph
            .vertices()
            .map(|vertex| {
                let forward = vertex
                    .edges()
                    .iter()
                    .filter(|edge| is_upward(graph, edge))
                    .count();
                let backward = vertex
                    .reverse_edges()
                    .iter()
                    .filter(|edge| is_upward(graph, edge))
                    .count();
                forward + backward
            })
            .sum();

        let mut vertices: Vec<SearchVertex> = (0..graph.vertex_capacity())
            .map(|id| SearchVertex {
                id: id as VertexId,
                ..Default::default()
            })
            .collect();
        let mut edges = Vec::with_capacity(capacity);

        for vertex in graph.vertices() {
            let search_vertex = &mut vertices[vertex.id() as usize];
            search_vertex.ordering_rank = vertex.ordering_rank();

            let begin = edges.len();
            edges.extend(
                vertex
                    .edges()
                    .iter()
                    .filter(|edge| is_upward(graph, edge))
                    .cloned(),
            );
            search_vertex.forward = EdgeRange {
                begin,
                end: edges.len(),
            };

            let begin = edges.len();
            edges.extend(
                vertex
                    .reverse_edges()
                    .iter()
                    .filter(|edge| is_upward(graph, edge))
                    .cloned(),
            );
            search_vertex.backward = EdgeRange {
                begin,
                end: edges.len(),
            };
        }

        assert_eq!(
            edges.len(),
            capacity,
            "search graph edge count differs from the counted capacity"
        );

        info!(
            "search graph holds {} vertices and {} upward edges",
            graph.number_of_vertices(),
            edges.len()
        );

        SearchGraph { vertices, edges }
    }

    pub fn vertex(&self, id: VertexId) -> &SearchVertex {
        match self.vertices.get(id as usize) {
            Some(vertex) => vertex,
            None => panic!("vertex {} is not part of the search graph", id),
        }
    }

    pub fn vertices(&self) -> &[SearchVertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn number_of_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn number_of_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn max_edge_id(&self) -> Option<EdgeId> {
        self.edges.iter().map(Edge::uid).max()
    }
}

impl UpwardGraph for SearchGraph {
    fn ordering_rank(&self, vertex: VertexId) -> OrderingRank {
        self.vertex(vertex).ordering_rank
    }

    fn forward_edges(&self, vertex: VertexId) -> &[Edge] {
        let range = self.vertex(vertex).forward;
        &self.edges[range.begin..range.end]
    }

    fn backward_edges(&self, vertex: VertexId) -> &[Edge] {
        let range = self.vertex(vertex).backward;
        &self.edges[range.begin..range.end]
    }

    /// Id slots that no edge referenced keep rank 0 and are not vertices.
    fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.vertices
            .get(vertex as usize)
            .is_some_and(|vertex| vertex.ordering_rank > 0)
    }
}
