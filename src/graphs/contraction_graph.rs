use log::debug;
use serde::{Deserialize, Serialize};

use super::{
    edge::{Edge, EdgeType},
    EdgeId, HasOutgoingEdges, HasReverseEdges, OrderingRank, VertexId,
};
use crate::{
    error::{Result, RoutingError},
    profile::LengthSource,
};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Vertex {
    id: VertexId,
    ordering_rank: OrderingRank,
    edges: Vec<Edge>,
    reverse_edges: Vec<Edge>,
}

impl Vertex {
    pub fn new(id: VertexId) -> Vertex {
        Vertex {
            id,
            ..Default::default()
        }
    }

    pub fn id(&self) -> VertexId {
        self.id
    }

    pub fn ordering_rank(&self) -> OrderingRank {
        self.ordering_rank
    }

    pub fn set_ordering_rank(&mut self, ordering_rank: OrderingRank) {
        self.ordering_rank = ordering_rank;
    }

    pub fn is_contracted(&self) -> bool {
        self.ordering_rank > 0
    }
}

impl HasOutgoingEdges for Vertex {
    fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

impl HasReverseEdges for Vertex {
    fn reverse_edges(&self) -> &[Edge] {
        &self.reverse_edges
    }
}

/// Build-time graph. Vertices are indexed by id; slots that no edge ever
/// referenced stay empty and are skipped by every iteration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContractionGraph {
    vertices: Vec<Option<Vertex>>,
    track_backward: bool,
}

impl Default for ContractionGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl ContractionGraph {
    /// A graph that stores every edge at its tail and a reversed copy at its head.
    pub fn new() -> ContractionGraph {
        ContractionGraph {
            vertices: Vec::new(),
            track_backward: true,
        }
    }

    /// A graph without backward lists. Enough for plain Dijkstra, not for contraction.
    pub fn forward_only() -> ContractionGraph {
        ContractionGraph {
            vertices: Vec::new(),
            track_backward: false,
        }
    }

    pub fn tracks_backward(&self) -> bool {
        self.track_backward
    }

    /// Adds an edge. Backward edges are normalized to forward ones and twoway
    /// edges are stored once per direction.
    pub fn add_edge(&mut self, edge: Edge) {
        if edge.from() == edge.to() {
            debug!("dropping self loop {}", edge);
            return;
        }

        let edge = if edge.is_backward() {
            edge.reversed()
        } else {
            edge
        };

        self.add_vertex(edge.from());
        self.add_vertex(edge.to());

        let opposite = edge.is_twoway().then(|| edge.reversed());
        self.insert(edge);
        if let Some(opposite) = opposite {
            self.insert(opposite);
        }
    }

    fn insert(&mut self, edge: Edge) {
        if self.track_backward {
            let reverse = edge.reversed();
            self.vertex_mut(edge.to()).reverse_edges.push(reverse);
        }
        self.vertex_mut(edge.from()).edges.push(edge);
    }

    /// Shortest stored edge `from -> to`.
    pub fn find_edge(&self, from: VertexId, to: VertexId) -> Option<&Edge> {
        match self.vertices.get(from as usize) {
            Some(Some(vertex)) => vertex
                .edges
                .iter()
                .filter(|edge| edge.to() == to)
                .min_by_key(|edge| edge.length()),
            _ => None,
        }
    }

    /// Puts `edge` in place of the shortest stored edge with the same
    /// endpoints, in both the forward and the backward list. A twoway edge
    /// replaces one edge per direction. Directions without a stored edge are
    /// inserted like [`ContractionGraph::add_edge`] would.
    pub fn replace_edge(&mut self, edge: Edge) {
        let edge = if edge.is_backward() {
            edge.reversed()
        } else {
            edge
        };
        self.add_vertex(edge.from());
        self.add_vertex(edge.to());

        let opposite = edge.is_twoway().then(|| edge.reversed());
        self.replace_direction(edge);
        if let Some(opposite) = opposite {
            self.replace_direction(opposite);
        }
    }

    fn replace_direction(&mut self, edge: Edge) {
        let (from, to) = (edge.from(), edge.to());
        let position = self
            .vertex(from)
            .edges
            .iter()
            .enumerate()
            .filter(|(_, stored)| stored.to() == to)
            .min_by_key(|(_, stored)| stored.length())
            .map(|(position, _)| position);
        let Some(position) = position else {
            self.insert(edge);
            return;
        };

        let replaced = std::mem::replace(&mut self.vertex_mut(from).edges[position], edge.clone());
        if self.track_backward {
            let reverse_edges = &mut self.vertex_mut(to).reverse_edges;
            let reverse = edge.reversed();
            match reverse_edges
                .iter()
                .position(|stored| stored.uid() == replaced.uid() && stored.to() == from)
            {
                Some(position) => reverse_edges[position] = reverse,
                None => reverse_edges.push(reverse),
            }
        }

        // The other half of a replaced twoway edge now stands alone.
        if replaced.is_twoway() && replaced.uid() != edge.uid() {
            self.make_oneway(replaced.uid(), to, from);
        }
    }

    fn make_oneway(&mut self, uid: EdgeId, from: VertexId, to: VertexId) {
        for stored in self.vertex_mut(from).edges.iter_mut() {
            if stored.uid() == uid && stored.to() == to {
                *stored = stored.clone().with_type(EdgeType::Forward);
            }
        }
        if self.track_backward {
            for stored in self.vertex_mut(to).reverse_edges.iter_mut() {
                if stored.uid() == uid && stored.to() == from {
                    *stored = stored.clone().with_type(EdgeType::Backward);
                }
            }
        }
    }

    /// Makes `id` a vertex of the graph, growing the vertex array if needed.
    pub fn add_vertex(&mut self, id: VertexId) {
        let index = id as usize;
        if index >= self.vertices.len() {
            self.vertices.resize(index + 1, None);
        }
        if self.vertices[index].is_none() {
            self.vertices[index] = Some(Vertex::new(id));
        }
    }

    pub fn contains_vertex(&self, id: VertexId) -> bool {
        matches!(self.vertices.get(id as usize), Some(Some(_)))
    }

    pub fn vertex(&self, id: VertexId) -> &Vertex {
        match self.vertices.get(id as usize) {
            Some(Some(vertex)) => vertex,
            _ => panic!("vertex {} is not part of the graph", id),
        }
    }

    pub fn vertex_mut(&mut self, id: VertexId) -> &mut Vertex {
        match self.vertices.get_mut(id as usize) {
            Some(Some(vertex)) => vertex,
            _ => panic!("vertex {} is not part of the graph", id),
        }
    }

    /// Vertices in id order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.vertices.iter().flatten()
    }

    /// Every stored outgoing edge, twoway edges once per direction.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.vertices().flat_map(|vertex| vertex.edges.iter())
    }

    pub fn number_of_vertices(&self) -> usize {
        self.vertices().count()
    }

    pub fn number_of_edges(&self) -> usize {
        self.vertices().map(|vertex| vertex.edges.len()).sum()
    }

    /// Length of the id-indexed vertex array, i.e. largest id plus one.
    pub fn vertex_capacity(&self) -> usize {
        self.vertices.len()
    }

    pub fn max_edge_id(&self) -> Option<EdgeId> {
        self.edges().map(Edge::uid).max()
    }

    pub fn set_ordering_rank(&mut self, id: VertexId, ordering_rank: OrderingRank) {
        self.vertex_mut(id).set_ordering_rank(ordering_rank);
    }

    /// Replaces every stored length by the one `source` computes for the edge.
    pub fn reweight(&mut self, source: &dyn LengthSource) -> Result<()> {
        if self.edges().any(Edge::is_shortcut) {
            return Err(RoutingError::InvalidArgument(
                "cannot reweight a graph that already contains shortcuts".to_string(),
            ));
        }

        for vertex in self.vertices.iter_mut().flatten() {
            for edge in vertex
                .edges
                .iter_mut()
                .chain(vertex.reverse_edges.iter_mut())
            {
                let length = source.length(edge)?;
                edge.set_length(length);
            }
        }

        Ok(())
    }

    /// Average number of edges between vertices that are still uncontracted.
    pub fn overlay_average_degree(&self) -> f64 {
        let mut vertices = 0;
        let mut edges = 0;
        for vertex in self.vertices().filter(|vertex| !vertex.is_contracted()) {
            vertices += 1;
            edges += vertex
                .edges
                .iter()
                .filter(|edge| !self.vertex(edge.to()).is_contracted())
                .count();
        }
        if vertices == 0 {
            return 0.0;
        }
        edges as f64 / vertices as f64
    }
}
