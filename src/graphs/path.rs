use serde::{Deserialize, Serialize};

use super::{edge::Edge, VertexId, Weight};
use crate::{error::Result, profile::LengthSource};

/// Represents a request for finding a shortest route between two vertices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortestPathRequest {
    pub source: VertexId,
    pub target: VertexId,
}

impl ShortestPathRequest {
    pub fn new(source: VertexId, target: VertexId) -> ShortestPathRequest {
        ShortestPathRequest { source, target }
    }

    pub fn is_trivial(&self) -> bool {
        self.source == self.target
    }
}

/// An unpacked route. `weight` is the sum of the edge lengths.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub edges: Vec<Edge>,
    pub weight: Weight,
}

impl Route {
    pub fn new(edges: Vec<Edge>) -> Route {
        let weight = edges.iter().map(Edge::length).sum();
        Route { edges, weight }
    }

    pub fn empty() -> Route {
        Route::default()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Visited vertices in travel order, empty for an empty route.
    pub fn vertices(&self) -> Vec<VertexId> {
        let mut vertices = Vec::with_capacity(self.edges.len() + 1);
        if let Some(first) = self.edges.first() {
            vertices.push(first.from());
        }
        vertices.extend(self.edges.iter().map(Edge::to));
        vertices
    }

    /// True if every edge starts where the previous one ended.
    pub fn is_contiguous(&self) -> bool {
        self.edges
            .windows(2)
            .all(|pair| pair[0].to() == pair[1].from())
    }

    /// Measures the route under another length source.
    pub fn length_with(&self, source: &dyn LengthSource) -> Result<Weight> {
        self.edges.iter().map(|edge| source.length(edge)).sum()
    }
}
