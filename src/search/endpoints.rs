use crate::{
    error::{Result, RoutingError},
    graphs::{edge::Edge, search_graph::SearchGraph, EdgeId, OrderingRank, UpwardGraph, VertexId},
};

/// A temporary vertex placed on the road network for one query, together
/// with the synthetic edges connecting it to the graph.
///
/// Source endpoints own edges `vertex -> x`, target endpoints edges
/// `x -> vertex`. Their lengths are whatever the snapping produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointEdges {
    pub vertex: VertexId,
    pub edges: Vec<Edge>,
}

#[derive(Clone, Debug, Default)]
struct EndpointVertex {
    id: VertexId,
    forward: Vec<Edge>,
    backward: Vec<Edge>,
}

/// A search graph extended by a temporary source and target vertex. The
/// temporary vertices have rank 0, so every synthetic edge points upward.
/// The borrowed search graph is never modified.
pub struct RoutingGraph<'g> {
    base: &'g SearchGraph,
    source: Option<EndpointVertex>,
    target: Option<EndpointVertex>,
}

impl<'g> RoutingGraph<'g> {
    pub fn new(base: &'g SearchGraph) -> RoutingGraph<'g> {
        RoutingGraph {
            base,
            source: None,
            target: None,
        }
    }

    /// First vertex id not used by the base graph.
    pub fn next_free_vertex_id(&self) -> VertexId {
        self.base.number_of_vertices() as VertexId
    }

    /// First edge uid not used by the base graph.
    pub fn next_free_edge_id(&self) -> EdgeId {
        self.base.max_edge_id().map_or(0, |uid| uid + 1)
    }

    pub fn with_source(mut self, endpoint: EndpointEdges) -> Result<Self> {
        self.check_endpoint(&endpoint, |edge| edge.from())?;
        self.source = Some(EndpointVertex {
            id: endpoint.vertex,
            forward: endpoint.edges,
            backward: Vec::new(),
        });
        Ok(self)
    }

    pub fn with_target(mut self, endpoint: EndpointEdges) -> Result<Self> {
        self.check_endpoint(&endpoint, |edge| edge.to())?;
        self.target = Some(EndpointVertex {
            id: endpoint.vertex,
            forward: Vec::new(),
            backward: endpoint.edges.iter().map(Edge::reversed).collect(),
        });
        Ok(self)
    }

    fn check_endpoint(
        &self,
        endpoint: &EndpointEdges,
        attached: impl Fn(&Edge) -> VertexId,
    ) -> Result<()> {
        if (endpoint.vertex as usize) < self.base.number_of_vertices()
            || self.endpoint(endpoint.vertex).is_some()
        {
            return Err(RoutingError::InvalidArgument(format!(
                "endpoint vertex {} collides with a graph vertex",
                endpoint.vertex
            )));
        }

        for edge in &endpoint.edges {
            let other = if edge.from() == endpoint.vertex {
                edge.to()
            } else {
                edge.from()
            };
            if attached(edge) != endpoint.vertex || !self.base.contains_vertex(other) {
                return Err(RoutingError::EdgeNotFound {
                    from: edge.from(),
                    to: edge.to(),
                });
            }
        }
        Ok(())
    }

    fn endpoint(&self, vertex: VertexId) -> Option<&EndpointVertex> {
        self.source
            .iter()
            .chain(self.target.iter())
            .find(|endpoint| endpoint.id == vertex)
    }
}

impl UpwardGraph for RoutingGraph<'_> {
    fn ordering_rank(&self, vertex: VertexId) -> OrderingRank {
        match self.endpoint(vertex) {
            Some(_) => 0,
            None => self.base.ordering_rank(vertex),
        }
    }

    fn forward_edges(&self, vertex: VertexId) -> &[Edge] {
        match self.endpoint(vertex) {
            Some(endpoint) => &endpoint.forward,
            None => self.base.forward_edges(vertex),
        }
    }

    fn backward_edges(&self, vertex: VertexId) -> &[Edge] {
        match self.endpoint(vertex) {
            Some(endpoint) => &endpoint.backward,
            None => self.base.backward_edges(vertex),
        }
    }

    fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.endpoint(vertex).is_some() || self.base.contains_vertex(vertex)
    }
}
