use crate::{
    error::{Result, RoutingError},
    graphs::{edge::Edge, UpwardGraph, VertexId},
    search::collections::dijkstra_data::SearchData,
};

/// Turns the predecessor trails of a finished bidirectional search into the
/// sequence of original edges.
pub struct RouteRetriever<'g, G: UpwardGraph> {
    graph: &'g G,
}

impl<'g, G: UpwardGraph> RouteRetriever<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        RouteRetriever { graph }
    }

    /// Route with shortcuts left in place.
    pub fn packed_route(
        &self,
        forward: &SearchData,
        backward: &SearchData,
        source: VertexId,
        target: VertexId,
        meeting_vertex: VertexId,
    ) -> Result<Vec<Edge>> {
        let mut packed = self.packed_forward(forward, source, meeting_vertex)?;
        packed.extend(self.packed_backward(backward, target, meeting_vertex)?);
        Ok(packed)
    }

    pub fn route(
        &self,
        forward: &SearchData,
        backward: &SearchData,
        source: VertexId,
        target: VertexId,
        meeting_vertex: VertexId,
    ) -> Result<Vec<Edge>> {
        let packed = self.packed_route(forward, backward, source, target, meeting_vertex)?;

        let mut edges = Vec::with_capacity(packed.len());
        for edge in &packed {
            edges.extend(self.unpack(edge)?);
        }
        Ok(edges)
    }

    /// Edges from `source` to `meeting_vertex`, possibly shortcuts.
    fn packed_forward(
        &self,
        data: &SearchData,
        source: VertexId,
        meeting_vertex: VertexId,
    ) -> Result<Vec<Edge>> {
        let mut edges = Vec::new();
        let mut current = meeting_vertex;
        while current != source {
            let previous = data.previous(current).ok_or(RoutingError::EdgeNotFound {
                from: source,
                to: current,
            })?;
            edges.push(self.forward_edge(previous, current)?);
            current = previous;
        }
        edges.reverse();
        Ok(edges)
    }

    /// Edges from `meeting_vertex` to `target` in travel direction.
    fn packed_backward(
        &self,
        data: &SearchData,
        target: VertexId,
        meeting_vertex: VertexId,
    ) -> Result<Vec<Edge>> {
        let mut edges = Vec::new();
        let mut current = meeting_vertex;
        while current != target {
            let next = data.previous(current).ok_or(RoutingError::EdgeNotFound {
                from: current,
                to: target,
            })?;
            edges.push(self.backward_edge(next, current)?);
            current = next;
        }
        Ok(edges)
    }

    /// Cheapest upward edge `from -> to` stored at `from`.
    fn forward_edge(&self, from: VertexId, to: VertexId) -> Result<Edge> {
        self.graph
            .forward_edges(from)
            .iter()
            .filter(|edge| edge.to() == to)
            .min_by_key(|edge| edge.length())
            .cloned()
            .ok_or(RoutingError::EdgeNotFound { from, to })
    }

    /// Cheapest upward edge `from -> at` stored reversed at `at`, returned in
    /// travel direction.
    fn backward_edge(&self, at: VertexId, from: VertexId) -> Result<Edge> {
        self.graph
            .backward_edges(at)
            .iter()
            .filter(|edge| edge.to() == from)
            .min_by_key(|edge| edge.length())
            .map(Edge::reversed)
            .ok_or(RoutingError::EdgeNotFound { from, to: at })
    }

    /// Expands `edge` into original edges, left to right. The left child of a
    /// shortcut `u -> w` via `c` is stored backward at `c`, the right child
    /// forward at `c`.
    pub fn unpack(&self, edge: &Edge) -> Result<Vec<Edge>> {
        let mut edges = Vec::new();
        let mut stack = vec![edge.clone()];

        while let Some(edge) = stack.pop() {
            match edge.contracted_vertex() {
                None => edges.push(edge),
                Some(via) => {
                    let left = self.backward_edge(via, edge.from())?;
                    let right = self.forward_edge(via, edge.to())?;
                    stack.push(right);
                    stack.push(left);
                }
            }
        }

        Ok(edges)
    }
}
