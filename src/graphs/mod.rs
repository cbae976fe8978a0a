use edge::Edge;

pub mod contraction_graph;
pub mod edge;
pub mod path;
pub mod search_graph;

pub type VertexId = u32;
pub type EdgeId = u64;
pub type Weight = u64;
pub type OrderingRank = u32;

/// Largest length a single input edge may carry. With at most `u32::MAX`
/// vertices on a simple path, every path length fits into `Weight`.
pub const MAX_EDGE_LENGTH: Weight = u32::MAX as Weight;

/// Read access to the outgoing edges of a vertex.
pub trait HasOutgoingEdges {
    fn edges(&self) -> &[Edge];
}

/// Read access to the backward edges of a vertex. A backward edge stored at
/// `v` with `to() == u` stands for the original edge `u -> v`.
pub trait HasReverseEdges {
    fn reverse_edges(&self) -> &[Edge];
}

/// A graph that only exposes upward edges, i.e. edges whose head has a
/// strictly higher ordering rank than their tail.
///
/// Both the bidirectional query and the route retriever are generic over this
/// trait, so a query can run on the plain search graph or on a search graph
/// extended with temporary endpoint vertices.
pub trait UpwardGraph {
    fn ordering_rank(&self, vertex: VertexId) -> OrderingRank;

    /// Upward edges leaving `vertex`.
    fn forward_edges(&self, vertex: VertexId) -> &[Edge];

    /// Upward edges entering `vertex`, stored reversed (`vertex -> predecessor`).
    fn backward_edges(&self, vertex: VertexId) -> &[Edge];

    /// True for ranked vertices and temporary endpoints.
    fn contains_vertex(&self, vertex: VertexId) -> bool;
}
