#![allow(dead_code)]

use hierarchy_paths::{
    graphs::{contraction_graph::ContractionGraph, edge::Edge, OrderingRank, VertexId},
    search::ch::ContractionParameters,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

pub const BASIC_CONTRACTION_ORDER: [VertexId; 6] = [3, 6, 1, 5, 2, 4];

pub fn parameters() -> ContractionParameters {
    ContractionParameters {
        hop_count: 5,
        edge_difference: 1,
        deleted_neighbours: 1,
        space_size: 0,
    }
}

pub fn set_ranks(graph: &mut ContractionGraph, ranks: &[(VertexId, OrderingRank)]) {
    for &(vertex, rank) in ranks {
        graph.set_ordering_rank(vertex, rank);
    }
}

/// Six vertices, eleven directed edges.
pub fn basic_reverse_graph() -> ContractionGraph {
    let mut graph = ContractionGraph::new();
    for (uid, from, to, length) in [
        (0, 1, 2, 2),
        (1, 1, 3, 2),
        (2, 2, 6, 8),
        (3, 3, 4, 3),
        (4, 4, 3, 2),
        (5, 4, 5, 2),
        (6, 5, 4, 4),
        (7, 4, 6, 6),
        (8, 5, 6, 2),
        (9, 6, 5, 3),
        (10, 5, 3, 7),
    ] {
        graph.add_edge(Edge::new(uid, from, to, length));
    }
    graph
}

/// [`basic_reverse_graph`] contracted in [`BASIC_CONTRACTION_ORDER`], built
/// by hand.
pub fn basic_contracted_graph() -> ContractionGraph {
    let mut graph = basic_reverse_graph();
    graph.add_edge(Edge::shortcut(11, 1, 4, 5, 3));
    graph.add_edge(Edge::shortcut(12, 2, 5, 11, 6));
    graph.add_edge(Edge::shortcut(13, 2, 4, 15, 5));
    set_ranks(&mut graph, &[(1, 3), (2, 5), (3, 1), (4, 6), (5, 4), (6, 2)]);
    graph
}

/// Path `1 -> 2 -> ... -> 10` with lengths 1, 2, 3, 4, 5, 4, 3, 2, 1.
pub fn path_graph() -> ContractionGraph {
    let mut graph = ContractionGraph::new();
    for (uid, length) in [1, 2, 3, 4, 5, 4, 3, 2, 1].into_iter().enumerate() {
        let from = uid as VertexId + 1;
        graph.add_edge(Edge::new(uid as u64, from, from + 1, length));
    }
    set_ranks(
        &mut graph,
        &[
            (1, 1),
            (2, 2),
            (3, 3),
            (4, 4),
            (5, 5),
            (6, 10),
            (7, 9),
            (8, 8),
            (9, 7),
            (10, 6),
        ],
    );
    graph
}

/// [`path_graph`] with nested shortcuts on both halves.
pub fn path_shortcut_graph() -> ContractionGraph {
    let mut graph = path_graph();
    for (uid, from, to, length, via) in [
        (9, 1, 3, 3, 2),
        (10, 1, 4, 6, 3),
        (11, 1, 5, 10, 4),
        (12, 5, 10, 15, 6),
        (13, 6, 10, 10, 7),
        (14, 7, 10, 6, 8),
        (15, 8, 10, 3, 9),
    ] {
        graph.add_edge(Edge::shortcut(uid, from, to, length, via));
    }
    set_ranks(
        &mut graph,
        &[
            (1, 9),
            (2, 1),
            (3, 2),
            (4, 3),
            (5, 10),
            (6, 7),
            (7, 6),
            (8, 5),
            (9, 4),
            (10, 8),
        ],
    );
    graph
}

/// `number_of_edges` random edges over vertices `1..=number_of_vertices`.
/// Every fifth edge is twoway.
pub fn random_graph(seed: u64, number_of_vertices: u32, number_of_edges: u64) -> ContractionGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = ContractionGraph::new();
    for uid in 0..number_of_edges {
        let from = rng.gen_range(1..=number_of_vertices);
        let to = rng.gen_range(1..=number_of_vertices);
        let length = rng.gen_range(1..100);
        let edge = if uid % 5 == 0 {
            Edge::twoway(uid, from, to, length)
        } else {
            Edge::new(uid, from, to, length)
        };
        graph.add_edge(edge);
    }
    graph
}

pub fn random_pairs(
    seed: u64,
    graph: &ContractionGraph,
    number_of_pairs: usize,
) -> Vec<(VertexId, VertexId)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let vertices: Vec<VertexId> = graph.vertices().map(|vertex| vertex.id()).collect();
    (0..number_of_pairs)
        .map(|_| {
            (
                vertices[rng.gen_range(0..vertices.len())],
                vertices[rng.gen_range(0..vertices.len())],
            )
        })
        .collect()
}
