use std::collections::{BTreeSet, BinaryHeap};

use hierarchy_paths::{
    graphs::{
        contraction_graph::ContractionGraph, edge::Edge, HasOutgoingEdges, HasReverseEdges,
        VertexId, Weight,
    },
    search::ch::{
        contractor::{ChPriorityElement, GraphContractor},
        ContractionParameters,
    },
};

mod common;
use common::*;

fn shortcuts(graph: &ContractionGraph) -> BTreeSet<(VertexId, VertexId, Weight, VertexId)> {
    graph
        .edges()
        .filter_map(|edge| {
            edge.contracted_vertex()
                .map(|via| (edge.from(), edge.to(), edge.length(), via))
        })
        .collect()
}

#[test]
fn fixed_order_yields_known_shortcuts() {
    let mut graph = basic_reverse_graph();
    let mut contractor = GraphContractor::new(&graph, parameters());
    let summary = contractor.contract_in_order(&mut graph, &BASIC_CONTRACTION_ORDER);

    assert_eq!(summary.contracted_vertices, 6);
    assert_eq!(summary.shortcuts, 3);
    assert_eq!(
        shortcuts(&graph),
        BTreeSet::from([(1, 4, 5, 3), (2, 5, 11, 6), (2, 4, 15, 5)])
    );

    for (rank, vertex) in BASIC_CONTRACTION_ORDER.iter().enumerate() {
        assert_eq!(graph.vertex(*vertex).ordering_rank(), rank as u32 + 1);
    }
}

#[test]
fn shortcut_uids_continue_after_largest_uid() {
    let mut graph = basic_reverse_graph();
    let mut contractor = GraphContractor::new(&graph, parameters());
    contractor.contract_in_order(&mut graph, &BASIC_CONTRACTION_ORDER);

    let uids: BTreeSet<_> = graph
        .edges()
        .filter(|edge| edge.is_shortcut())
        .map(Edge::uid)
        .collect();
    assert_eq!(uids, BTreeSet::from([11, 12, 13]));
}

#[test]
fn full_contraction_assigns_every_rank_once() {
    let mut graph = random_graph(7, 40, 160);
    let mut contractor = GraphContractor::new(&graph, parameters());
    let summary = contractor.contract_graph(&mut graph);

    let number_of_vertices = graph.number_of_vertices();
    assert_eq!(summary.contracted_vertices, number_of_vertices);

    let ranks: BTreeSet<_> = graph.vertices().map(|vertex| vertex.ordering_rank()).collect();
    assert_eq!(ranks, (1..=number_of_vertices as u32).collect());
}

#[test]
fn shortcut_length_is_sum_of_children() {
    let mut graph = random_graph(11, 40, 160);
    let mut contractor = GraphContractor::new(&graph, parameters());
    contractor.contract_graph(&mut graph);

    for shortcut in graph.edges().filter(|edge| edge.is_shortcut()) {
        let via = shortcut.contracted_vertex().unwrap();
        let via_rank = graph.vertex(via).ordering_rank();
        assert!(via_rank < graph.vertex(shortcut.from()).ordering_rank());
        assert!(via_rank < graph.vertex(shortcut.to()).ordering_rank());

        let left = graph
            .vertex(shortcut.from())
            .edges()
            .iter()
            .filter(|edge| edge.to() == via)
            .map(Edge::length)
            .min()
            .unwrap();
        let right = graph
            .vertex(via)
            .edges()
            .iter()
            .filter(|edge| edge.to() == shortcut.to())
            .map(Edge::length)
            .min()
            .unwrap();
        assert_eq!(shortcut.length(), left + right, "{}", shortcut);
    }
}

#[test]
fn witness_prevents_shortcut() {
    let mut graph = ContractionGraph::new();
    graph.add_edge(Edge::new(0, 1, 2, 1));
    graph.add_edge(Edge::new(1, 2, 3, 1));
    graph.add_edge(Edge::new(2, 1, 3, 1));

    let mut contractor = GraphContractor::new(&graph, parameters());
    assert!(contractor.contract_vertex(&mut graph, 2).is_empty());
}

#[test]
fn longer_detour_still_needs_shortcut() {
    let mut graph = ContractionGraph::new();
    graph.add_edge(Edge::new(0, 1, 2, 1));
    graph.add_edge(Edge::new(1, 2, 3, 1));
    graph.add_edge(Edge::new(2, 1, 3, 5));

    let mut contractor = GraphContractor::new(&graph, parameters());
    let shortcuts = contractor.contract_vertex(&mut graph, 2);
    assert_eq!(shortcuts.len(), 1);
    assert_eq!(
        (shortcuts[0].from(), shortcuts[0].to(), shortcuts[0].length()),
        (1, 3, 2)
    );
    assert_eq!(shortcuts[0].contracted_vertex(), Some(2));
}

#[test]
fn shorter_shortcut_replaces_existing_edge() {
    let mut graph = ContractionGraph::new();
    graph.add_edge(Edge::new(0, 1, 2, 1));
    graph.add_edge(Edge::new(1, 2, 3, 1));
    graph.add_edge(Edge::new(2, 1, 3, 5));

    let mut contractor = GraphContractor::new(&graph, parameters());
    contractor.contract_vertex(&mut graph, 2);

    let direct: Vec<_> = graph
        .vertex(1)
        .edges()
        .iter()
        .filter(|edge| edge.to() == 3)
        .collect();
    assert_eq!(direct.len(), 1);
    assert_eq!(direct[0].length(), 2);
    assert_eq!(direct[0].contracted_vertex(), Some(2));

    let mirrored: Vec<_> = graph
        .vertex(3)
        .reverse_edges()
        .iter()
        .filter(|edge| edge.to() == 1)
        .collect();
    assert_eq!(mirrored.len(), 1);
    assert_eq!(mirrored[0].uid(), direct[0].uid());
    assert_eq!(mirrored[0].length(), 2);
    assert_eq!(graph.number_of_edges(), 3);
}

#[test]
fn improving_shortcut_does_not_count_as_new_edge() {
    let mut graph = ContractionGraph::new();
    graph.add_edge(Edge::new(0, 1, 2, 1));
    graph.add_edge(Edge::new(1, 2, 3, 1));
    graph.add_edge(Edge::new(2, 1, 3, 5));

    let mut contractor = GraphContractor::new(&graph, parameters());
    let queue = contractor.calculate_contraction_priority(&graph);
    let middle = queue.iter().find(|element| element.vertex == 2).unwrap();
    assert_eq!(middle.priority, -2);
}

#[test]
fn lazy_update_requeues_outdated_vertex() {
    let mut graph = basic_reverse_graph();
    let mut contractor = GraphContractor::new(&graph, parameters());
    let mut queue = BinaryHeap::from([
        ChPriorityElement::new(-4, 2),
        ChPriorityElement::new(-3, 3),
    ]);

    let (vertex, shortcuts) = contractor.contract_min_vertex(&mut graph, &mut queue);

    assert_eq!(vertex, 3);
    assert_eq!(shortcuts.len(), 1);
    assert!(graph.vertex(3).is_contracted());
    assert!(!graph.vertex(2).is_contracted());
    assert_eq!(queue.into_vec(), vec![ChPriorityElement::new(-2, 2)]);
}

#[test]
fn twoway_neighbours_get_one_twoway_shortcut() {
    let mut graph = ContractionGraph::new();
    graph.add_edge(Edge::twoway(0, 1, 2, 3));
    graph.add_edge(Edge::twoway(1, 2, 3, 4));

    let mut contractor = GraphContractor::new(&graph, parameters());
    let shortcuts = contractor.contract_vertex(&mut graph, 2);
    assert_eq!(shortcuts.len(), 1);
    assert!(shortcuts[0].is_twoway());
    assert_eq!(shortcuts[0].length(), 7);
    // Stored once per direction.
    assert_eq!(graph.edges().filter(|edge| edge.is_shortcut()).count(), 2);
}

#[test]
fn single_hop_witness_search_keeps_graph_correct() {
    let mut graph = random_graph(3, 30, 100);
    let parameters = ContractionParameters {
        hop_count: 1,
        ..parameters()
    };
    let mut contractor = GraphContractor::new(&graph, parameters);
    let summary = contractor.contract_graph(&mut graph);
    assert_eq!(summary.contracted_vertices, graph.number_of_vertices());
}
