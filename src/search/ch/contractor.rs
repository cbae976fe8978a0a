use std::{cmp::Ordering, collections::BinaryHeap};

use indicatif::ProgressBar;
use log::{debug, info};

use super::{
    shortcut_filter::ShortcutContainer, shortcut_finder::ShortcutFinder,
    vertex_measures::VertexMeasures, ContractionParameters,
};
use crate::{
    graphs::{contraction_graph::ContractionGraph, edge::Edge, OrderingRank, VertexId},
    utility::get_progressbar_long_jobs,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ChPriorityElement {
    pub vertex: VertexId,
    pub priority: i64,
}

impl ChPriorityElement {
    pub fn new(priority: i64, vertex: VertexId) -> Self {
        Self { vertex, priority }
    }
}

// The priority queue depends on `Ord`.
// Explicitly implement the trait so the queue becomes a min-heap
// instead of a max-heap.
impl Ord for ChPriorityElement {
    fn cmp(&self, other: &Self) -> Ordering {
        // Ties are broken by the smaller vertex id.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for ChPriorityElement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContractionSummary {
    pub contracted_vertices: usize,
    pub shortcuts: usize,
}

/// Orders and contracts the vertices of a graph, inserting shortcuts as it goes.
pub struct GraphContractor {
    shortcut_finder: ShortcutFinder,
    vertex_measures: VertexMeasures,
    last_ordering_rank: OrderingRank,
}

impl GraphContractor {
    /// Shortcut uids are drawn above the largest uid already in `graph`.
    pub fn new(graph: &ContractionGraph, parameters: ContractionParameters) -> GraphContractor {
        let last_edge_id = graph.max_edge_id().unwrap_or(0);
        let last_ordering_rank = graph
            .vertices()
            .map(|vertex| vertex.ordering_rank())
            .max()
            .unwrap_or(0);
        GraphContractor {
            shortcut_finder: ShortcutFinder::new(parameters, last_edge_id),
            vertex_measures: VertexMeasures::new(parameters),
            last_ordering_rank,
        }
    }

    /// Only new shortcuts count towards the edge difference, improving ones
    /// take the place of an existing edge.
    fn priority(
        &mut self,
        graph: &ContractionGraph,
        vertex: VertexId,
    ) -> (i64, ShortcutContainer) {
        let shortcuts = self.shortcut_finder.find_classified_shortcuts(graph, vertex);
        let priority = self.vertex_measures.contraction_attractivity(
            graph,
            vertex,
            &shortcuts.new_edges,
            self.shortcut_finder.search_space_size(),
        );
        (priority, shortcuts)
    }

    /// Initial priority of every uncontracted vertex.
    pub fn calculate_contraction_priority(
        &mut self,
        graph: &ContractionGraph,
    ) -> BinaryHeap<ChPriorityElement> {
        let vertices: Vec<VertexId> = graph
            .vertices()
            .filter(|vertex| !vertex.is_contracted())
            .map(|vertex| vertex.id())
            .collect();

        let bar = get_progressbar_long_jobs("Initializing priorities", vertices.len() as u64);
        let queue = vertices
            .into_iter()
            .map(|vertex| {
                bar.inc(1);
                let (priority, _) = self.priority(graph, vertex);
                ChPriorityElement::new(priority, vertex)
            })
            .collect();
        bar.finish_and_clear();
        queue
    }

    /// Contracts all uncontracted vertices of `graph`.
    pub fn contract_graph(&mut self, graph: &mut ContractionGraph) -> ContractionSummary {
        info!(
            "contracting {} vertices and {} edges",
            graph.number_of_vertices(),
            graph.number_of_edges()
        );

        let mut queue = self.calculate_contraction_priority(graph);
        let bar = get_progressbar_long_jobs("Contracting", queue.len() as u64);
        let summary = self.contract_queue(graph, &mut queue, &bar);
        bar.finish_and_clear();

        info!(
            "contracted {} vertices, inserted {} shortcuts",
            summary.contracted_vertices, summary.shortcuts
        );
        summary
    }

    fn contract_queue(
        &mut self,
        graph: &mut ContractionGraph,
        queue: &mut BinaryHeap<ChPriorityElement>,
        bar: &ProgressBar,
    ) -> ContractionSummary {
        let mut summary = ContractionSummary::default();
        while !queue.is_empty() {
            let (_, shortcuts) = self.contract_min_vertex(graph, queue);
            summary.contracted_vertices += 1;
            summary.shortcuts += shortcuts.len();
            bar.inc(1);

            if summary.contracted_vertices % 10_000 == 0 {
                debug!(
                    "{} vertices contracted, overlay average degree {:.2}",
                    summary.contracted_vertices,
                    graph.overlay_average_degree()
                );
            }
        }
        summary
    }

    /// Pops vertices until one keeps its place after its priority is
    /// recomputed, then contracts it. Returns the vertex and its shortcuts.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty.
    pub fn contract_min_vertex(
        &mut self,
        graph: &mut ContractionGraph,
        queue: &mut BinaryHeap<ChPriorityElement>,
    ) -> (VertexId, Vec<Edge>) {
        let (vertex, shortcuts) = loop {
            let Some(ChPriorityElement { vertex, .. }) = queue.pop() else {
                panic!("cannot contract a vertex from an empty queue");
            };
            let Some(next) = queue.peek().copied() else {
                let shortcuts = self.shortcut_finder.find_classified_shortcuts(graph, vertex);
                break (vertex, shortcuts);
            };

            let (priority, shortcuts) = self.priority(graph, vertex);
            if priority <= next.priority {
                break (vertex, shortcuts);
            }
            queue.push(ChPriorityElement::new(priority, vertex));
        };

        (vertex, self.contract(graph, vertex, shortcuts))
    }

    /// Contracts `vertex` now, whatever its priority.
    pub fn contract_vertex(&mut self, graph: &mut ContractionGraph, vertex: VertexId) -> Vec<Edge> {
        let shortcuts = self.shortcut_finder.find_classified_shortcuts(graph, vertex);
        self.contract(graph, vertex, shortcuts)
    }

    /// Contracts the given vertices in the given order.
    pub fn contract_in_order(
        &mut self,
        graph: &mut ContractionGraph,
        order: &[VertexId],
    ) -> ContractionSummary {
        let mut summary = ContractionSummary::default();
        for &vertex in order {
            let shortcuts = self.contract_vertex(graph, vertex);
            summary.contracted_vertices += 1;
            summary.shortcuts += shortcuts.len();
        }
        summary
    }

    /// Inserts new shortcuts, lets improving ones replace the edge they beat
    /// and ranks `vertex`. Returns the inserted shortcuts.
    fn contract(
        &mut self,
        graph: &mut ContractionGraph,
        vertex: VertexId,
        shortcuts: ShortcutContainer,
    ) -> Vec<Edge> {
        assert!(
            !graph.vertex(vertex).is_contracted(),
            "vertex {} is already contracted",
            vertex
        );

        for shortcut in &shortcuts.new_edges {
            graph.add_edge(shortcut.clone());
        }
        for shortcut in &shortcuts.improving_edges {
            debug!("{} replaces a longer edge", shortcut);
            graph.replace_edge(shortcut.clone());
        }
        self.last_ordering_rank += 1;
        graph.set_ordering_rank(vertex, self.last_ordering_rank);
        shortcuts.into_edges()
    }
}
