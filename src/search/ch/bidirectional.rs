use std::{cmp::Reverse, collections::BinaryHeap};

use log::trace;

use super::route_retriever::RouteRetriever;
use crate::{
    error::{Result, RoutingError},
    graphs::{path::Route, UpwardGraph, VertexId, Weight},
    search::collections::dijkstra_data::SearchData,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeetingPoint {
    pub vertex: VertexId,
    pub cost: Weight,
}

type DirectionQueue = BinaryHeap<Reverse<(Weight, VertexId)>>;

/// CH query: a forward search from the source and a backward search from the
/// target, both restricted to upward edges. State is per query, the graph is
/// only read.
pub struct BidirectionalDijkstra<'g, G: UpwardGraph> {
    graph: &'g G,
    forward: SearchData,
    backward: SearchData,
    forward_queue: DirectionQueue,
    backward_queue: DirectionQueue,
    source: VertexId,
    target: VertexId,
    meeting_point: Option<MeetingPoint>,
}

impl<'g, G: UpwardGraph> BidirectionalDijkstra<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        BidirectionalDijkstra {
            graph,
            forward: SearchData::new(),
            backward: SearchData::new(),
            forward_queue: BinaryHeap::new(),
            backward_queue: BinaryHeap::new(),
            source: 0,
            target: 0,
            meeting_point: None,
        }
    }

    /// Cost of the shortest route from `source` to `target`.
    pub fn run(&mut self, source: VertexId, target: VertexId) -> Result<Weight> {
        self.initialize(source, target);

        while let Some((direction, cost, vertex)) = self.pop_min() {
            if self
                .meeting_point
                .is_some_and(|meeting_point| cost >= meeting_point.cost)
            {
                break;
            }

            let data = self.data(direction);
            if data.cost(vertex).is_some_and(|current| current < cost) {
                continue;
            }

            self.update_meeting_point(vertex);
            self.relax(direction, vertex, cost);
        }

        trace!(
            "query {} -> {} touched {} forward and {} backward vertices",
            source,
            target,
            self.forward.len(),
            self.backward.len()
        );

        self.meeting_point
            .map(|meeting_point| meeting_point.cost)
            .ok_or(RoutingError::RouteNotFound {
                from: source,
                to: target,
            })
    }

    fn initialize(&mut self, source: VertexId, target: VertexId) {
        self.source = source;
        self.target = target;
        self.meeting_point = None;
        self.forward.clear();
        self.backward.clear();
        self.forward_queue.clear();
        self.backward_queue.clear();

        self.forward.set(source, 0, None);
        self.forward_queue.push(Reverse((0, source)));
        self.backward.set(target, 0, None);
        self.backward_queue.push(Reverse((0, target)));
    }

    /// Pops the cheaper of the two queue heads. Equal heads go to the
    /// backward search.
    fn pop_min(&mut self) -> Option<(Direction, Weight, VertexId)> {
        let forward_top = self.forward_queue.peek().map(|Reverse(entry)| *entry);
        let backward_top = self.backward_queue.peek().map(|Reverse(entry)| *entry);

        let direction = match (forward_top, backward_top) {
            (None, None) => return None,
            (Some(_), None) => Direction::Forward,
            (None, Some(_)) => Direction::Backward,
            (Some((forward, _)), Some((backward, _))) => {
                if forward < backward {
                    Direction::Forward
                } else {
                    Direction::Backward
                }
            }
        };

        let Reverse((cost, vertex)) = match direction {
            Direction::Forward => self.forward_queue.pop()?,
            Direction::Backward => self.backward_queue.pop()?,
        };
        Some((direction, cost, vertex))
    }

    fn data(&self, direction: Direction) -> &SearchData {
        match direction {
            Direction::Forward => &self.forward,
            Direction::Backward => &self.backward,
        }
    }

    fn update_meeting_point(&mut self, vertex: VertexId) {
        let (Some(forward), Some(backward)) = (self.forward.cost(vertex), self.backward.cost(vertex))
        else {
            return;
        };

        let cost = forward + backward;
        if self
            .meeting_point
            .map_or(true, |meeting_point| cost < meeting_point.cost)
        {
            self.meeting_point = Some(MeetingPoint { vertex, cost });
        }
    }

    fn relax(&mut self, direction: Direction, vertex: VertexId, cost: Weight) {
        let graph = self.graph;
        let (edges, data, queue) = match direction {
            Direction::Forward => (
                graph.forward_edges(vertex),
                &mut self.forward,
                &mut self.forward_queue,
            ),
            Direction::Backward => (
                graph.backward_edges(vertex),
                &mut self.backward,
                &mut self.backward_queue,
            ),
        };

        let rank = graph.ordering_rank(vertex);
        for edge in edges {
            let neighbour = edge.to();
            debug_assert!(graph.ordering_rank(neighbour) > rank);

            let alternative = cost + edge.length();
            if data.cost(neighbour).map_or(true, |current| alternative < current) {
                data.set(neighbour, alternative, Some(vertex));
                queue.push(Reverse((alternative, neighbour)));
            }
        }
    }

    pub fn meeting_point(&self) -> Option<MeetingPoint> {
        self.meeting_point
    }

    pub fn forward_data(&self) -> &SearchData {
        &self.forward
    }

    pub fn backward_data(&self) -> &SearchData {
        &self.backward
    }

    fn meeting_vertex(&self) -> Result<VertexId> {
        self.meeting_point
            .map(|meeting_point| meeting_point.vertex)
            .ok_or(RoutingError::RouteNotFound {
                from: self.source,
                to: self.target,
            })
    }

    /// Unpacked route of the last successful [`BidirectionalDijkstra::run`].
    pub fn route(&self) -> Result<Route> {
        let edges = RouteRetriever::new(self.graph).route(
            &self.forward,
            &self.backward,
            self.source,
            self.target,
            self.meeting_vertex()?,
        )?;
        Ok(Route::new(edges))
    }

    /// Like [`BidirectionalDijkstra::route`] but keeps shortcuts packed.
    pub fn packed_route(&self) -> Result<Route> {
        let edges = RouteRetriever::new(self.graph).packed_route(
            &self.forward,
            &self.backward,
            self.source,
            self.target,
            self.meeting_vertex()?,
        )?;
        Ok(Route::new(edges))
    }
}

/// Runs one query and unpacks its route. `source == target` yields the empty
/// route without searching.
pub fn shortest_route<G: UpwardGraph>(graph: &G, source: VertexId, target: VertexId) -> Result<Route> {
    if source == target {
        return Ok(Route::empty());
    }
    check_vertices(graph, source, target)?;
    let mut search = BidirectionalDijkstra::new(graph);
    search.run(source, target)?;
    search.route()
}

pub fn shortest_route_weight<G: UpwardGraph>(
    graph: &G,
    source: VertexId,
    target: VertexId,
) -> Result<Weight> {
    if source == target {
        return Ok(0);
    }
    check_vertices(graph, source, target)?;
    BidirectionalDijkstra::new(graph).run(source, target)
}

fn check_vertices<G: UpwardGraph>(graph: &G, source: VertexId, target: VertexId) -> Result<()> {
    for vertex in [source, target] {
        if !graph.contains_vertex(vertex) {
            return Err(RoutingError::InvalidArgument(format!(
                "vertex {} is not part of the graph",
                vertex
            )));
        }
    }
    Ok(())
}
