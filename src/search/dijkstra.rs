use super::collections::{dijkstra_data::SearchData, vertex_distance_queue::VertexDistanceQueue};
use crate::{
    error::{Result, RoutingError},
    graphs::{
        contraction_graph::ContractionGraph, edge::Edge, path::Route, HasOutgoingEdges,
        VertexId, Weight,
    },
};

/// Plain single pair Dijkstra over the build-time graph. Ordering ranks are
/// ignored. Stops as soon as `target` is settled.
pub fn dijkstra_single_pair(
    graph: &ContractionGraph,
    data: &mut SearchData,
    queue: &mut VertexDistanceQueue,
    source: VertexId,
    target: VertexId,
) {
    data.clear();
    queue.clear();
    data.set(source, 0, None);
    queue.insert(source, 0);

    while let Some((tail, cost)) = queue.pop() {
        if data.cost(tail).is_some_and(|current| current < cost) {
            continue;
        }
        if tail == target {
            break;
        }

        for edge in graph.vertex(tail).edges() {
            let alternative = cost + edge.length();
            if data.cost(edge.to()).map_or(true, |current| alternative < current) {
                data.set(edge.to(), alternative, Some(tail));
                queue.insert(edge.to(), alternative);
            }
        }
    }
}

pub fn shortest_route_weight(
    graph: &ContractionGraph,
    source: VertexId,
    target: VertexId,
) -> Option<Weight> {
    if !graph.contains_vertex(source) || !graph.contains_vertex(target) {
        return None;
    }
    let mut data = SearchData::new();
    let mut queue = VertexDistanceQueue::new();
    dijkstra_single_pair(graph, &mut data, &mut queue, source, target);
    data.cost(target)
}

pub fn shortest_route(graph: &ContractionGraph, source: VertexId, target: VertexId) -> Result<Route> {
    if source == target {
        return Ok(Route::empty());
    }
    for vertex in [source, target] {
        if !graph.contains_vertex(vertex) {
            return Err(RoutingError::InvalidArgument(format!(
                "vertex {} is not part of the graph",
                vertex
            )));
        }
    }

    let mut data = SearchData::new();
    let mut queue = VertexDistanceQueue::new();
    dijkstra_single_pair(graph, &mut data, &mut queue, source, target);

    if data.cost(target).is_none() {
        return Err(RoutingError::RouteNotFound {
            from: source,
            to: target,
        });
    }

    let mut edges = Vec::new();
    let mut current = target;
    while let Some(previous) = data.previous(current) {
        let edge = cheapest_edge(graph, previous, current).ok_or(RoutingError::EdgeNotFound {
            from: previous,
            to: current,
        })?;
        edges.push(edge.clone());
        current = previous;
    }
    edges.reverse();

    Ok(Route::new(edges))
}

fn cheapest_edge(graph: &ContractionGraph, from: VertexId, to: VertexId) -> Option<&Edge> {
    graph
        .vertex(from)
        .edges()
        .iter()
        .filter(|edge| edge.to() == to)
        .min_by_key(|edge| edge.length())
}
