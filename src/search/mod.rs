use crate::{
    error::Result,
    graphs::{
        contraction_graph::ContractionGraph, path::Route, path::ShortestPathRequest,
        search_graph::SearchGraph, Weight,
    },
};

pub mod ch;
pub mod collections;
pub mod dijkstra;
pub mod endpoints;

pub trait PathFinding: Send + Sync {
    fn shortest_route(&self, request: ShortestPathRequest) -> Result<Route>;

    fn shortest_route_weight(&self, request: ShortestPathRequest) -> Result<Weight>;
}

impl PathFinding for SearchGraph {
    fn shortest_route(&self, request: ShortestPathRequest) -> Result<Route> {
        ch::bidirectional::shortest_route(self, request.source, request.target)
    }

    fn shortest_route_weight(&self, request: ShortestPathRequest) -> Result<Weight> {
        ch::bidirectional::shortest_route_weight(self, request.source, request.target)
    }
}

impl PathFinding for ContractionGraph {
    fn shortest_route(&self, request: ShortestPathRequest) -> Result<Route> {
        dijkstra::shortest_route(self, request.source, request.target)
    }

    fn shortest_route_weight(&self, request: ShortestPathRequest) -> Result<Weight> {
        Ok(dijkstra::shortest_route(self, request.source, request.target)?.weight)
    }
}
