use std::{collections::BTreeMap, sync::Arc};

use log::info;

use crate::{
    error::{Result, RoutingError},
    graphs::{path::Route, path::ShortestPathRequest, search_graph::SearchGraph, Weight},
    search::{
        ch::bidirectional,
        endpoints::{EndpointEdges, RoutingGraph},
        PathFinding,
    },
};

/// Answers queries on one contracted search graph per profile. Which graph
/// is used is switched explicitly with [`Router::set_active`].
#[derive(Clone, Debug, Default)]
pub struct Router {
    graphs: BTreeMap<String, Arc<SearchGraph>>,
    active: Option<String>,
}

impl Router {
    pub fn new() -> Router {
        Router::default()
    }

    /// Registers a search graph. The first registered profile becomes active.
    pub fn add_profile(&mut self, name: impl Into<String>, graph: SearchGraph) {
        let name = name.into();
        if self.active.is_none() {
            self.active = Some(name.clone());
        }
        self.graphs.insert(name, Arc::new(graph));
    }

    pub fn profiles(&self) -> impl Iterator<Item = &str> + '_ {
        self.graphs.keys().map(String::as_str)
    }

    pub fn set_active(&mut self, name: &str) -> Result<()> {
        if !self.graphs.contains_key(name) {
            return Err(RoutingError::InvalidArgument(format!(
                "no search graph is loaded for profile {}",
                name
            )));
        }
        info!("switching active profile to {}", name);
        self.active = Some(name.to_string());
        Ok(())
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active_graph(&self) -> Result<&SearchGraph> {
        self.active
            .as_ref()
            .and_then(|name| self.graphs.get(name))
            .map(Arc::as_ref)
            .ok_or_else(|| RoutingError::InvalidArgument("no profile is loaded".to_string()))
    }

    pub fn calculate_shortest_route(&self, request: ShortestPathRequest) -> Result<Route> {
        if request.is_trivial() {
            return Ok(Route::empty());
        }
        self.active_graph()?.shortest_route(request)
    }

    /// Routes between two points that are not graph vertices. Each endpoint
    /// brings its own temporary vertex and synthetic edges.
    pub fn calculate_shortest_route_between_endpoints(
        &self,
        source: EndpointEdges,
        target: EndpointEdges,
    ) -> Result<Route> {
        let (source_vertex, target_vertex) = (source.vertex, target.vertex);
        let graph = RoutingGraph::new(self.active_graph()?)
            .with_source(source)?
            .with_target(target)?;
        bidirectional::shortest_route(&graph, source_vertex, target_vertex)
    }
}

impl PathFinding for Router {
    fn shortest_route(&self, request: ShortestPathRequest) -> Result<Route> {
        self.calculate_shortest_route(request)
    }

    fn shortest_route_weight(&self, request: ShortestPathRequest) -> Result<Weight> {
        if request.is_trivial() {
            return Ok(0);
        }
        self.active_graph()?.shortest_route_weight(request)
    }
}
