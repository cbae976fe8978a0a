use ahash::{HashMap, HashMapExt};

use crate::graphs::{VertexId, Weight};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexRoutingProperties {
    pub cost: Weight,
    pub previous: Option<VertexId>,
}

/// Sparse cost map of one search. Absent vertices have infinite cost.
#[derive(Clone, Debug, Default)]
pub struct SearchData {
    touched: HashMap<VertexId, VertexRoutingProperties>,
}

impl SearchData {
    pub fn new() -> SearchData {
        SearchData {
            touched: HashMap::new(),
        }
    }

    /// Clears all stored data, preparing for a new search.
    pub fn clear(&mut self) {
        self.touched.clear();
    }

    pub fn cost(&self, vertex: VertexId) -> Option<Weight> {
        self.touched.get(&vertex).map(|properties| properties.cost)
    }

    pub fn previous(&self, vertex: VertexId) -> Option<VertexId> {
        self.touched
            .get(&vertex)
            .and_then(|properties| properties.previous)
    }

    pub fn get(&self, vertex: VertexId) -> Option<&VertexRoutingProperties> {
        self.touched.get(&vertex)
    }

    pub fn set(&mut self, vertex: VertexId, cost: Weight, previous: Option<VertexId>) {
        self.touched
            .insert(vertex, VertexRoutingProperties { cost, previous });
    }

    /// Number of vertices reached so far.
    pub fn len(&self) -> usize {
        self.touched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.touched.is_empty()
    }
}
