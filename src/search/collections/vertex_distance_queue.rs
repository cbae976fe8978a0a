use std::{cmp::Reverse, collections::BinaryHeap};

use crate::graphs::{VertexId, Weight};

/// A min-queue of `(cost, vertex)` pairs without decrease-key. Callers skip
/// stale entries by comparing against their cost map.
#[derive(Clone, Debug, Default)]
pub struct VertexDistanceQueue {
    heap: BinaryHeap<Reverse<(Weight, VertexId)>>,
}

impl VertexDistanceQueue {
    pub fn new() -> Self {
        VertexDistanceQueue {
            heap: BinaryHeap::new(),
        }
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    pub fn insert(&mut self, vertex: VertexId, cost: Weight) {
        self.heap.push(Reverse((cost, vertex)));
    }

    pub fn pop(&mut self) -> Option<(VertexId, Weight)> {
        let Reverse((cost, vertex)) = self.heap.pop()?;
        Some((vertex, cost))
    }

    pub fn peek(&self) -> Option<(VertexId, Weight)> {
        let Reverse((cost, vertex)) = self.heap.peek()?;
        Some((*vertex, *cost))
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
