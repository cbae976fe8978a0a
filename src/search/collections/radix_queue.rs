use std::cmp::Reverse;

use radix_heap::RadixHeapMap;

use crate::graphs::{VertexId, Weight};

/// Monotone min-queue for searches with non-negative edge weights. Keys are
/// wrapped in `Reverse` because `RadixHeapMap` is a max-heap. Every pushed
/// cost must be at least the last popped one.
#[derive(Clone)]
pub struct RadixQueue {
    heap: RadixHeapMap<Reverse<Weight>, (VertexId, u32)>,
}

impl Default for RadixQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl RadixQueue {
    pub fn new() -> RadixQueue {
        RadixQueue {
            heap: RadixHeapMap::new(),
        }
    }

    pub fn push(&mut self, cost: Weight, vertex: VertexId, hops: u32) {
        self.heap.push(Reverse(cost), (vertex, hops));
    }

    /// Returns `(cost, vertex, hops)` of the cheapest entry.
    pub fn pop(&mut self) -> Option<(Weight, VertexId, u32)> {
        let (Reverse(cost), (vertex, hops)) = self.heap.pop()?;
        Some((cost, vertex, hops))
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }
}
