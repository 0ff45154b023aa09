use std::cmp::Ordering;
use std::collections::BinaryHeap;

use pathviz_core::Pos;

/// A frontier entry: a position and the distance it was pushed with.
///
/// Entries are never updated in place. A cell whose distance improves is
/// pushed again, and the older, larger entry is skipped when it surfaces.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Entry {
    pub(crate) pos: Pos,
    pub(crate) distance: u64,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops the smallest distance first.
        other
            .distance
            .cmp(&self.distance)
            .then_with(|| other.pos.cmp(&self.pos))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue of cells keyed by tentative distance, without
/// decrease-key.
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<Entry>,
}

impl Frontier {
    pub(crate) fn with_capacity(cap: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(cap),
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, pos: Pos, distance: u64) {
        self.heap.push(Entry { pos, distance });
    }

    #[inline]
    pub(crate) fn pop(&mut self) -> Option<Entry> {
        self.heap.pop()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}
