//! Min-priority open list for best-first search.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use gc_core::Cell;

/// Candidate cells ordered by estimated total cost.
///
/// The same cell may be pushed any number of times with different
/// priorities.  The frontier does not deduplicate: the search discards stale
/// entries when it pops a cell it has already closed.
///
/// Ties on priority are broken by insertion order (first in, first out), so
/// a given push sequence always pops in the same order.
#[derive(Debug, Default, Clone)]
pub struct PriorityFrontier {
    // Reverse makes BinaryHeap (max) behave as min-heap.  The sequence number
    // is unique, so `Cell` never takes part in the comparison.
    heap:     BinaryHeap<Reverse<(u32, u64, Cell)>>,
    next_seq: u64,
}

impl PriorityFrontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for `capacity` entries (at most rows × cols distinct
    /// cells, more when stale duplicates accumulate).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap:     BinaryHeap::with_capacity(capacity),
            next_seq: 0,
        }
    }

    /// Insert (or re-insert) `cell` with `priority`.  O(log n).
    #[inline]
    pub fn push(&mut self, cell: Cell, priority: u32) {
        self.heap.push(Reverse((priority, self.next_seq, cell)));
        self.next_seq += 1;
    }

    /// Remove and return the cell with the smallest priority.  O(log n).
    #[inline]
    pub fn pop_min(&mut self) -> Option<Cell> {
        self.pop_min_entry().map(|(cell, _)| cell)
    }

    /// Like [`pop_min`](Self::pop_min) but also returns the priority.
    pub fn pop_min_entry(&mut self) -> Option<(Cell, u32)> {
        self.heap
            .pop()
            .map(|Reverse((priority, _, cell))| (cell, priority))
    }

    /// Smallest priority currently queued, without removing it.
    pub fn peek_priority(&self) -> Option<u32> {
        self.heap.peek().map(|Reverse((priority, _, _))| *priority)
    }

    /// Number of queued entries, stale duplicates included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop every entry and restart the tie-break sequence.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.next_seq = 0;
    }
}
