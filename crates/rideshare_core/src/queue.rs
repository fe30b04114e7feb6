//! Priority queue with FIFO tie-breaking.
//!
//! Items are ordered by a key produced by an injected key function. Among
//! items whose keys compare equal, the one inserted first is removed first.
//! The tie-break is carried by a monotonically increasing sequence number
//! stored next to each item, so the heap never has to compare items directly.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

use thiserror::Error;

/// Returned by [`PriorityQueue::remove`] when the queue holds no items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot remove from an empty priority queue")]
pub struct EmptyContainer;

struct Slot<K, T> {
    key: K,
    seq: u64,
    item: T,
}

impl<K: Ord, T> Ord for Slot<K, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap a min-heap by (key, seq).
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<K: Ord, T> PartialOrd for Slot<K, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord, T> PartialEq for Slot<K, T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: Ord, T> Eq for Slot<K, T> {}

/// A min-priority queue over `T`, keyed by `K`.
pub struct PriorityQueue<T, K: Ord> {
    heap: BinaryHeap<Slot<K, T>>,
    next_seq: u64,
    key_fn: fn(&T) -> K,
}

impl<T, K: Ord> PriorityQueue<T, K> {
    /// Creates an empty queue ordering items by `key_fn`.
    pub fn with_key(key_fn: fn(&T) -> K) -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
            key_fn,
        }
    }

    /// Inserts `item` in O(log n).
    pub fn add(&mut self, item: T) {
        let key = (self.key_fn)(&item);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Slot { key, seq, item });
    }

    /// Removes the item with the smallest key, earliest-inserted on ties.
    pub fn remove(&mut self) -> Result<T, EmptyContainer> {
        self.pop().ok_or(EmptyContainer)
    }

    pub fn pop(&mut self) -> Option<T> {
        self.heap.pop().map(|slot| slot.item)
    }

    pub fn peek(&self) -> Option<&T> {
        self.heap.peek().map(|slot| &slot.item)
    }

    pub fn peek_key(&self) -> Option<&K> {
        self.heap.peek().map(|slot| &slot.key)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl<T: Ord + Clone> PriorityQueue<T, T> {
    /// Creates an empty queue ordering items by their own `Ord`.
    pub fn natural() -> Self {
        Self::with_key(T::clone)
    }
}

impl<T: Ord + Clone> Default for PriorityQueue<T, T> {
    fn default() -> Self {
        Self::natural()
    }
}

impl<T, K: Ord + fmt::Debug> fmt::Debug for PriorityQueue<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("len", &self.heap.len())
            .field("next_key", &self.peek_key())
            .finish()
    }
}
