//! Waiting-line structures for the triage engine.
//!
//! Two queues back the engine: a fixed-capacity circular buffer for
//! routine tokens and a binary min-heap for emergency entries. Both are
//! plain values owned by the service; neither allocates beyond its
//! contents.

use crate::models::{EmergencyEntry, TriageError};
use std::collections::BinaryHeap;

/// Fixed-capacity circular buffer of routine visit tokens.
///
/// Capacity is set at construction and never resized. Indices wrap mod
/// capacity; `len` is the single source of truth for emptiness.
#[derive(Debug, Clone)]
pub struct BoundedFifoQueue {
    slots: Vec<Option<String>>,
    capacity: usize,
    front: usize,
    rear: usize,
    len: usize,
}

impl BoundedFifoQueue {
    pub fn new(capacity: usize) -> Self {
        BoundedFifoQueue {
            slots: vec![None; capacity],
            capacity,
            front: 0,
            rear: 0,
            len: 0,
        }
    }

    /// Append a token at the logical rear.
    pub fn enqueue(&mut self, token: String) -> Result<(), TriageError> {
        if self.len == self.capacity {
            return Err(TriageError::QueueFull);
        }
        if self.len == 0 {
            self.front = 0;
            self.rear = 0;
        } else {
            self.rear = (self.rear + 1) % self.capacity;
        }
        self.slots[self.rear] = Some(token);
        self.len += 1;
        Ok(())
    }

    /// Remove and return the logical front token.
    pub fn dequeue(&mut self) -> Result<String, TriageError> {
        if self.len == 0 {
            return Err(TriageError::QueueEmpty);
        }
        let token = self.slots[self.front]
            .take()
            .ok_or(TriageError::QueueEmpty)?;
        self.len -= 1;
        if self.len == 0 {
            self.front = 0;
            self.rear = 0;
        } else {
            self.front = (self.front + 1) % self.capacity;
        }
        Ok(token)
    }

    /// Look at the front token without removing it.
    pub fn peek(&self) -> Result<&str, TriageError> {
        if self.len == 0 {
            return Err(TriageError::QueueEmpty);
        }
        self.slots[self.front]
            .as_deref()
            .ok_or(TriageError::QueueEmpty)
    }

    /// Rewind the rear by one slot, discarding whatever token sits there.
    ///
    /// This is the inverse of `enqueue` for undo. It deliberately does not
    /// validate that the discarded token is the one being undone: with
    /// only the single most recent action revertible, the rear slot is
    /// always the booking that the undo targets.
    pub(crate) fn unenqueue_last(&mut self) {
        if self.len == 0 {
            return;
        }
        self.slots[self.rear].take();
        self.rear = (self.rear + self.capacity - 1) % self.capacity;
        self.len -= 1;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Min-heap of emergency entries keyed by (severity, patient id).
///
/// Wraps `BinaryHeap`; `EmergencyEntry`'s inverted `Ord` makes the
/// standard max-heap pop the most urgent entry first.
#[derive(Debug, Clone, Default)]
pub struct EmergencyHeap {
    heap: BinaryHeap<EmergencyEntry>,
}

impl EmergencyHeap {
    pub fn new() -> Self {
        EmergencyHeap {
            heap: BinaryHeap::new(),
        }
    }

    /// Insert an entry, O(log n).
    pub fn push(&mut self, entry: EmergencyEntry) {
        self.heap.push(entry);
    }

    /// Remove and return the most urgent entry, O(log n).
    pub fn pop(&mut self) -> Result<EmergencyEntry, TriageError> {
        self.heap.pop().ok_or(TriageError::QueueEmpty)
    }

    /// Remove one entry matching the exact (severity, patient id) pair.
    ///
    /// Linear scan plus full re-heapify, O(n). Only the undo of an
    /// emergency admission takes this path, so the cost is off the serve
    /// path.
    pub fn remove_by_value(&mut self, entry: &EmergencyEntry) -> Result<(), TriageError> {
        let mut entries = std::mem::take(&mut self.heap).into_vec();
        let pos = entries.iter().position(|e| e == entry);
        if let Some(pos) = pos {
            entries.swap_remove(pos);
        }
        self.heap = BinaryHeap::from(entries);
        match pos {
            Some(_) => Ok(()),
            None => Err(TriageError::EntryNotFound),
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enqueue_past_capacity_is_rejected() {
        let mut q = BoundedFifoQueue::new(2);
        q.enqueue("T1".to_string()).unwrap();
        q.enqueue("T2".to_string()).unwrap();
        assert_eq!(q.enqueue("T3".to_string()), Err(TriageError::QueueFull));
        // One dequeue frees a slot.
        assert_eq!(q.dequeue().unwrap(), "T1");
        q.enqueue("T3".to_string()).unwrap();
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn dequeue_preserves_fifo_order_across_wraparound() {
        let mut q = BoundedFifoQueue::new(3);
        q.enqueue("A".to_string()).unwrap();
        q.enqueue("B".to_string()).unwrap();
        assert_eq!(q.dequeue().unwrap(), "A");
        // C and D wrap past the end of the buffer.
        q.enqueue("C".to_string()).unwrap();
        q.enqueue("D".to_string()).unwrap();
        assert_eq!(q.dequeue().unwrap(), "B");
        assert_eq!(q.dequeue().unwrap(), "C");
        assert_eq!(q.dequeue().unwrap(), "D");
        assert_eq!(q.dequeue(), Err(TriageError::QueueEmpty));
    }

    #[test]
    fn peek_does_not_mutate() {
        let mut q = BoundedFifoQueue::new(2);
        assert_eq!(q.peek(), Err(TriageError::QueueEmpty));
        q.enqueue("T1".to_string()).unwrap();
        assert_eq!(q.peek().unwrap(), "T1");
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn unenqueue_last_drops_most_recent_token() {
        let mut q = BoundedFifoQueue::new(3);
        q.enqueue("A".to_string()).unwrap();
        q.enqueue("B".to_string()).unwrap();
        q.unenqueue_last();
        assert_eq!(q.len(), 1);
        assert_eq!(q.dequeue().unwrap(), "A");
        assert!(q.is_empty());
    }

    #[test]
    fn unenqueue_then_enqueue_reuses_slot() {
        let mut q = BoundedFifoQueue::new(2);
        q.enqueue("A".to_string()).unwrap();
        q.unenqueue_last();
        assert!(q.is_empty());
        q.enqueue("B".to_string()).unwrap();
        assert_eq!(q.dequeue().unwrap(), "B");
    }

    #[test]
    fn heap_pops_in_severity_then_id_order() {
        let mut h = EmergencyHeap::new();
        h.push(EmergencyEntry::new(2, 1));
        h.push(EmergencyEntry::new(1, 2));
        h.push(EmergencyEntry::new(1, 1));
        assert_eq!(h.pop().unwrap(), EmergencyEntry::new(1, 1));
        assert_eq!(h.pop().unwrap(), EmergencyEntry::new(1, 2));
        assert_eq!(h.pop().unwrap(), EmergencyEntry::new(2, 1));
        assert_eq!(h.pop(), Err(TriageError::QueueEmpty));
    }

    #[test]
    fn remove_by_value_needs_exact_match() {
        let mut h = EmergencyHeap::new();
        h.push(EmergencyEntry::new(3, 7));
        h.push(EmergencyEntry::new(5, 9));
        assert_eq!(
            h.remove_by_value(&EmergencyEntry::new(4, 7)),
            Err(TriageError::EntryNotFound)
        );
        assert_eq!(h.len(), 2);
        h.remove_by_value(&EmergencyEntry::new(5, 9)).unwrap();
        assert_eq!(h.pop().unwrap(), EmergencyEntry::new(3, 7));
        assert!(h.is_empty());
    }

    #[test]
    fn remove_by_value_keeps_heap_ordering() {
        let mut h = EmergencyHeap::new();
        for (sev, pid) in [(4, 1), (2, 2), (6, 3), (1, 4), (3, 5)] {
            h.push(EmergencyEntry::new(sev, pid));
        }
        h.remove_by_value(&EmergencyEntry::new(2, 2)).unwrap();
        assert_eq!(h.pop().unwrap(), EmergencyEntry::new(1, 4));
        assert_eq!(h.pop().unwrap(), EmergencyEntry::new(3, 5));
        assert_eq!(h.pop().unwrap(), EmergencyEntry::new(4, 1));
        assert_eq!(h.pop().unwrap(), EmergencyEntry::new(6, 3));
    }
}
