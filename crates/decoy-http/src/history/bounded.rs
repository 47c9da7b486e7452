//! Bounded FIFO buffer.

use parking_lot::Mutex;
use std::collections::VecDeque;

/// Fixed-capacity FIFO safe for concurrent writers.
///
/// Append and evict-oldest happen under one lock, so the buffer never
/// exceeds its capacity, even transiently.
pub struct BoundedFifo<T> {
    capacity: usize,
    items: Mutex<VecDeque<T>>,
}

impl<T: Clone> BoundedFifo<T> {
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            items: Mutex::new(VecDeque::with_capacity(capacity.min(1024))),
        }
    }

    pub fn push(&self, item: T) {
        let mut items = self.items.lock();
        if items.len() == self.capacity {
            items.pop_front();
        }
        items.push_back(item);
    }

    /// Independent, oldest-first copy of the contents.
    pub fn values(&self) -> Vec<T> {
        self.items.lock().iter().cloned().collect()
    }

    pub fn clear(&self) {
        self.items.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
