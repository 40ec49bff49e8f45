use serde::{Serialize, Serializer};
use std::collections::VecDeque;

/// Number of turns retained per channel.
pub const WINDOW_SIZE: usize = 15;

/// Fixed-capacity FIFO. Index 0 is the oldest entry, the last is the newest.
#[derive(Debug, Clone, PartialEq)]
pub struct SlidingWindow<T> {
    items: VecDeque<T>,
}

impl<T> Default for SlidingWindow<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SlidingWindow<T> {
    pub fn new() -> Self {
        Self {
            items: VecDeque::with_capacity(WINDOW_SIZE),
        }
    }

    /// Append `value`, evicting the oldest entry first when full.
    /// Returns the evicted entry, if any.
    pub fn push(&mut self, value: T) -> Option<T> {
        let evicted = if self.items.len() >= WINDOW_SIZE {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(value);
        evicted
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() == WINDOW_SIZE
    }

    pub fn latest(&self) -> Option<&T> {
        self.items.back()
    }
}

impl<T: Clone> SlidingWindow<T> {
    /// Owned copy of the contents, oldest first. Later pushes do not affect it.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}

impl<T: Serialize> Serialize for SlidingWindow<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.iter())
    }
}
