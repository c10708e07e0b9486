use std::collections::VecDeque;

/// Bounded lookback, newest entry at the front. Once full, every push
/// drops the oldest entry.
#[derive(Debug, Clone)]
pub struct CircularQueue<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> CircularQueue<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Returns the dropped entry, if any. With no capacity the entry itself
    /// is handed back.
    pub fn push(&mut self, entry: T) -> Option<T> {
        if self.capacity == 0 {
            return Some(entry);
        }

        let dropped = if self.entries.len() >= self.capacity {
            self.entries.pop_back()
        } else {
            None
        };
        self.entries.push_front(entry);

        dropped
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear()
    }

    /// Newest to oldest.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &'_ T> {
        self.entries.iter()
    }

    /// The `n` newest entries paired with their age, 0 being the newest.
    #[inline]
    pub fn window(&self, n: usize) -> impl Iterator<Item = (usize, &'_ T)> {
        self.entries.iter().take(n).enumerate()
    }
}
