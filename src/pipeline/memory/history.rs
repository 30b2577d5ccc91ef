//! Bounded sliding window of per-tick feature frames.

use std::collections::VecDeque;

/// An ordered window of recent frames, oldest first.
///
/// Unlike a ring buffer with a fixed size, the trim point is supplied on
/// every append because it follows the look-ahead requested by the current
/// tick. The oldest frame is evicted only when the length reaches the trim
/// point exactly, so the window never grows past `capacity - 1` while the
/// capacity is stable.
#[derive(Debug, Clone)]
pub struct HistoryBuffer<T> {
    frames: VecDeque<T>,
}

impl<T> Default for HistoryBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> HistoryBuffer<T> {
    /// Creates a new empty history.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames: VecDeque::new(),
        }
    }

    /// Appends a frame, dropping the oldest one if the length hits `capacity`.
    pub fn append(&mut self, frame: T, capacity: usize) {
        self.frames.push_back(frame);
        if self.frames.len() == capacity {
            self.frames.pop_front();
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Gets a frame by index (0 = oldest).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.frames.get(index)
    }

    /// Iterates from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.frames.iter()
    }

    /// Iterates over the newest `count` frames, oldest first.
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &T> {
        let skip = self.frames.len().saturating_sub(count);
        self.frames.iter().skip(skip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_len() {
        let mut buf = HistoryBuffer::new();
        assert!(buf.is_empty());

        buf.append(1, 5);
        buf.append(2, 5);
        assert_eq!(buf.len(), 2);
        assert_eq!(*buf.get(1).unwrap(), 2);
    }

    #[test]
    fn test_trim_fires_when_capacity_reached() {
        let mut buf = HistoryBuffer::new();
        for i in 0..3 {
            buf.append(i, 4);
        }
        assert_eq!(buf.len(), 3);

        buf.append(3, 4); // length hits 4, oldest dropped
        assert_eq!(buf.len(), 3);
        assert_eq!(*buf.get(0).unwrap(), 1);
    }

    #[test]
    fn test_flood_keeps_newest_in_order() {
        let mut buf = HistoryBuffer::new();
        for i in 0..50 {
            buf.append(i, 7);
        }
        let collected: Vec<_> = buf.iter().copied().collect();
        assert_eq!(collected, vec![44, 45, 46, 47, 48, 49]);
    }

    #[test]
    fn test_shrinking_capacity_is_latched() {
        let mut buf = HistoryBuffer::new();
        for i in 0..6 {
            buf.append(i, 11);
        }
        // A smaller trim point does not retroactively shorten the window
        buf.append(6, 3);
        assert_eq!(buf.len(), 7);
    }

    #[test]
    fn test_capacity_one_keeps_nothing() {
        let mut buf = HistoryBuffer::new();
        buf.append(1, 1);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_recent() {
        let mut buf = HistoryBuffer::new();
        for i in 0..5 {
            buf.append(i, 100);
        }
        let tail: Vec<_> = buf.recent(2).copied().collect();
        assert_eq!(tail, vec![3, 4]);
        assert_eq!(buf.recent(10).count(), 5);
    }
}
