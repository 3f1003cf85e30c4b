//! FIFO work queue of groups awaiting members.

use std::collections::VecDeque;

/// First-in, first-out queue driving round-robin group filling.
///
/// Entries are group handles (indices into a project's groups). The queue
/// itself allows duplicates; callers keep each group in at most once by
/// checking [`contains`](Self::contains) before enqueuing.
#[derive(Debug, Clone, Default)]
pub struct FillQueue<T> {
    entries: VecDeque<T>,
}

impl<T: PartialEq> FillQueue<T> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    /// Appends to the back.
    pub fn enqueue(&mut self, entry: T) {
        self.entries.push_back(entry);
    }

    /// Removes and returns the oldest entry, or `None` when empty.
    pub fn dequeue(&mut self) -> Option<T> {
        self.entries.pop_front()
    }

    /// The oldest entry without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.entries.front()
    }

    /// Whether the queue has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of pending entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether `entry` is pending.
    pub fn contains(&self, entry: &T) -> bool {
        self.entries.contains(entry)
    }
}

impl<T: PartialEq> FromIterator<T> for FillQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
