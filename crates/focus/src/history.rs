//! Bounded history of recent alignment classifications.
//!
//! Raycasts against estimated surfaces flicker between horizontal and
//! vertical from frame to frame. The history keeps the most recent
//! classifications (oldest dropped first) and answers the vote that the
//! alignment filter uses to decide whether to switch.

use std::collections::VecDeque;

use crate::types::Alignment;

/// FIFO window of the most recent alignment classifications.
#[derive(Debug, Clone)]
pub struct AlignmentHistory {
    entries: VecDeque<Alignment>,
    capacity: usize,
}

impl AlignmentHistory {
    /// Create an empty history holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    /// Append a classification, dropping the oldest when full.
    pub fn push(&mut self, alignment: Alignment) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(alignment);
    }

    /// Change the window size, keeping the most recent entries.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries equal to `alignment`.
    pub fn count(&self, alignment: Alignment) -> usize {
        self.entries.iter().filter(|a| **a == alignment).count()
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Alignment> {
        self.entries.iter()
    }

    /// Whether the window agrees strongly enough to adopt `alignment`.
    ///
    /// Horizontal needs more than three quarters of the window, vertical
    /// only more than half. Both bounds use integer division on the window
    /// length and are strict, so exactly 3/4 or exactly 1/2 does not pass.
    pub fn supports(&self, alignment: Alignment) -> bool {
        let total = self.len();
        match alignment {
            Alignment::Horizontal => self.count(Alignment::Horizontal) > total * 3 / 4,
            Alignment::Vertical => self.count(Alignment::Vertical) > total / 2,
        }
    }
}

impl Default for AlignmentHistory {
    fn default() -> Self {
        Self::new(focus_config::DEFAULT_HISTORY_CAPACITY)
    }
}
