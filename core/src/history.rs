//! Time-ordered history buffer

use std::collections::VecDeque;
use std::ops::Index;

use crate::sample::HistoryEntry;

/// Ordered sequence of recorded entries, strictly increasing by timestamp.
///
/// Entries are appended at the back and removed from the front (age pruning)
/// or from the back (truncation after a rewind). Both are O(1) per entry on a
/// `VecDeque`.
#[derive(Clone, Debug, Default)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
}

impl History {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty history with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Append an entry.
    ///
    /// Returns `false` and leaves the history untouched if the entry's
    /// timestamp is not strictly greater than the newest one (or is NaN).
    pub fn push(&mut self, entry: HistoryEntry) -> bool {
        let timestamp = entry.timestamp();
        if timestamp.is_nan() {
            return false;
        }
        if let Some(back) = self.entries.back()
            && timestamp <= back.timestamp()
        {
            return false;
        }
        self.entries.push_back(entry);
        true
    }

    /// Remove leading entries with `timestamp < cutoff`.
    ///
    /// The newest entry is always kept. Returns the number of entries removed.
    pub fn prune_older_than(&mut self, cutoff: f64) -> usize {
        let mut removed = 0;
        while self.entries.len() > 1 {
            match self.entries.front() {
                Some(front) if front.timestamp() < cutoff => {
                    self.entries.pop_front();
                    removed += 1;
                }
                _ => break,
            }
        }
        removed
    }

    /// Keep entries `[0, index]`, dropping everything newer.
    ///
    /// Returns the number of entries removed.
    pub fn truncate_after(&mut self, index: usize) -> usize {
        let keep = (index + 1).min(self.entries.len());
        let removed = self.entries.len() - keep;
        self.entries.truncate(keep);
        removed
    }

    /// Remove all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Oldest entry
    pub fn front(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    /// Newest entry
    pub fn back(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Seconds between the oldest and newest entry (0.0 with fewer than two)
    pub fn span(&self) -> f64 {
        match (self.entries.front(), self.entries.back()) {
            (Some(front), Some(back)) => back.timestamp() - front.timestamp(),
            _ => 0.0,
        }
    }
}

impl Index<usize> for History {
    type Output = HistoryEntry;

    fn index(&self, index: usize) -> &HistoryEntry {
        &self.entries[index]
    }
}
