//! Bounded, newest-first log of past calibrations.
//!
//! Held in memory only; a caller creates one per session.

use std::collections::VecDeque;

use crate::types::{BrewParameters, CalibrationResult};

pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub params: BrewParameters,
    pub result: CalibrationResult,
}

#[derive(Debug, Clone)]
pub struct CalibrationHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for CalibrationHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl CalibrationHistory {
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Insert at the front; returns the entry evicted from the back, if any.
    pub fn push(&mut self, params: BrewParameters, result: CalibrationResult) -> Option<HistoryEntry> {
        self.entries.push_front(HistoryEntry { params, result });
        if self.entries.len() > self.capacity {
            self.entries.pop_back()
        } else {
            None
        }
    }

    /// Most recent entry.
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    /// Entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
