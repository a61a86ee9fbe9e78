use std::collections::VecDeque;

use crate::entry::EntryRecord;

/// FIFO of records waiting to be visited.
///
/// Discovery appends at the tail and the drain loop consumes from the head,
/// so siblings found together are visited before any of their children.
#[derive(Debug, Default)]
pub(crate) struct PendingQueue {
    records:  VecDeque<EntryRecord>,
    enqueued: usize,
}

impl PendingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_back(&mut self, record: EntryRecord) {
        self.enqueued += 1;
        self.records.push_back(record);
    }

    pub fn pop_front(&mut self) -> Option<EntryRecord> {
        self.records.pop_front()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Total number of records ever appended.
    pub fn enqueued(&self) -> usize {
        self.enqueued
    }

    /// Drop whatever is still pending.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
