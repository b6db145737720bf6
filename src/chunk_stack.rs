//! Sequenced stack of chunk references with gap-tolerant compaction.
//! Grounded on `original_source/include/ChunkStack.h`'s Zap/Collapse
//! shape. Used by `passes::combine`'s `mark_typedef` (collecting a
//! multi-name typedef's comma-separated declarators before retyping them
//! all at once) and `passes::align`'s `collect_runs` (accumulating an
//! in-progress alignment run before it's closed off by a line-span gap).

use crate::chunk::ChunkId;
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ChunkStackEntry {
    pub seqnum: u64,
    pub chunk: ChunkId,
}

#[derive(Debug, Default)]
pub struct ChunkStack {
    entries: VecDeque<Option<ChunkStackEntry>>,
    seqnum: u64,
}

impl ChunkStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live (non-zapped) entry count.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn push_back(&mut self, chunk: ChunkId) {
        self.seqnum += 1;
        self.entries.push_back(Some(ChunkStackEntry {
            seqnum: self.seqnum,
            chunk,
        }));
    }

    pub fn top(&self) -> Option<ChunkStackEntry> {
        self.entries.iter().rev().flatten().next().copied()
    }

    pub fn get(&self, idx: usize) -> Option<ChunkStackEntry> {
        self.entries.get(idx).copied().flatten()
    }

    pub fn pop_back(&mut self) -> Option<ChunkId> {
        while let Some(slot) = self.entries.pop_back() {
            if let Some(entry) = slot {
                return Some(entry.chunk);
            }
        }
        None
    }

    pub fn pop_front(&mut self) -> Option<ChunkId> {
        while let Some(slot) = self.entries.pop_front() {
            if let Some(entry) = slot {
                return Some(entry.chunk);
            }
        }
        None
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Mark the entry at `idx` dead; it is physically removed on the next
    /// [`ChunkStack::collapse`].
    pub fn zap(&mut self, idx: usize) {
        if let Some(slot) = self.entries.get_mut(idx) {
            *slot = None;
        }
    }

    /// Compresses the stack by removing zapped entries.
    pub fn collapse(&mut self) {
        self.entries.retain(Option::is_some);
    }

    pub fn iter(&self) -> impl Iterator<Item = ChunkStackEntry> + '_ {
        self.entries.iter().flatten().copied()
    }
}
