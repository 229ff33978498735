//! Candidate frontier: the not-yet-expanded nodes ordered by priority.
//!
//! [`PriorityFrontier`] keeps a binary min-heap of entries plus a lookup
//! table from signature to the single live entry for that signature.
//! Decrease-key is emulated by tombstoning the old entry and pushing a new
//! one; tombstoned entries stay in the heap and are skipped when they
//! surface at the root.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use fnv::{FnvHashMap, FnvHashSet};
use log::trace;
use thiserror::Error;

use crate::node::{Signature, SolutionNode};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontierError {
    #[error("no live entry left in an empty frontier")]
    Empty,
}

/// Contract shared by every frontier the engine can drive
pub trait CandidateFrontier {
    /// Add `node` unless a live entry with the same signature already has a
    /// priority at least as good. A strictly better priority replaces the
    /// existing entry.
    fn insert(&mut self, node: SolutionNode, priority: i64);

    /// Tombstone the live entry for `node`'s signature, if there is one.
    fn remove(&mut self, node: &SolutionNode);

    /// Remove and return the live node with the lowest priority.
    fn pop_best(&mut self) -> Result<SolutionNode, FrontierError>;

    /// Number of live entries
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Heap key: priority first, then path cost, then insertion sequence.
/// The sequence number makes the order total and deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeapKey {
    priority: i64,
    cost: i64,
    seq: usize,
}

impl Ord for HeapKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| self.cost.cmp(&other.cost))
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for HeapKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A heap entry owns its node; ordering looks at the key only.
#[derive(Debug)]
struct FrontierEntry {
    key: HeapKey,
    node: SolutionNode,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Live-entry record in the lookup table
#[derive(Debug, Clone, Copy)]
struct LiveEntry {
    priority: i64,
    seq: usize,
}

/// Frontier backed by a binary heap with lazy deletion.
///
/// Every heap entry is either live (its seq is in `live`) or tombstoned
/// (its seq is in `tombstones`). A tombstone is dropped as soon as its
/// entry surfaces, so a drained frontier holds nothing.
#[derive(Debug, Default)]
pub struct PriorityFrontier {
    heap: BinaryHeap<Reverse<FrontierEntry>>,
    live: FnvHashMap<Signature, LiveEntry>,
    tombstones: FnvHashSet<usize>,
    next_seq: usize,
}

impl PriorityFrontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of heap entries, live or tombstoned
    pub fn heap_len(&self) -> usize {
        self.heap.len()
    }

    /// Number of tombstoned entries still waiting in the heap
    pub fn tombstone_count(&self) -> usize {
        self.tombstones.len()
    }

    /// Priority of the live entry for `node`'s signature
    pub fn priority_of(&self, node: &SolutionNode) -> Option<i64> {
        self.live.get(&node.signature()).map(|entry| entry.priority)
    }
}

impl CandidateFrontier for PriorityFrontier {
    fn insert(&mut self, node: SolutionNode, priority: i64) {
        let signature = node.signature();

        if let Some(existing) = self.live.get(&signature).copied() {
            if existing.priority <= priority {
                return;
            }
            trace!(
                "decrease-key {} from {} to {}",
                signature,
                existing.priority,
                priority
            );
            let _ = self.tombstones.insert(existing.seq);
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(FrontierEntry {
            key: HeapKey {
                priority,
                cost: node.cost,
                seq,
            },
            node,
        }));
        let _ = self.live.insert(signature, LiveEntry { priority, seq });
    }

    fn remove(&mut self, node: &SolutionNode) {
        if let Some(existing) = self.live.remove(&node.signature()) {
            let _ = self.tombstones.insert(existing.seq);
        }
    }

    fn pop_best(&mut self) -> Result<SolutionNode, FrontierError> {
        while let Some(Reverse(entry)) = self.heap.pop() {
            if self.tombstones.remove(&entry.key.seq) {
                continue;
            }

            let _ = self.live.remove(&entry.node.signature());
            return Ok(entry.node);
        }

        Err(FrontierError::Empty)
    }

    fn len(&self) -> usize {
        self.live.len()
    }
}
