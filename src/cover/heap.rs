//! Candidate priority queue with lazy invalidation
//!
//! A `BinaryHeap` has no decrease-key, so every update pushes a fresh entry
//! stamped with a new generation and leaves the old one behind. Stale entries
//! are recognised and discarded when they surface at the top.

use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::Arc;

/// Rebuild the heap once stale entries outnumber live ones by this factor
const COMPACT_RATIO: usize = 4;
const COMPACT_MIN_ENTRIES: usize = 1024;

/// A candidate removed from the heap along with its cached value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub text: String,
    /// Ball mass at the time the candidate was last scored
    pub cached: u64,
    /// Queue order, restored by `CandidateHeap::requeue`
    rank: u64,
}

#[derive(Debug)]
struct Slot {
    /// Shared with the index key; `None` while the slot is free
    text: Option<Arc<str>>,
    value: u64,
    /// Queue order of the candidate holding the slot
    rank: u64,
    /// Never reset, so entries left over from a previous occupant stay stale
    generation: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    value: u64,
    rank: u64,
    slot: usize,
    generation: u32,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Higher value first; among equal values the earliest-queued candidate wins
        self.value
            .cmp(&other.value)
            .then_with(|| other.rank.cmp(&self.rank))
            .then_with(|| self.generation.cmp(&other.generation))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Max-priority queue of candidate guesses keyed by cached ball mass
///
/// Each queued text is allocated once and shared by the index and its slot.
/// Popping or removing a candidate frees its slot for reuse.
///
/// # Examples
/// ```
/// use typo_cover::cover::CandidateHeap;
///
/// let mut heap = CandidateHeap::new();
/// heap.insert("dragon", 10);
/// heap.insert("monkey", 30);
/// heap.insert("dragon", 50); // refresh
///
/// assert_eq!(heap.len(), 2);
/// assert_eq!(heap.pop().unwrap().text, "dragon");
/// assert_eq!(heap.pop().unwrap().cached, 30);
/// assert!(heap.pop().is_none());
/// ```
#[derive(Debug, Default)]
pub struct CandidateHeap {
    entries: BinaryHeap<Entry>,
    slots: Vec<Slot>,
    free: Vec<usize>,
    index: FxHashMap<Arc<str>, usize>,
    next_rank: u64,
}

impl CandidateHeap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of candidates currently queued
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.index.contains_key(text)
    }

    /// Cached value of a queued candidate
    #[must_use]
    pub fn get(&self, text: &str) -> Option<u64> {
        self.index.get(text).map(|&slot| self.slots[slot].value)
    }

    /// Queue a candidate, or replace the cached value of a queued one
    ///
    /// A refreshed candidate keeps its queue order; a text inserted again
    /// after leaving the heap goes behind everything already queued.
    pub fn insert(&mut self, text: &str, value: u64) {
        let slot = match self.index.get(text) {
            Some(&slot) => slot,
            None => {
                let rank = self.next_rank;
                self.next_rank += 1;
                self.claim(text, rank)
            }
        };

        let entry = &mut self.slots[slot];
        entry.value = value;
        entry.generation = entry.generation.wrapping_add(1);
        self.entries.push(Entry {
            value,
            rank: entry.rank,
            slot,
            generation: entry.generation,
        });

        self.maybe_compact();
    }

    /// Put a popped candidate back with a fresh value, keeping its queue order
    pub fn requeue(&mut self, candidate: Candidate, value: u64) {
        if !self.index.contains_key(candidate.text.as_str()) {
            self.claim(&candidate.text, candidate.rank);
        }
        self.insert(&candidate.text, value);
    }

    /// Drop a candidate from the queue; returns whether it was queued
    pub fn remove(&mut self, text: &str) -> bool {
        match self.index.get(text) {
            Some(&slot) => self.release(slot).is_some(),
            None => false,
        }
    }

    /// Remove and return the candidate with the highest cached value
    pub fn pop(&mut self) -> Option<Candidate> {
        while let Some(top) = self.entries.pop() {
            let slot = &self.slots[top.slot];
            if slot.text.is_none() || slot.generation != top.generation {
                continue;
            }
            let (cached, rank) = (slot.value, slot.rank);
            if let Some(text) = self.release(top.slot) {
                return Some(Candidate {
                    text: text.to_string(),
                    cached,
                    rank,
                });
            }
        }
        None
    }

    /// Heap entries including stale ones
    #[must_use]
    pub fn raw_len(&self) -> usize {
        self.entries.len()
    }

    /// Take a free slot (or a new one) for a text that is not queued
    fn claim(&mut self, text: &str, rank: u64) -> usize {
        let key: Arc<str> = Arc::from(text);

        let slot = if let Some(slot) = self.free.pop() {
            let reused = &mut self.slots[slot];
            reused.text = Some(Arc::clone(&key));
            reused.rank = rank;
            slot
        } else {
            self.slots.push(Slot {
                text: Some(Arc::clone(&key)),
                value: 0,
                rank,
                generation: 0,
            });
            self.slots.len() - 1
        };
        self.index.insert(key, slot);
        slot
    }

    /// Unqueue the occupant of a slot, handing back its text
    fn release(&mut self, slot: usize) -> Option<Arc<str>> {
        let text = self.slots[slot].text.take()?;
        self.index.remove(&*text);
        self.free.push(slot);
        Some(text)
    }

    fn maybe_compact(&mut self) {
        if self.entries.len() < COMPACT_MIN_ENTRIES
            || self.entries.len() < COMPACT_RATIO * self.len().max(1)
        {
            return;
        }
        let slots = &self.slots;
        self.entries.retain(|entry| {
            let slot = &slots[entry.slot];
            slot.text.is_some() && slot.generation == entry.generation
        });
    }
}
