//! The open set: cells discovered but not yet expanded.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Which cell wins when several share the lowest priority.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TieBreak {
    /// The cell pushed first.
    #[default]
    EarliestInserted,
    /// The cell pushed last. This is what a linear `<=` scan over an
    /// insertion-ordered list selects.
    LatestInserted,
}

/// Heap entry, ordered so the max-heap pops the lowest priority and, among
/// equal priorities, the lowest rank.
#[derive(Clone, Copy, Debug)]
struct Entry {
    idx: usize,
    priority: f64,
    rank: u64,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.rank.cmp(&self.rank))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

/// Best-first priority queue over flat cell indices.
///
/// A cell is held at most once: pushing a queued cell is a no-op. Ties on
/// priority are broken by insertion order according to [`TieBreak`], so
/// selection is fully deterministic.
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    queued: Vec<bool>,
    inserted: u64,
    tie_break: TieBreak,
}

impl Frontier {
    /// Create an empty frontier for `len` cells.
    pub fn new(len: usize, tie_break: TieBreak) -> Self {
        Self {
            heap: BinaryHeap::new(),
            queued: vec![false; len],
            inserted: 0,
            tie_break,
        }
    }

    /// Empty the frontier and size it for `len` cells.
    pub fn clear(&mut self, len: usize) {
        self.heap.clear();
        self.queued.clear();
        self.queued.resize(len, false);
        self.inserted = 0;
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    pub fn set_tie_break(&mut self, tie_break: TieBreak) {
        self.tie_break = tie_break;
    }

    /// Queue `idx` with `priority`. Returns `false` if it was already queued.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is not below the length given to [`Frontier::clear`].
    pub fn push(&mut self, idx: usize, priority: f64) -> bool {
        if self.queued[idx] {
            return false;
        }
        self.queued[idx] = true;
        let rank = match self.tie_break {
            TieBreak::EarliestInserted => self.inserted,
            TieBreak::LatestInserted => u64::MAX - self.inserted,
        };
        self.inserted += 1;
        self.heap.push(Entry {
            idx,
            priority,
            rank,
        });
        true
    }

    /// Remove and return the cell with the lowest priority.
    pub fn pop_best(&mut self) -> Option<usize> {
        let entry = self.heap.pop()?;
        self.queued[entry.idx] = false;
        Some(entry.idx)
    }

    /// Whether `idx` is currently queued.
    pub fn contains(&self, idx: usize) -> bool {
        self.queued.get(idx).copied().unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
