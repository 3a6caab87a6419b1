//! Bounded, 1-indexed, array-backed binary min-heap.
//!
//! The bucket primitive of the store: a min-heap over at most `C` values,
//! ordered by [`PriorityRank::rank`], exposing the *raw* structural
//! operations (append, swap, remove-last, sink, swim, positional get) rather
//! than an opaque `insert`/`extract-min` pair.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    BoundedMinHeap<T, C=5> Layout                        │
//! │                                                                         │
//! │   Logical positions are 1-indexed (classic array-heap arithmetic):     │
//! │                                                                         │
//! │        parent(i) = i / 2      left(i) = 2i      right(i) = 2i + 1      │
//! │                                                                         │
//! │   pos:        1     2     3     4     5                                 │
//! │             ┌─────┬─────┬─────┬─────┬─────┐                            │
//! │   slots:    │  A  │  B  │  C  │  D  │  E  │   len = 5, capacity C = 5  │
//! │             └─────┴─────┴─────┴─────┴─────┘                            │
//! │                                                                         │
//! │                     A (root = minimum rank)                             │
//! │                    / \                                                  │
//! │                   B   C                                                 │
//! │                  / \                                                    │
//! │                 D   E                                                   │
//! │                                                                         │
//! │   Invariant: rank(slots[i/2]) <= rank(slots[i]) for every i in 2..=len  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Primitive Set
//!
//! | Operation     | Description                               | Complexity |
//! |---------------|-------------------------------------------|------------|
//! | [`push_back`] | Append at `len+1`, no heap fix-up         | O(1)       |
//! | [`pop_back`]  | Remove position `len`                     | O(1)       |
//! | [`swap`]      | Exchange two occupied positions           | O(1)       |
//! | [`sink`]      | Restore invariant downward from a position| O(log C)   |
//! | [`swim`]      | Restore invariant upward from a position  | O(log C)   |
//! | [`get`]       | Positional access, 1-indexed              | O(1)       |
//! | [`peek`]      | Root (minimum rank) without removal       | O(1)       |
//!
//! [`push_back`]: BoundedMinHeap::push_back
//! [`pop_back`]: BoundedMinHeap::pop_back
//! [`swap`]: BoundedMinHeap::swap
//! [`sink`]: BoundedMinHeap::sink
//! [`swim`]: BoundedMinHeap::swim
//! [`get`]: BoundedMinHeap::get
//! [`peek`]: BoundedMinHeap::peek
//!
//! ## Why raw primitives
//!
//! `push_back` deliberately does **not** restore the heap invariant, and
//! nothing here decides *when* something is evicted. The orchestrator
//! composes the primitives into domain recipes — evict-then-insert,
//! delete-then-resift — without this module duplicating or constraining the
//! policy. The cost is that callers must sequence the primitives correctly;
//! sequencing mistakes surface as [`HeapError`], not as silent corruption.
//!
//! ## Example Usage
//!
//! ```
//! use shelfkit::ds::BoundedMinHeap;
//! use shelfkit::item::Item;
//!
//! let mut bucket: BoundedMinHeap<Item, 5> = BoundedMinHeap::new();
//!
//! // Insert = append + swim
//! bucket.push_back(Item::new(1, "a", 0, 1, 8)).unwrap();
//! bucket.swim(1).unwrap();
//! bucket.push_back(Item::new(2, "b", 0, 1, 3)).unwrap();
//! bucket.swim(2).unwrap();
//!
//! // Root holds the minimum rank (lowest demand)
//! assert_eq!(bucket.peek().map(|item| item.id()), Some(2));
//! bucket.check_invariants().unwrap();
//! ```

use std::fmt;

use crate::error::{HeapError, InvariantError};
use crate::traits::PriorityRank;

/// Array-backed binary min-heap holding at most `C` values, ordered by
/// [`PriorityRank::rank`] (minimum at the root, 1-indexed positions).
///
/// See the module documentation for the primitive set and the invariant.
#[derive(Debug, Clone)]
pub struct BoundedMinHeap<T, const C: usize> {
    // Bounded: never grows past C. Storage is 0-indexed; the public API is
    // 1-indexed to keep parent/child arithmetic in heap form.
    slots: Vec<T>,
}

impl<T: PriorityRank, const C: usize> BoundedMinHeap<T, C> {
    /// Creates an empty heap with all `C` slots preallocated.
    ///
    /// # Example
    ///
    /// ```
    /// use shelfkit::ds::BoundedMinHeap;
    /// use shelfkit::item::Item;
    ///
    /// let bucket: BoundedMinHeap<Item, 5> = BoundedMinHeap::new();
    /// assert!(bucket.is_empty());
    /// assert_eq!(bucket.capacity(), 5);
    /// ```
    pub fn new() -> Self {
        Self {
            slots: Vec::with_capacity(C),
        }
    }

    /// Returns the fixed capacity `C`.
    #[inline]
    pub const fn capacity(&self) -> usize {
        C
    }

    /// Returns the number of occupied slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no slots are occupied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns `true` if all `C` slots are occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.slots.len() == C
    }

    /// Returns the value at 1-indexed position `pos`.
    ///
    /// # Errors
    ///
    /// [`HeapError::IndexOutOfRange`] if `pos` is outside `[1, len]`.
    ///
    /// # Example
    ///
    /// ```
    /// use shelfkit::ds::BoundedMinHeap;
    /// use shelfkit::item::Item;
    ///
    /// let mut bucket: BoundedMinHeap<Item, 3> = BoundedMinHeap::new();
    /// bucket.push_back(Item::new(1, "a", 0, 1, 1)).unwrap();
    ///
    /// assert_eq!(bucket.get(1).unwrap().id(), 1);
    /// assert!(bucket.get(0).is_err());
    /// assert!(bucket.get(2).is_err());
    /// ```
    pub fn get(&self, pos: usize) -> Result<&T, HeapError> {
        let idx = self.index_of(pos)?;
        Ok(&self.slots[idx])
    }

    /// Returns a mutable reference to the value at position `pos`.
    ///
    /// Mutating state that feeds the value's rank invalidates its heap
    /// position; the caller must re-sift (`sink`/`swim`) afterwards.
    ///
    /// # Errors
    ///
    /// [`HeapError::IndexOutOfRange`] if `pos` is outside `[1, len]`.
    pub fn get_mut(&mut self, pos: usize) -> Result<&mut T, HeapError> {
        let idx = self.index_of(pos)?;
        Ok(&mut self.slots[idx])
    }

    /// Returns the root (minimum rank) without removing it, or `None` when
    /// empty.
    ///
    /// When the invariant holds, this is the eviction candidate.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.slots.first()
    }

    /// Appends `value` at position `len + 1` **without** restoring the heap
    /// invariant.
    ///
    /// The caller is responsible for following up with
    /// [`swim`](Self::swim)`(len)` — the split lets an orchestrator batch
    /// eviction + insertion + fix-up as one recipe.
    ///
    /// # Errors
    ///
    /// [`HeapError::CapacityExceeded`] if all `C` slots are occupied; the
    /// caller must free a slot first.
    pub fn push_back(&mut self, value: T) -> Result<(), HeapError> {
        if self.slots.len() == C {
            return Err(HeapError::CapacityExceeded { capacity: C });
        }
        self.slots.push(value);
        Ok(())
    }

    /// Removes and returns the value at position `len`.
    ///
    /// Does not touch any other position, so removing the last slot never
    /// violates the invariant over the remaining values.
    ///
    /// # Errors
    ///
    /// [`HeapError::Underflow`] if the heap is empty.
    pub fn pop_back(&mut self) -> Result<T, HeapError> {
        self.slots.pop().ok_or(HeapError::Underflow)
    }

    /// Exchanges the values at positions `a` and `b` in place.
    ///
    /// # Errors
    ///
    /// [`HeapError::IndexOutOfRange`] if either position is outside
    /// `[1, len]`.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<(), HeapError> {
        let ia = self.index_of(a)?;
        let ib = self.index_of(b)?;
        self.slots.swap(ia, ib);
        Ok(())
    }

    /// Restores the heap invariant downward from `pos`, returning the final
    /// position of the value that started there.
    ///
    /// Repeatedly swaps with the smaller child while that child's rank is
    /// strictly below the value's own. O(log C).
    ///
    /// # Errors
    ///
    /// [`HeapError::IndexOutOfRange`] if `pos` is outside `[1, len]`.
    pub fn sink(&mut self, pos: usize) -> Result<usize, HeapError> {
        self.index_of(pos)?;
        let len = self.slots.len();
        let mut i = pos;

        while 2 * i <= len {
            let left = 2 * i;
            let right = left + 1;
            let mut child = left;
            if right <= len && self.rank_at(right) < self.rank_at(left) {
                child = right;
            }
            if self.rank_at(child) >= self.rank_at(i) {
                break;
            }
            self.slots.swap(child - 1, i - 1);
            i = child;
        }
        Ok(i)
    }

    /// Restores the heap invariant upward from `pos`, returning the final
    /// position of the value that started there.
    ///
    /// Repeatedly swaps with the parent while the parent's rank is strictly
    /// above the value's own. O(log C).
    ///
    /// # Errors
    ///
    /// [`HeapError::IndexOutOfRange`] if `pos` is outside `[1, len]`.
    pub fn swim(&mut self, pos: usize) -> Result<usize, HeapError> {
        self.index_of(pos)?;
        let mut i = pos;

        while i > 1 && self.rank_at(i / 2) > self.rank_at(i) {
            self.slots.swap(i / 2 - 1, i - 1);
            i /= 2;
        }
        Ok(i)
    }

    /// Returns an iterator over occupied slots in storage order
    /// (position 1 first). Not sorted by rank beyond the heap property.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.slots.iter()
    }

    /// Returns the occupied slots as a slice in storage order.
    pub fn as_slice(&self) -> &[T] {
        &self.slots
    }

    /// Verifies the heap property over every occupied position.
    ///
    /// # Errors
    ///
    /// [`InvariantError`] naming the first violating position.
    ///
    /// # Example
    ///
    /// ```
    /// use shelfkit::ds::BoundedMinHeap;
    /// use shelfkit::item::Item;
    ///
    /// let mut bucket: BoundedMinHeap<Item, 3> = BoundedMinHeap::new();
    /// bucket.push_back(Item::new(1, "a", 0, 1, 9)).unwrap();
    /// bucket.push_back(Item::new(2, "b", 0, 1, 1)).unwrap();
    ///
    /// // push_back alone does not fix the heap
    /// assert!(bucket.check_invariants().is_err());
    ///
    /// bucket.swim(2).unwrap();
    /// assert!(bucket.check_invariants().is_ok());
    /// ```
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.slots.len() > C {
            return Err(InvariantError::new(format!(
                "occupied slots {} exceed capacity {C}",
                self.slots.len()
            )));
        }
        for i in 2..=self.slots.len() {
            if self.rank_at(i / 2) > self.rank_at(i) {
                return Err(InvariantError::new(format!(
                    "heap property violated at position {i}: parent {} ranks above child",
                    i / 2
                )));
            }
        }
        Ok(())
    }

    /// Panics if the heap property or capacity bound is violated.
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("{err}");
        }
    }

    #[inline]
    fn rank_at(&self, pos: usize) -> T::Rank {
        self.slots[pos - 1].rank()
    }

    /// Maps a 1-indexed logical position to a storage index, bounds-checked.
    #[inline]
    fn index_of(&self, pos: usize) -> Result<usize, HeapError> {
        if pos == 0 || pos > self.slots.len() {
            return Err(HeapError::IndexOutOfRange {
                pos,
                len: self.slots.len(),
            });
        }
        Ok(pos - 1)
    }
}

impl<T: PriorityRank, const C: usize> Default for BoundedMinHeap<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: PriorityRank, const C: usize> IntoIterator for &'a BoundedMinHeap<T, C> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PriorityRank + fmt::Display, const C: usize> fmt::Display for BoundedMinHeap<T, C> {
    /// Renders occupied slots in storage order: `[a, b, c]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.slots.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("]")
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::item::Item;
    use proptest::prelude::*;

    // =========================================================================
    // Property Tests - Core Invariants
    // =========================================================================

    proptest! {
        /// Property: append + swim keeps the heap property and the bound
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_insert_preserves_invariant(
            demands in prop::collection::vec(0u64..100, 0..20)
        ) {
            let mut heap: BoundedMinHeap<Item, 5> = BoundedMinHeap::new();

            for (id, demand) in demands.into_iter().enumerate() {
                if heap.is_full() {
                    break;
                }
                heap.push_back(Item::new(id as u64, "x", 1, 1, demand)).unwrap();
                heap.swim(heap.len()).unwrap();

                prop_assert!(heap.len() <= heap.capacity());
                prop_assert!(heap.check_invariants().is_ok());
            }
        }

        /// Property: the evict-root recipe always removes the minimum rank
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_evict_root_removes_minimum(
            demands in prop::collection::vec(0u64..100, 1..6)
        ) {
            let mut heap: BoundedMinHeap<Item, 5> = BoundedMinHeap::new();

            for (id, demand) in demands.iter().enumerate() {
                heap.push_back(Item::new(id as u64, "x", 1, 1, *demand)).unwrap();
                heap.swim(heap.len()).unwrap();
            }

            let min_rank = heap.iter().map(Item::rank).min().unwrap();

            let len = heap.len();
            heap.swap(1, len).unwrap();
            let evicted = heap.pop_back().unwrap();
            if !heap.is_empty() {
                heap.sink(1).unwrap();
            }

            prop_assert_eq!(evicted.rank(), min_rank);
            prop_assert!(heap.check_invariants().is_ok());
        }

        /// Property: repeated evict-root drains in ascending rank order
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_drain_is_sorted_by_rank(
            demands in prop::collection::vec(0u64..50, 1..6)
        ) {
            let mut heap: BoundedMinHeap<Item, 5> = BoundedMinHeap::new();

            for (id, demand) in demands.iter().enumerate() {
                heap.push_back(Item::new(id as u64, "x", 1, 1, *demand)).unwrap();
                heap.swim(heap.len()).unwrap();
            }

            let mut drained = Vec::new();
            while !heap.is_empty() {
                let len = heap.len();
                heap.swap(1, len).unwrap();
                drained.push(heap.pop_back().unwrap().rank());
                if !heap.is_empty() {
                    heap.sink(1).unwrap();
                }
            }

            let mut sorted = drained.clone();
            sorted.sort();
            prop_assert_eq!(drained, sorted);
        }
    }
}
