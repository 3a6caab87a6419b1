//! # Bucketed Inventory Store
//!
//! The orchestrator: routes each item id to one of `N` buckets and composes
//! the raw [`BoundedMinHeap`] primitives into the domain operations —
//! add-with-eviction, restock, arbitrary delete, purchase, and the
//! overflow-redistributing add.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────────┐
//! │                     InventoryStore<N=10, C=5>                            │
//! │                                                                          │
//! │   route(id) = id mod N                                                   │
//! │       │                                                                  │
//! │       ▼                                                                  │
//! │   ┌─────────┬─────────┬─────────┬───────┬─────────┐                      │
//! │   │ bucket 0│ bucket 1│ bucket 2│  ...  │ bucket 9│  each a bounded      │
//! │   │ ≤ 5 items         │         │       │         │  min-heap over       │
//! │   └─────────┴─────────┴─────────┴───────┴─────────┘  PopularityKey       │
//! │                                                                          │
//! │   locations: FxHashMap<ItemId, bucket index>                             │
//! │     (side index: under the redistributing policy an item may not         │
//! │      live in its home bucket — the store, not the bucket, knows where)   │
//! └──────────────────────────────────────────────────────────────────────────┘
//!
//! Eviction recipe (full bucket)          Insert recipe
//! ─────────────────────────────          ─────────────
//!   swap(1, len)      root → last          push_back(item)
//!   pop_back()        drop least popular   swim(len)
//!   sink(1)           re-fix downward
//! ```
//!
//! ## Policies
//!
//! - **Plain add** ([`add`](InventoryStore::add)): a full home bucket evicts
//!   its root (the least popular item) to make room. Locality is preserved:
//!   an id always lives at `route(id)`.
//! - **Redistributing add**
//!   ([`add_redistributing`](InventoryStore::add_redistributing)): a full
//!   home bucket is not evicted while any bucket in the store has a free
//!   slot; the item is placed in the first free bucket scanning from
//!   `(home + 1) mod N`. Only a completely full store falls back to
//!   evict-then-insert at home. Trades locality for fewer evictions; the
//!   `locations` side index keeps lookups O(C) either way.
//!
//! ## Key Components
//!
//! | Component   | Type                           | Purpose                      |
//! |-------------|--------------------------------|------------------------------|
//! | `buckets`   | `[BoundedMinHeap<Item, C>; N]` | Fixed partitioned storage    |
//! | `locations` | `FxHashMap<ItemId, usize>`     | id → actual bucket index     |
//!
//! ## Error model
//!
//! Domain no-ops are ordinary outcomes: unknown ids make `restock` return
//! `false`, `delete` return `None`, and `purchase` return
//! [`PurchaseOutcome::NotFound`]; insufficient stock rejects the purchase
//! with no mutation. [`HeapError`] is reserved for sequencing bugs in the
//! recipes themselves and is propagated, never swallowed.
//!
//! ## Example Usage
//!
//! ```
//! use shelfkit::store::{AddOutcome, PurchaseOutcome, StandardStore};
//!
//! let mut store = StandardStore::new();
//!
//! store.add(1, "tissues", 100, 1, 2).unwrap();
//! store.add(11, "soap", 50, 1, 5).unwrap();
//!
//! // Both route to bucket 1 (id mod 10)
//! assert_eq!(store.route(1), 1);
//! assert_eq!(store.route(11), 1);
//!
//! // Purchase 3 units of item 1 on day 4
//! let outcome = store.purchase(1, 4, 3).unwrap();
//! assert_eq!(outcome, PurchaseOutcome::Completed { remaining_stock: 97 });
//!
//! // Unknown ids are observable no-ops, not errors
//! assert_eq!(store.purchase(99, 4, 1).unwrap(), PurchaseOutcome::NotFound);
//! assert!(!store.restock(99, 10).unwrap());
//!
//! // Duplicate ids are rejected to keep store-wide uniqueness
//! assert_eq!(store.add(1, "dup", 1, 1, 1).unwrap(), AddOutcome::Duplicate);
//! ```

use std::fmt;

use rustc_hash::FxHashMap;

use crate::ds::BoundedMinHeap;
use crate::error::{HeapError, InvariantError};
use crate::item::{Item, ItemId};

/// A fixed-capacity bucket of items, ordered by popularity.
pub type Bucket<const C: usize> = BoundedMinHeap<Item, C>;

/// The reference configuration: 10 buckets of 5 slots each.
pub type StandardStore = InventoryStore<10, 5>;

/// Result of an add operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The item was placed in `bucket` without evicting anything.
    Inserted {
        /// Index of the bucket the item landed in (may differ from the home
        /// bucket under the redistributing policy).
        bucket: usize,
    },

    /// The bucket was full: its least popular item was evicted to make room.
    Evicted {
        /// Index of the bucket the item landed in.
        bucket: usize,
        /// The item that was removed.
        evicted: Item,
    },

    /// An item with this id already exists; nothing was mutated.
    Duplicate,
}

/// Result of a purchase operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOutcome {
    /// The purchase went through: stock reduced, demand and activity updated.
    Completed {
        /// Stock remaining after the purchase (may be exactly zero).
        remaining_stock: u64,
    },

    /// The requested amount exceeds available stock; nothing was mutated.
    InsufficientStock {
        /// Stock available at the time of the request.
        available: u64,
    },

    /// No item with the requested id exists.
    NotFound,
}

/// Fixed-capacity inventory store: `N` buckets of `C` slots each.
///
/// Items are routed by `id mod N`; each bucket is a bounded min-heap whose
/// root is the bucket's least popular item. Total capacity is `N * C` and
/// never grows — a full bucket makes room by evicting, not reallocating.
///
/// Single-owner: no internal synchronization. An integrating system that
/// needs multi-writer access must serialize calls externally.
#[derive(Debug, Clone)]
pub struct InventoryStore<const N: usize, const C: usize> {
    buckets: [Bucket<C>; N],
    // id → actual bucket index. Authoritative for "which bucket", not for
    // "which position" — positions shift on every sift.
    locations: FxHashMap<ItemId, usize>,
}

impl<const N: usize, const C: usize> InventoryStore<N, C> {
    /// Creates a store with `N` empty buckets.
    ///
    /// # Example
    ///
    /// ```
    /// use shelfkit::store::StandardStore;
    ///
    /// let store = StandardStore::new();
    /// assert!(store.is_empty());
    /// assert_eq!(store.bucket_count(), 10);
    /// assert_eq!(store.capacity(), 50);
    /// ```
    pub fn new() -> Self {
        const {
            assert!(N > 0, "store must have at least one bucket");
            assert!(C > 0, "buckets must hold at least one item");
        }
        Self {
            buckets: std::array::from_fn(|_| BoundedMinHeap::new()),
            locations: FxHashMap::default(),
        }
    }

    /// Maps an id to its home bucket index: `id mod N`.
    ///
    /// The plain policies store the item exactly here; the redistributing
    /// policy uses it only as the starting point of its scan.
    #[inline]
    pub fn route(&self, id: ItemId) -> usize {
        (id % N as u64) as usize
    }

    /// Number of buckets (`N`).
    #[inline]
    pub const fn bucket_count(&self) -> usize {
        N
    }

    /// Per-bucket slot capacity (`C`).
    #[inline]
    pub const fn bucket_capacity(&self) -> usize {
        C
    }

    /// Total slot capacity across all buckets (`N * C`).
    #[inline]
    pub const fn capacity(&self) -> usize {
        N * C
    }

    /// Number of live items across all buckets.
    #[inline]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Returns `true` if no bucket holds any item.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Returns `true` if an item with `id` is currently stored.
    #[inline]
    pub fn contains(&self, id: ItemId) -> bool {
        self.locations.contains_key(&id)
    }

    /// Read-only inspection accessor for the bucket array.
    ///
    /// Intended for diagnostics and external verification; the structure
    /// must only be mutated through the store's operations.
    pub fn buckets(&self) -> &[Bucket<C>; N] {
        &self.buckets
    }

    /// Returns the item with `id`, or `None` if it is not stored.
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        let (b, pos) = self.locate(id).ok().flatten()?;
        self.buckets[b].get(pos).ok()
    }

    /// Adds an item under the plain policy: a full home bucket evicts its
    /// least popular item first.
    ///
    /// Returns [`AddOutcome::Evicted`] with the displaced item when the home
    /// bucket was full, [`AddOutcome::Duplicate`] (no mutation) when the id
    /// is already stored.
    ///
    /// # Example
    ///
    /// ```
    /// use shelfkit::store::{AddOutcome, InventoryStore};
    ///
    /// let mut store: InventoryStore<10, 2> = InventoryStore::new();
    /// store.add(1, "a", 1, 1, 1).unwrap();
    /// store.add(11, "b", 1, 1, 2).unwrap();
    ///
    /// // Bucket 1 is full; the lowest-demand item (id 1) is evicted
    /// let outcome = store.add(21, "c", 1, 1, 9).unwrap();
    /// match outcome {
    ///     AddOutcome::Evicted { bucket, evicted } => {
    ///         assert_eq!(bucket, 1);
    ///         assert_eq!(evicted.id(), 1);
    ///     },
    ///     other => panic!("expected eviction, got {other:?}"),
    /// }
    /// assert!(!store.contains(1));
    /// ```
    pub fn add(
        &mut self,
        id: ItemId,
        name: impl Into<String>,
        stock: u64,
        day: u64,
        demand: u64,
    ) -> Result<AddOutcome, HeapError> {
        if self.locations.contains_key(&id) {
            return Ok(AddOutcome::Duplicate);
        }
        let b = self.route(id);
        let item = Item::new(id, name, stock, day, demand);

        if self.buckets[b].is_full() {
            let evicted = self.evict_root(b)?;
            self.place(b, item)?;
            Ok(AddOutcome::Evicted { bucket: b, evicted })
        } else {
            self.place(b, item)?;
            Ok(AddOutcome::Inserted { bucket: b })
        }
    }

    /// Adds an item under the overflow-redistributing policy: empty slots
    /// anywhere in the store are filled before anything is evicted.
    ///
    /// A full home bucket triggers a wrapping scan from `(home + 1) mod N`
    /// for the first bucket with free capacity. Only when every bucket is
    /// full does this fall back to the plain evict-then-insert recipe at the
    /// home bucket.
    ///
    /// # Example
    ///
    /// ```
    /// use shelfkit::store::{AddOutcome, InventoryStore};
    ///
    /// let mut store: InventoryStore<3, 1> = InventoryStore::new();
    /// store.add(0, "a", 1, 1, 1).unwrap();
    ///
    /// // Home bucket 0 is full; the item overflows into bucket 1
    /// let outcome = store.add_redistributing(3, "b", 1, 1, 5).unwrap();
    /// assert_eq!(outcome, AddOutcome::Inserted { bucket: 1 });
    ///
    /// // Lookups still find the redirected item
    /// assert_eq!(store.get(3).map(|item| item.name()), Some("b"));
    /// ```
    pub fn add_redistributing(
        &mut self,
        id: ItemId,
        name: impl Into<String>,
        stock: u64,
        day: u64,
        demand: u64,
    ) -> Result<AddOutcome, HeapError> {
        if self.locations.contains_key(&id) {
            return Ok(AddOutcome::Duplicate);
        }
        let b = self.route(id);
        let item = Item::new(id, name, stock, day, demand);

        if !self.buckets[b].is_full() {
            self.place(b, item)?;
            return Ok(AddOutcome::Inserted { bucket: b });
        }

        for step in 1..N {
            let i = (b + step) % N;
            if !self.buckets[i].is_full() {
                self.place(i, item)?;
                return Ok(AddOutcome::Inserted { bucket: i });
            }
        }

        // Every bucket is full: evict at home, same as the plain policy.
        let evicted = self.evict_root(b)?;
        self.place(b, item)?;
        Ok(AddOutcome::Evicted { bucket: b, evicted })
    }

    /// Updates the stock of item `id` by `amount` (may be negative).
    ///
    /// Returns `false` (no mutation) when the id is unknown. Stock is not
    /// part of the popularity ordering, so no re-sift happens and no item
    /// changes position.
    pub fn restock(&mut self, id: ItemId, amount: i64) -> Result<bool, HeapError> {
        let Some((b, pos)) = self.locate(id)? else {
            return Ok(false);
        };
        self.buckets[b].get_mut(pos)?.update_stock(amount);
        Ok(true)
    }

    /// Deletes the item with `id`, returning it, or `None` if unknown.
    ///
    /// The vacated position is refilled by the former last element and
    /// re-sifted in whichever direction the replacement requires: swim
    /// first, and only if that made no move, sink. O(log C).
    pub fn delete(&mut self, id: ItemId) -> Result<Option<Item>, HeapError> {
        let Some((b, pos)) = self.locate(id)? else {
            return Ok(None);
        };
        let bucket = &mut self.buckets[b];
        let len = bucket.len();
        bucket.swap(pos, len)?;
        let removed = bucket.pop_back()?;
        if pos <= bucket.len() {
            Self::resift(bucket, pos)?;
        }
        self.locations.remove(&id);
        Ok(Some(removed))
    }

    /// Simulates a purchase of `amount` units of item `id` on `day`.
    ///
    /// On success the activity stamp is set to `day`, stock decreases by
    /// `amount` (exactly zero is allowed), demand increases by `amount`,
    /// and the item is re-sifted. A request exceeding available stock is
    /// rejected with no mutation; an unknown id is a no-op.
    pub fn purchase(
        &mut self,
        id: ItemId,
        day: u64,
        amount: u64,
    ) -> Result<PurchaseOutcome, HeapError> {
        let Some((b, pos)) = self.locate(id)? else {
            return Ok(PurchaseOutcome::NotFound);
        };
        let bucket = &mut self.buckets[b];
        let item = bucket.get_mut(pos)?;

        if item.stock() < amount {
            return Ok(PurchaseOutcome::InsufficientStock {
                available: item.stock(),
            });
        }

        // Unsigned arithmetic throughout: `amount` may exceed i64::MAX, so
        // no signed cast. The guard above proves stock >= amount.
        item.set_last_activity_day(day);
        item.deduct_stock(amount);
        item.add_demand(amount);
        let remaining_stock = item.stock();

        // Demand grew and the stamp moved forward: the key only increased,
        // so the swim leg of resift is a no-op and the sink leg does the work.
        Self::resift(bucket, pos)?;
        Ok(PurchaseOutcome::Completed { remaining_stock })
    }

    /// Verifies every store-wide invariant.
    ///
    /// Checks the heap property and capacity bound per bucket, that every
    /// stored item appears in the side index at its actual bucket, and that
    /// the index holds no phantom entries (uniqueness follows: one index
    /// entry per id, one slot per index entry).
    ///
    /// # Errors
    ///
    /// [`InvariantError`] describing the first violation found.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let mut live = 0usize;
        for (b, bucket) in self.buckets.iter().enumerate() {
            bucket
                .check_invariants()
                .map_err(|err| InvariantError::new(format!("bucket {b}: {}", err.message())))?;
            for item in bucket {
                live += 1;
                match self.locations.get(&item.id()) {
                    Some(&indexed) if indexed == b => {},
                    Some(&indexed) => {
                        return Err(InvariantError::new(format!(
                            "item {} stored in bucket {b} but indexed at bucket {indexed}",
                            item.id()
                        )));
                    },
                    None => {
                        return Err(InvariantError::new(format!(
                            "item {} stored in bucket {b} but missing from the index",
                            item.id()
                        )));
                    },
                }
            }
        }
        if live != self.locations.len() {
            return Err(InvariantError::new(format!(
                "index holds {} entries but buckets hold {live} items",
                self.locations.len()
            )));
        }
        Ok(())
    }

    /// Panics if any store-wide invariant is violated.
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("{err}");
        }
    }

    /// Evicts the least popular item from bucket `b` (must be non-empty):
    /// swap root with last, drop last, sink the new root.
    fn evict_root(&mut self, b: usize) -> Result<Item, HeapError> {
        let bucket = &mut self.buckets[b];
        let len = bucket.len();
        bucket.swap(1, len)?;
        let evicted = bucket.pop_back()?;
        if !bucket.is_empty() {
            bucket.sink(1)?;
        }
        self.locations.remove(&evicted.id());
        Ok(evicted)
    }

    /// Places `item` into bucket `b` (must have a free slot): append, swim,
    /// record the location.
    fn place(&mut self, b: usize, item: Item) -> Result<(), HeapError> {
        let id = item.id();
        let bucket = &mut self.buckets[b];
        bucket.push_back(item)?;
        let len = bucket.len();
        bucket.swim(len)?;
        self.locations.insert(id, b);
        Ok(())
    }

    /// Two-directional fix-up at `pos`: swim, and only if the value did not
    /// move, sink. Covers a replacement that must move either way.
    fn resift(bucket: &mut Bucket<C>, pos: usize) -> Result<usize, HeapError> {
        let settled = bucket.swim(pos)?;
        if settled == pos {
            bucket.sink(pos)
        } else {
            Ok(settled)
        }
    }

    /// Finds the bucket and 1-indexed position of `id` via the side index
    /// plus a linear scan of the occupied slots (O(C), intentional — the
    /// capacity is tiny).
    fn locate(&self, id: ItemId) -> Result<Option<(usize, usize)>, HeapError> {
        let Some(&b) = self.locations.get(&id) else {
            return Ok(None);
        };
        let bucket = &self.buckets[b];
        for pos in 1..=bucket.len() {
            if bucket.get(pos)?.id() == id {
                return Ok(Some((b, pos)));
            }
        }
        Ok(None)
    }
}

impl<const N: usize, const C: usize> Default for InventoryStore<N, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize, const C: usize> fmt::Display for InventoryStore<N, C> {
    /// Multi-line diagnostic listing: one bucket per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[")?;
        for bucket in &self.buckets {
            writeln!(f, "\t{bucket}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Five items that all route to bucket 1, demand 1..=5.
    fn fill_bucket_one(store: &mut StandardStore) {
        for (id, demand) in [(1, 1), (11, 2), (21, 3), (31, 4), (41, 5)] {
            let outcome = store.add(id, format!("item-{id}"), 10, 1, demand).unwrap();
            assert_eq!(outcome, AddOutcome::Inserted { bucket: 1 });
        }
    }

    #[test]
    fn route_is_id_mod_n() {
        let store = StandardStore::new();
        assert_eq!(store.route(0), 0);
        assert_eq!(store.route(7), 7);
        assert_eq!(store.route(41), 1);
        assert_eq!(store.route(10), 0);
    }

    #[test]
    fn full_bucket_evicts_least_popular() {
        let mut store = StandardStore::new();
        fill_bucket_one(&mut store);
        assert_eq!(store.len(), 5);
        assert_eq!(store.buckets()[1].peek().unwrap().id(), 1);

        let outcome = store.add(51, "newcomer", 10, 2, 10).unwrap();
        match outcome {
            AddOutcome::Evicted { bucket, evicted } => {
                assert_eq!(bucket, 1);
                assert_eq!(evicted.id(), 1); // lowest demand goes
            },
            other => panic!("expected eviction, got {other:?}"),
        }

        assert_eq!(store.buckets()[1].len(), 5);
        assert!(!store.contains(1));
        for id in [11, 21, 31, 41, 51] {
            assert!(store.contains(id), "id {id} should have survived");
        }
        store.debug_validate_invariants();
    }

    #[test]
    fn eviction_tie_broken_by_staleness() {
        let mut store: InventoryStore<10, 2> = InventoryStore::new();
        store.add(1, "stale", 1, 1, 3).unwrap();
        store.add(11, "fresh", 1, 8, 3).unwrap();

        let outcome = store.add(21, "new", 1, 9, 9).unwrap();
        match outcome {
            AddOutcome::Evicted { evicted, .. } => assert_eq!(evicted.id(), 1),
            other => panic!("expected eviction, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_add_mutates_nothing() {
        let mut store = StandardStore::new();
        store.add(1, "original", 10, 1, 1).unwrap();

        assert_eq!(store.add(1, "imposter", 99, 9, 9).unwrap(), AddOutcome::Duplicate);
        assert_eq!(
            store.add_redistributing(1, "imposter", 99, 9, 9).unwrap(),
            AddOutcome::Duplicate
        );
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(1).unwrap().name(), "original");
    }

    #[test]
    fn restock_updates_stock_only() {
        let mut store = StandardStore::new();
        fill_bucket_one(&mut store);

        let before: Vec<u64> = store.buckets()[1].iter().map(Item::id).collect();
        assert!(store.restock(21, 15).unwrap());
        let after: Vec<u64> = store.buckets()[1].iter().map(Item::id).collect();

        assert_eq!(store.get(21).unwrap().stock(), 25);
        assert_eq!(before, after); // ordering untouched
        assert_eq!(store.buckets()[1].len(), 5);
    }

    #[test]
    fn restock_negative_amount() {
        let mut store = StandardStore::new();
        store.add(1, "a", 10, 1, 1).unwrap();
        assert!(store.restock(1, -4).unwrap());
        assert_eq!(store.get(1).unwrap().stock(), 6);
    }

    #[test]
    fn restock_unknown_id_is_noop() {
        let mut store = StandardStore::new();
        assert!(!store.restock(404, 5).unwrap());
    }

    #[test]
    fn purchase_updates_all_three_fields() {
        let mut store = StandardStore::new();
        fill_bucket_one(&mut store);

        let outcome = store.purchase(21, 10, 2).unwrap();
        assert_eq!(outcome, PurchaseOutcome::Completed { remaining_stock: 8 });

        let item = store.get(21).unwrap();
        assert_eq!(item.stock(), 8);
        assert_eq!(item.demand(), 5);
        assert_eq!(item.last_activity_day(), 10);
        assert_eq!(store.buckets()[1].len(), 5);
        store.debug_validate_invariants();
    }

    #[test]
    fn purchase_can_zero_stock_exactly() {
        let mut store = StandardStore::new();
        store.add(1, "a", 4, 1, 1).unwrap();

        let outcome = store.purchase(1, 2, 4).unwrap();
        assert_eq!(outcome, PurchaseOutcome::Completed { remaining_stock: 0 });
        assert_eq!(store.get(1).unwrap().stock(), 0);
    }

    #[test]
    fn purchase_amount_above_i64_max() {
        let mut store = StandardStore::new();
        store.add(1, "bulk", u64::MAX, 1, 0).unwrap();

        // 2^63 and beyond would wrap through any i64 round-trip
        let amount = (1u64 << 63) + 5;
        let outcome = store.purchase(1, 2, amount).unwrap();
        assert_eq!(
            outcome,
            PurchaseOutcome::Completed {
                remaining_stock: u64::MAX - amount
            }
        );

        let item = store.get(1).unwrap();
        assert_eq!(item.stock(), u64::MAX - amount);
        assert_eq!(item.demand(), amount);
        store.debug_validate_invariants();
    }

    #[test]
    fn purchase_insufficient_stock_rejected_without_mutation() {
        let mut store = StandardStore::new();
        store.add(1, "a", 3, 1, 2).unwrap();

        let outcome = store.purchase(1, 9, 4).unwrap();
        assert_eq!(outcome, PurchaseOutcome::InsufficientStock { available: 3 });

        let item = store.get(1).unwrap();
        assert_eq!(item.stock(), 3);
        assert_eq!(item.demand(), 2);
        assert_eq!(item.last_activity_day(), 1);
    }

    #[test]
    fn purchase_unknown_id_not_found() {
        let mut store = StandardStore::new();
        assert_eq!(store.purchase(404, 1, 1).unwrap(), PurchaseOutcome::NotFound);
    }

    #[test]
    fn purchase_resifts_the_touched_item() {
        let mut store = StandardStore::new();
        fill_bucket_one(&mut store);

        // Root is id 1 (demand 1); buy enough to outrank everything
        store.purchase(1, 5, 9).unwrap();
        assert_ne!(store.buckets()[1].peek().unwrap().id(), 1);
        store.debug_validate_invariants();
    }

    #[test]
    fn delete_removes_and_restores_invariant() {
        let mut store = StandardStore::new();
        fill_bucket_one(&mut store);

        let removed = store.delete(31).unwrap().unwrap();
        assert_eq!(removed.id(), 31);
        assert_eq!(store.buckets()[1].len(), 4);
        assert!(!store.contains(31));
        store.debug_validate_invariants();
    }

    #[test]
    fn delete_unknown_id_is_noop() {
        let mut store = StandardStore::new();
        fill_bucket_one(&mut store);
        assert_eq!(store.delete(404).unwrap(), None);
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn delete_last_remaining_item() {
        let mut store = StandardStore::new();
        store.add(1, "only", 1, 1, 1).unwrap();
        assert_eq!(store.delete(1).unwrap().unwrap().id(), 1);
        assert!(store.is_empty());
        store.debug_validate_invariants();
    }

    #[test]
    fn delete_interior_replacement_must_swim() {
        // Shape a 7-slot bucket so the former last element must move UP
        // when it replaces a deleted interior position. Insertion order
        // builds the array [1, 8, 2, 9, 10, 3, 4] (demands, positions 1-7).
        let mut store: InventoryStore<10, 7> = InventoryStore::new();
        for (id, demand) in [(1, 1), (11, 8), (21, 2), (31, 9), (41, 10), (51, 3), (61, 4)] {
            store.add(id, format!("item-{id}"), 1, 1, demand).unwrap();
        }

        // Deleting id 31 (position 4, demand 9) pulls id 61 (demand 4, the
        // last slot, from the *other* subtree) into position 4, where it
        // ranks below its new parent (demand 8). A sink-only recipe would
        // leave the heap property violated there.
        store.delete(31).unwrap().unwrap();
        store.debug_validate_invariants();
        assert_eq!(store.buckets()[1].len(), 6);
    }

    #[test]
    fn redistributing_add_prefers_free_buckets() {
        let mut store: InventoryStore<4, 1> = InventoryStore::new();
        store.add(2, "home", 1, 1, 1).unwrap();

        // Home bucket 2 is full → lands in bucket 3
        assert_eq!(
            store.add_redistributing(6, "spill", 1, 1, 2).unwrap(),
            AddOutcome::Inserted { bucket: 3 }
        );
        // Bucket 3 now full too → wraps to bucket 0
        assert_eq!(
            store.add_redistributing(10, "wrap", 1, 1, 3).unwrap(),
            AddOutcome::Inserted { bucket: 0 }
        );
        store.debug_validate_invariants();
    }

    #[test]
    fn redistributing_add_full_store_falls_back_to_eviction() {
        let mut store: InventoryStore<2, 1> = InventoryStore::new();
        store.add(0, "a", 1, 1, 5).unwrap();
        store.add(1, "b", 1, 1, 5).unwrap();

        let outcome = store.add_redistributing(2, "c", 1, 1, 9).unwrap();
        match outcome {
            AddOutcome::Evicted { bucket, evicted } => {
                assert_eq!(bucket, 0); // eviction happens at home
                assert_eq!(evicted.id(), 0);
            },
            other => panic!("expected eviction, got {other:?}"),
        }
        assert_eq!(store.len(), 2);
        store.debug_validate_invariants();
    }

    #[test]
    fn lookups_follow_redirected_items() {
        let mut store: InventoryStore<3, 1> = InventoryStore::new();
        store.add(0, "home", 5, 1, 1).unwrap();
        store.add_redistributing(3, "spill", 5, 1, 2).unwrap();

        // Item 3's home is bucket 0 but it lives in bucket 1
        assert_eq!(store.route(3), 0);
        assert!(store.restock(3, 5).unwrap());
        assert_eq!(store.get(3).unwrap().stock(), 10);

        let outcome = store.purchase(3, 4, 2).unwrap();
        assert_eq!(outcome, PurchaseOutcome::Completed { remaining_stock: 8 });

        assert_eq!(store.delete(3).unwrap().unwrap().id(), 3);
        assert!(!store.contains(3));
        store.debug_validate_invariants();
    }

    #[test]
    fn display_lists_every_bucket() {
        let mut store: InventoryStore<2, 1> = InventoryStore::new();
        store.add(0, "a", 1, 1, 1).unwrap();

        let rendered = store.to_string();
        assert!(rendered.starts_with("[\n"));
        assert!(rendered.ends_with("]"));
        assert_eq!(rendered.lines().count(), 4); // "[", two buckets, "]"
        assert!(rendered.contains("name: a"));
    }

    #[test]
    fn check_invariants_reports_index_drift() {
        let mut store = StandardStore::new();
        store.add(1, "a", 1, 1, 1).unwrap();
        store.locations.insert(999, 0); // phantom entry

        let err = store.check_invariants().unwrap_err();
        assert!(err.message().contains("entries"));
    }
}
