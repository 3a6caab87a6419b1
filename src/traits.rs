//! # Ranking Trait
//!
//! This module defines the single comparator seam between the bucket
//! structure and the eviction policy.
//!
//! ## Design
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                        SEPARATION OF CONCERNS                    │
//!   │                                                                  │
//!   │   BoundedMinHeap<T, C>          InventoryStore<N, C>             │
//!   │   ──────────────────────        ─────────────────────            │
//!   │   maintains heap order          owns the eviction policy         │
//!   │   through T::rank() only        (evict root = minimum rank)      │
//!   │                                                                  │
//!   │   Item::rank() → PopularityKey { demand, last_activity_day, id } │
//!   │                                                                  │
//!   │   Ascending order: lower demand sorts first (least popular),     │
//!   │   earlier activity breaks ties, id makes the order total.        │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The heap never inspects item fields directly, and every call site that
//! reasons about ordering — eviction picking the root, `purchase` re-sifting
//! after a demand change, `delete`'s two-directional fix-up — goes through
//! the same `rank()`. There is exactly one ordering to keep consistent.

/// Types that expose a total eviction-priority ordering.
///
/// [`BoundedMinHeap`](crate::ds::BoundedMinHeap) orders its contents by the
/// value returned from [`rank`](Self::rank): the minimum rank sits at the
/// root and is the eviction candidate.
///
/// The rank must be **total** for heap behavior to be deterministic;
/// implementors should fold a unique discriminant (such as an id) into the
/// rank when the primary keys can tie.
///
/// # Example
///
/// ```
/// use shelfkit::traits::PriorityRank;
///
/// struct Job {
///     id: u64,
///     deadline: u64,
/// }
///
/// impl PriorityRank for Job {
///     type Rank = (u64, u64);
///
///     fn rank(&self) -> Self::Rank {
///         (self.deadline, self.id)
///     }
/// }
///
/// let a = Job { id: 1, deadline: 10 };
/// let b = Job { id: 2, deadline: 10 };
/// assert!(a.rank() < b.rank()); // id breaks the tie
/// ```
pub trait PriorityRank {
    /// The ordering key. Smaller ranks sort toward the heap root.
    type Rank: Ord;

    /// Returns the current eviction-priority rank.
    ///
    /// Mutating state that feeds into the rank (demand, activity stamps)
    /// invalidates the position of the value inside any containing heap;
    /// the caller is responsible for re-sifting afterwards.
    fn rank(&self) -> Self::Rank;
}
