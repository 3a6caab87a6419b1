//! Inventory item record and its popularity ranking key.
//!
//! ## Key Components
//!
//! - [`Item`]: a mutable record (identity, name, stock, demand, activity
//!   stamps). Pure data holder with no side effects beyond its own fields.
//! - [`PopularityKey`]: the derived ranking key that determines eviction
//!   priority — demand primary, last-activity staleness tie-break, id as the
//!   final tie-break making the order total.
//!
//! ## Popularity Ordering
//!
//! ```text
//!   PopularityKey = (demand, last_activity_day, id), derived Ord
//!
//!   Ascending = least popular first:
//!     lower demand          → sorts earlier → eviction candidate
//!     earlier activity day  → staler        → breaks demand ties
//!     smaller id            → deterministic  → breaks full ties
//! ```
//!
//! A purchase increases demand and refreshes the activity stamp, so the key
//! only ever grows from a purchase — the item can only become *more* popular
//! and move away from the heap root.
//!
//! ## Example Usage
//!
//! ```
//! use shelfkit::item::Item;
//!
//! let mut item = Item::new(42, "tissues", 100, 1, 3);
//! assert_eq!(item.stock(), 100);
//! assert_eq!(item.insertion_day(), 1);
//!
//! // A purchase of 5 units on day 7
//! item.set_last_activity_day(7);
//! item.update_stock(-5);
//! item.update_demand(5);
//!
//! assert_eq!(item.stock(), 95);
//! assert_eq!(item.demand(), 8);
//! assert_eq!(item.last_activity_day(), 7);
//! ```

use std::fmt;

use crate::traits::PriorityRank;

/// Identity of an [`Item`], unique across the whole store.
pub type ItemId = u64;

/// Derived eviction-priority key: demand primary, activity-day tie-break,
/// id as final tie-break.
///
/// Derived lexicographic `Ord` gives the ascending-popularity total order:
/// the minimum key is the least popular item (the eviction candidate).
///
/// # Example
///
/// ```
/// use shelfkit::item::PopularityKey;
///
/// let stale = PopularityKey { demand: 3, last_activity_day: 2, id: 9 };
/// let fresh = PopularityKey { demand: 3, last_activity_day: 8, id: 1 };
/// let hot = PopularityKey { demand: 10, last_activity_day: 1, id: 5 };
///
/// assert!(stale < fresh); // same demand, staler activity sorts first
/// assert!(fresh < hot);   // demand dominates
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PopularityKey {
    /// Popularity counter; lower = less popular.
    pub demand: u64,
    /// Day stamp of the last activity; earlier = staler.
    pub last_activity_day: u64,
    /// Unique item identity; makes the ordering total.
    pub id: ItemId,
}

/// A mutable inventory record.
///
/// `id` and `insertion_day` are fixed at creation; `stock`, `demand`, and
/// `last_activity_day` are mutated through the update methods. The item is
/// owned exclusively by the bucket slot holding it.
///
/// # Example
///
/// ```
/// use shelfkit::item::Item;
///
/// let mut item = Item::new(7, "soap", 20, 3, 1);
/// item.update_stock(10);
/// assert_eq!(item.stock(), 30);
///
/// item.update_demand(4);
/// assert_eq!(item.demand(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    id: ItemId,
    name: String,
    stock: u64,
    demand: u64,
    last_activity_day: u64,
    insertion_day: u64,
}

impl Item {
    /// Creates an item on `day` with the given initial stock and demand.
    ///
    /// Both `insertion_day` and `last_activity_day` start at `day`.
    pub fn new(id: ItemId, name: impl Into<String>, stock: u64, day: u64, demand: u64) -> Self {
        Self {
            id,
            name: name.into(),
            stock,
            demand,
            last_activity_day: day,
            insertion_day: day,
        }
    }

    /// Returns the item identity. Never changes after creation.
    #[inline]
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Returns the display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the current stock quantity.
    #[inline]
    pub fn stock(&self) -> u64 {
        self.stock
    }

    /// Returns the popularity counter.
    #[inline]
    pub fn demand(&self) -> u64 {
        self.demand
    }

    /// Returns the day stamp of the most recent activity.
    #[inline]
    pub fn last_activity_day(&self) -> u64 {
        self.last_activity_day
    }

    /// Returns the day the item was created. Never changes.
    #[inline]
    pub fn insertion_day(&self) -> u64 {
        self.insertion_day
    }

    /// Adds `delta` (may be negative) to the stock quantity.
    ///
    /// Callers guarantee the result stays non-negative; the arithmetic
    /// saturates at zero as a fail-safe.
    pub fn update_stock(&mut self, delta: i64) {
        self.stock = self.stock.saturating_add_signed(delta);
    }

    /// Adds `delta` (may be negative) to the popularity counter,
    /// saturating at the `u64` bounds.
    pub fn update_demand(&mut self, delta: i64) {
        self.demand = self.demand.saturating_add_signed(delta);
    }

    /// Removes `amount` units of stock, saturating at zero.
    ///
    /// Unsigned on purpose: a purchase amount may exceed `i64::MAX`, so the
    /// quantity must never round-trip through a signed cast. Callers
    /// guarantee `amount <= stock`; saturation is the fail-safe.
    pub fn deduct_stock(&mut self, amount: u64) {
        self.stock = self.stock.saturating_sub(amount);
    }

    /// Adds `amount` to the popularity counter, saturating at `u64::MAX`.
    ///
    /// Unsigned counterpart of [`update_demand`](Self::update_demand) for
    /// quantities that may exceed `i64::MAX`.
    pub fn add_demand(&mut self, amount: u64) {
        self.demand = self.demand.saturating_add(amount);
    }

    /// Overwrites the last-activity day stamp.
    pub fn set_last_activity_day(&mut self, day: u64) {
        self.last_activity_day = day;
    }

    /// Returns the current eviction-priority key.
    ///
    /// Equivalent to [`PriorityRank::rank`]; provided as an inherent method
    /// so callers don't need the trait in scope.
    #[inline]
    pub fn popularity(&self) -> PopularityKey {
        PopularityKey {
            demand: self.demand,
            last_activity_day: self.last_activity_day,
            id: self.id,
        }
    }
}

impl PriorityRank for Item {
    type Rank = PopularityKey;

    fn rank(&self) -> PopularityKey {
        self.popularity()
    }
}

impl fmt::Display for Item {
    /// Single-line diagnostic rendering, used by the store's bucket listing.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{id: {}, name: {}, stock: {}, demand: {}, day: {}}}",
            self.id, self.name, self.stock, self.demand, self.last_activity_day
        )
    }
}
