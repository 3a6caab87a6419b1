//! Convenience re-exports for common usage.
//!
//! ```
//! use shelfkit::prelude::*;
//!
//! let mut store = StandardStore::new();
//! store.add(1, "tissues", 10, 1, 2).unwrap();
//! assert!(store.contains(1));
//! ```

pub use crate::ds::BoundedMinHeap;
pub use crate::error::{HeapError, InvariantError};
pub use crate::item::{Item, ItemId, PopularityKey};
pub use crate::store::{AddOutcome, Bucket, InventoryStore, PurchaseOutcome, StandardStore};
pub use crate::traits::PriorityRank;
