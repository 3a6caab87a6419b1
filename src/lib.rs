//! shelfkit: fixed-capacity bucketed inventory storage with heap-based eviction.
//!
//! An inventory store partitioned into `N` buckets, each a bounded binary
//! min-heap of at most `C` items ordered by popularity (demand, then
//! activity staleness). A full bucket makes room by evicting its least
//! popular item — storage never grows.
//!
//! See `DESIGN.md` for internal architecture and invariants.
//!
//! ## Example
//!
//! ```
//! use shelfkit::store::{PurchaseOutcome, StandardStore};
//!
//! let mut store = StandardStore::new();
//! store.add(42, "tissues", 100, 1, 3).unwrap();
//!
//! let outcome = store.purchase(42, 5, 10).unwrap();
//! assert_eq!(outcome, PurchaseOutcome::Completed { remaining_stock: 90 });
//! store.check_invariants().unwrap();
//! ```

pub mod ds;
pub mod error;
pub mod item;
pub mod store;

pub mod prelude;
pub mod traits;
