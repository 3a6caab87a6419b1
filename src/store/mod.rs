//! Store orchestration: routing, eviction recipes, and domain operations.

pub mod inventory;

pub use inventory::{AddOutcome, Bucket, InventoryStore, PurchaseOutcome, StandardStore};
