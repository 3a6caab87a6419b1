//! Core data structures used by the inventory store.

pub mod bounded_heap;

pub use bounded_heap::BoundedMinHeap;
