//! Error types for the shelfkit library.
//!
//! ## Key Components
//!
//! - [`HeapError`]: Returned by the structural heap primitives on
//!   [`BoundedMinHeap`](crate::ds::BoundedMinHeap) when a caller sequences
//!   them incorrectly (positional access outside `[1, len]`, appending to a
//!   full bucket, removing from an empty one).
//! - [`InvariantError`]: Returned when internal data-structure invariants are
//!   violated (`check_invariants` methods).
//!
//! Structural errors indicate a caller-sequencing bug: the orchestrator in
//! [`store::inventory`](crate::store::inventory) frees a slot before every
//! append and bounds every positional access, so a `HeapError` escaping a
//! store operation means the recipe itself is wrong. Domain no-ops (unknown
//! id, insufficient stock) are ordinary outcomes and never surface here.
//!
//! ## Example Usage
//!
//! ```
//! use shelfkit::ds::BoundedMinHeap;
//! use shelfkit::error::HeapError;
//! use shelfkit::item::Item;
//!
//! let mut bucket: BoundedMinHeap<Item, 2> = BoundedMinHeap::new();
//! bucket.push_back(Item::new(1, "tissues", 10, 1, 1)).unwrap();
//! bucket.push_back(Item::new(2, "soap", 5, 1, 2)).unwrap();
//!
//! // Appending past capacity is a structural error, not a silent drop
//! let err = bucket.push_back(Item::new(3, "towels", 3, 1, 3)).unwrap_err();
//! assert_eq!(err, HeapError::CapacityExceeded { capacity: 2 });
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// HeapError
// ---------------------------------------------------------------------------

/// Error returned by the structural primitives of
/// [`BoundedMinHeap`](crate::ds::BoundedMinHeap).
///
/// Every variant signals a sequencing bug in the caller rather than a
/// recoverable runtime condition; the store-level operations are written so
/// that none of them can occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// A positional access (`get`, `swap`, `sink`, `swim`) outside `[1, len]`.
    IndexOutOfRange {
        /// The 1-indexed position that was requested.
        pos: usize,
        /// The number of occupied slots at the time of the access.
        len: usize,
    },

    /// `push_back` called on a bucket that is already at capacity.
    CapacityExceeded {
        /// The fixed capacity of the bucket.
        capacity: usize,
    },

    /// `pop_back` called on an empty bucket.
    Underflow,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::IndexOutOfRange { pos, len } => {
                write!(f, "position {pos} out of range for heap of length {len}")
            },
            HeapError::CapacityExceeded { capacity } => {
                write!(f, "push_back on a full heap (capacity {capacity})")
            },
            HeapError::Underflow => f.write_str("pop_back on an empty heap"),
        }
    }
}

impl std::error::Error for HeapError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal invariants are violated.
///
/// Produced by `check_invariants` methods on
/// [`BoundedMinHeap`](crate::ds::BoundedMinHeap) and
/// [`InventoryStore`](crate::store::InventoryStore). Carries a human-readable
/// description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- HeapError --------------------------------------------------------

    #[test]
    fn heap_error_display_index_out_of_range() {
        let err = HeapError::IndexOutOfRange { pos: 6, len: 5 };
        assert_eq!(
            err.to_string(),
            "position 6 out of range for heap of length 5"
        );
    }

    #[test]
    fn heap_error_display_capacity_exceeded() {
        let err = HeapError::CapacityExceeded { capacity: 5 };
        assert_eq!(err.to_string(), "push_back on a full heap (capacity 5)");
    }

    #[test]
    fn heap_error_display_underflow() {
        assert_eq!(
            HeapError::Underflow.to_string(),
            "pop_back on an empty heap"
        );
    }

    #[test]
    fn heap_error_debug_includes_variant() {
        let dbg = format!("{:?}", HeapError::Underflow);
        assert!(dbg.contains("Underflow"));
    }

    #[test]
    fn heap_error_clone_and_eq() {
        let a = HeapError::CapacityExceeded { capacity: 5 };
        let b = a;
        assert_eq!(a, b);
    }

    #[test]
    fn heap_error_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<HeapError>();
    }

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("heap property violated at position 3");
        assert_eq!(err.to_string(), "heap property violated at position 3");
    }

    #[test]
    fn invariant_message_accessor() {
        let err = InvariantError::new("test");
        assert_eq!(err.message(), "test");
    }

    #[test]
    fn invariant_clone_and_eq() {
        let a = InvariantError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn invariant_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<InvariantError>();
    }
}
