//! tally-collections: counting maps, list maps, slice algebra and lazy
//! combinatorial enumeration.
//!
//! Internal Design:
//!
//! Summary
//! - Layers:
//!   - OrderedHandleMap<K, V, S>: structural map over generational slots
//!     with a hash index and an intrusive insertion-order list. Stable
//!     handles let upper layers find an entry once and then update or
//!     remove it without re-hashing.
//!   - CountingMap<K, S>: positive counters per key. A counter that
//!     reaches zero is removed in the same call; `get` reports 0 for
//!     absent keys.
//!   - ListMap<K, V, S>: a growable `Vec<V>` per key.
//! - Enumeration (`combinations`, `cartesian_product`) and the slice
//!   algebra (`SliceExt`) are free-standing and borrow their input.
//!
//! Constraints
//! - Failing operations leave every structure exactly as before the call.
//! - Counters are `NonZeroUsize`; a zero entry cannot be stored.
//! - Iteration over maps follows first-insertion order of the live keys; a
//!   key removed and added again moves to the back.
//! - Enumerators hold one index per tuple position and emit `Vec<&T>`
//!   views; they keep nothing they have emitted.
//!
//! Hasher and rehashing invariants
//! - Each entry stores a precomputed `u64` hash and indexing always uses
//!   the stored hash; `K: Hash` is never invoked after insertion.
//!
//! Notes and non-goals
//! - No internal locking: mutation takes `&mut self`.
//! - No persistence or I/O. Logging goes through the `log` facade only;
//!   the crate never installs a logger.

pub mod combinatorics;
pub mod counting_map;
pub mod error;
pub mod list_map;
pub mod ordered_map;
pub mod parse;
pub mod sequence;

// Public surface
pub use combinatorics::{
    cartesian_product, combination_count, combinations, CartesianProduct, Combinations,
};
pub use counting_map::CountingMap;
pub use error::{CollectionError, Result};
pub use list_map::ListMap;
pub use parse::split_to_integers;
pub use sequence::SliceExt;
