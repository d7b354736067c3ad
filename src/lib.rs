//! tiny-collections: a growable array and open-addressing maps keyed by
//! pre-hashed integers.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: two small container primitives whose memory behavior is fully
//!   visible to the caller: when they allocate, how much, and what a
//!   failed allocation leaves behind.
//! - Layers:
//!   - `layout`: a `Header` (len, cap) next to an owned region, plus
//!     fallible region allocation that detects size overflow.
//!   - `Array<T>`: contiguous sequence over one `Block`.
//!   - `RawTable<K, V>`: parallel key/value regions with linear probing
//!     and back-shift deletion. Never grows on its own.
//!   - `IntMap<K, V>`: owns an optional `RawTable` and a null value;
//!     decides when to grow. `HashMap32<V>` and `HashMap64<V>` are
//!     `IntMap` over `u32` and `u64` keys; the `MapKey` impl of each width
//!     carries its sizing rules.
//!
//! Constraints
//! - Keys are already hashes. The maps never hash or compare anything but
//!   integers; key zero is reserved for empty slots and is never stored.
//! - Colliding hashes are the same key. Callers needing exact keys must
//!   keep them elsewhere.
//! - No operation aborts on allocation failure. Growth builds a complete
//!   replacement before touching the old storage, so `Err` means nothing
//!   changed.
//! - Single-threaded values: no interior locking. `Send`/`Sync` follow
//!   from `T`/`V` as for `Vec`.
//!
//! Growth
//! - Array: 16 on first allocation, then double, rounded up to the
//!   requested reserve.
//! - HashMap32: `max = 15`, then `max * 2 + 1` until `max / 2 > reserve`;
//!   holds `n` keys while `n * 2 <= max`.
//! - HashMap64: 16, then double until `cap / 2 > reserve`; holds `n`
//!   keys while `n * 2 < cap`.
//! - Both maps reserve room for `len + 1` keys before claiming a slot, so
//!   the bound holds after every call, not just before it.
//!
//! Deletion
//! - Removing a key empties its slot and back-shifts the rest of the
//!   cluster: every later entry whose probe path crosses the hole moves
//!   into it. There are no tombstones and probe lengths do not degrade
//!   under churn.
//!
//! Notes and non-goals
//! - No shrinking: `clear` keeps capacity, only `free` releases it.
//! - Iteration order is slot order and changes on every mutation.
//! - Slot indices returned by `index_of` are invalidated by any insert or
//!   remove.

pub mod array;
pub mod error;
pub mod hash_map32;
pub mod hash_map64;
mod int_map;
mod int_map_proptest;
mod key;
mod layout;
mod raw_table;
#[cfg(feature = "strings")]
pub mod strings;

// Public surface
pub use array::Array;
pub use error::AllocError;
pub use hash_map32::HashMap32;
pub use hash_map64::HashMap64;
pub use int_map::{IntMap, Iter, IterMut};
pub use key::MapKey;
#[cfg(feature = "strings")]
pub use strings::{hash_str32, hash_str64, StrKey};
