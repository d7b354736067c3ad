//! HashMap64: the map keyed by 64-bit hashes.
//!
//! Capacities are plain powers of two: 16 for the first table, doubled on
//! each growth until `capacity / 2` exceeds the reserve. A table may hold
//! `n` keys while `n * 2 < capacity` (strictly), which keeps the load
//! factor below one half.
//!
//! Deletion uses the same back-shift as the 32-bit map, so removing a key
//! never cuts another key's probe path.

use crate::int_map::IntMap;
use crate::key::MapKey;

/// Open-addressing map from a non-zero `u64` hash to `V`.
pub type HashMap64<V> = IntMap<u64, V>;

/// Capacity of the first table.
pub const INITIAL_CAPACITY: usize = 16;

impl MapKey for u64 {
    const EMPTY: Self = 0;

    #[inline]
    fn home(self, mask: usize) -> usize {
        // Truncation on 32-bit targets is fine: only the masked bits matter.
        self as usize & mask
    }

    #[inline]
    fn fits(count: usize, cap: usize) -> bool {
        count.checked_mul(2).map_or(false, |c| c < cap)
    }

    fn grown_capacity(old_cap: usize, reserve: usize) -> Option<usize> {
        let mut cap = match old_cap {
            0 => INITIAL_CAPACITY,
            cap => cap.checked_mul(2)?,
        };
        while !Self::fits(reserve, cap) {
            cap = cap.checked_mul(2)?;
        }
        Some(cap)
    }
}
