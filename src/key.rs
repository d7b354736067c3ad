//! Key widths accepted by [`IntMap`](crate::IntMap).
//!
//! A key is an already-hashed integer. Zero is reserved to mark an empty
//! slot, so hash functions feeding a map must never produce it (remap to 1).
//! Each width also carries its map's growth policy: the 32-bit and 64-bit
//! maps size their tables with different formulas and load-factor bounds.

use core::fmt::Debug;
use core::hash::Hash;

/// An integer key width together with the growth policy of its map.
///
/// Implemented for `u32` (see [`HashMap32`](crate::HashMap32)) and `u64`
/// (see [`HashMap64`](crate::HashMap64)).
pub trait MapKey: Copy + Eq + Hash + Debug + Default {
    /// The reserved "empty slot" key.
    const EMPTY: Self;

    /// Natural probe position of this key in a table with index mask `mask`.
    fn home(self, mask: usize) -> usize;

    #[inline]
    fn is_empty(self) -> bool {
        self == Self::EMPTY
    }

    /// Whether a table of `cap` slots may hold `count` keys without
    /// breaking the load-factor bound. `cap == 0` means unallocated.
    fn fits(count: usize, cap: usize) -> bool;

    /// Slot count of the table that replaces one of `old_cap` slots
    /// (0 = unallocated) and can hold `reserve` keys, or `None` if the
    /// formula overflows.
    fn grown_capacity(old_cap: usize, reserve: usize) -> Option<usize>;
}
