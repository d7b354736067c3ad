//! HashMap32: the map keyed by 32-bit hashes.
//!
//! Sizing is expressed through `max`, the highest slot index
//! (`capacity - 1`). The first table has `max = 15`; each growth sets
//! `max = max * 2 + 1` until `max / 2` exceeds the reserve. A table may
//! hold `n` keys while `n * 2 <= max`, so the load factor stays at or
//! below one half and at least one slot is always empty.

use crate::int_map::IntMap;
use crate::key::MapKey;

/// Open-addressing map from a non-zero `u32` hash to `V`.
pub type HashMap32<V> = IntMap<u32, V>;

/// `max` of the first table.
pub const INITIAL_MAX: usize = 15;

impl MapKey for u32 {
    const EMPTY: Self = 0;

    #[inline]
    fn home(self, mask: usize) -> usize {
        self as usize & mask
    }

    #[inline]
    fn fits(count: usize, cap: usize) -> bool {
        cap != 0 && count.checked_mul(2).map_or(false, |c| c <= cap - 1)
    }

    fn grown_capacity(old_cap: usize, reserve: usize) -> Option<usize> {
        let mut max = match old_cap {
            0 => INITIAL_MAX,
            cap => (cap - 1).checked_mul(2)?.checked_add(1)?,
        };
        while max / 2 <= reserve {
            max = max.checked_mul(2)?.checked_add(1)?;
        }
        max.checked_add(1)
    }
}

impl<V> IntMap<u32, V> {
    /// Highest slot index (`capacity - 1`), or 0 when unallocated.
    #[inline]
    pub fn max(&self) -> usize {
        self.capacity().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AllocError;

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    struct Triple {
        a: i32,
        b: i32,
        c: i32,
    }

    const SOME: Triple = Triple { a: 1, b: 2, c: 3 };
    const OTHER: Triple = Triple { a: 500, b: 10, c: 99 };

    /// Invariant: growth follows max = 15, 31, 63, ... and stops at the
    /// first max with max / 2 > reserve.
    #[test]
    fn growth_formula() {
        assert_eq!(u32::grown_capacity(0, 0), Some(16));
        assert_eq!(u32::grown_capacity(0, 30), Some(64));
        assert_eq!(u32::grown_capacity(16, 0), Some(32));
        assert_eq!(u32::grown_capacity(0, 1000), Some(2048));
        assert_eq!(u32::grown_capacity(0, usize::MAX / 2), None);
    }

    /// Invariant: `n` keys fit while `n * 2 <= max`.
    #[test]
    fn fit_bound() {
        assert!(!u32::fits(1, 0));
        assert!(u32::fits(7, 16));
        assert!(!u32::fits(8, 16));
        assert!(!u32::fits(usize::MAX, 16));
    }

    /// Invariant: documented capacities: three keys fit in 16 slots,
    /// `fit(30)` gives 64, `try_fit(1000)` gives 2048.
    #[test]
    fn documented_capacities() {
        let mut map: HashMap32<Triple> = HashMap32::new();
        assert_eq!((map.len(), map.capacity(), map.max()), (0, 0, 0));
        map.insert(0x408f_5e13, SOME).unwrap();
        map.insert(0x1e99_b620, OTHER).unwrap();
        map.insert(0x3a75_11f5, SOME).unwrap();
        map.clear();
        assert_eq!((map.len(), map.capacity()), (0, 16));
        map.fit(30);
        assert_eq!((map.len(), map.capacity(), map.max()), (0, 64, 63));

        map.free();
        assert_eq!(map.try_fit(1000), Ok(()));
        assert_eq!((map.len(), map.capacity()), (0, 2048));
    }

    /// Invariant: the load bound `len * 2 <= max` holds after every insert.
    #[test]
    fn load_bound_after_each_insert() {
        let mut map: HashMap32<u32> = HashMap32::new();
        for k in 1..=200u32 {
            map.insert((2 * k + 1).wrapping_mul(0x9e37_79b9), k).unwrap();
            assert!(map.len() * 2 <= map.max(), "len {} max {}", map.len(), map.max());
        }
        assert_eq!(map.len(), 200);
        map.assert_consistent();
    }

    /// Invariant: set/get/has/del round trip; a second delete reports false.
    #[test]
    fn round_trip() {
        let mut map: HashMap32<Triple> = HashMap32::new();
        map.insert(0x1111_1111, SOME).unwrap();
        assert_eq!(*map.get(0x1111_1111), SOME);
        assert!(map.contains_key(0x1111_1111));
        assert!(map.remove(0x1111_1111));
        assert!(!map.contains_key(0x1111_1111));
        assert!(!map.remove(0x1111_1111));
        assert_eq!(map.len(), 0);
    }

    /// Invariant: key zero is always absent, whatever the map holds.
    #[test]
    fn zero_key_is_absent() {
        let mut map: HashMap32<Triple> = HashMap32::new();
        map.set_null_value(Triple { a: -1, b: -1, c: -1 });
        assert!(!map.contains_key(0));
        assert_eq!(map.insert(0, SOME), Ok(()));
        assert_eq!(map.len(), 0);
        map.insert(5, OTHER).unwrap();
        assert!(!map.contains_key(0));
        assert_eq!(map.get(0).a, -1);
        assert!(!map.remove(0));
        assert!(map.slot_mut(0).is_none());
        assert_eq!(map.index_of(0), None);
        assert_eq!(map.len(), 1);
    }

    /// Invariant: a failed try_fit leaves len, capacity, and entries as
    /// they were.
    #[test]
    fn try_fit_failure_is_a_no_op() {
        let mut map: HashMap32<Triple> = HashMap32::new();
        map.try_fit(1000).unwrap();
        map.insert(42, SOME).unwrap();
        let huge = 0x7FFF_0000_0000_0000usize / core::mem::size_of::<Triple>();
        assert!(map.try_fit(huge).is_err());
        assert_eq!(map.try_fit(usize::MAX), Err(AllocError::CapacityOverflow));
        assert_eq!((map.len(), map.capacity()), (1, 2048));
        assert_eq!(*map.get(42), SOME);
    }

    /// Invariant: slot iteration visits each live key exactly once and
    /// `map[i]` is the value of `key_at(i)`.
    #[test]
    fn slot_iteration() {
        let mut map: HashMap32<Triple> = HashMap32::new();
        map.fit(30);
        map.insert(0x1111_1111, SOME).unwrap();
        map.insert(0x2222_2222, OTHER).unwrap();
        let mut found = 0;
        for i in 0..map.capacity() {
            let key = map.key_at(i);
            if key == 0 {
                continue;
            }
            match key {
                0x1111_1111 => assert_eq!(map[i], SOME),
                0x2222_2222 => assert_eq!(map[i], OTHER),
                other => panic!("unexpected key {other:#x}"),
            }
            found += 1;
        }
        assert_eq!(found, 2);
        assert_eq!(map.iter().count(), 2);
        assert_eq!(map.key_at(map.capacity()), 0);
    }
}
