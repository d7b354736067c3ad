//! RawTable: the probe table behind both integer maps.
//!
//! Two parallel regions of `cap` slots each (keys and values) plus a
//! header. `cap` is always a power of two and probing wraps with
//! `index & (cap - 1)`. A key of zero marks an empty slot, and an empty
//! slot's value is always `V::default()`.
//!
//! Invariants (checked by `assert_consistent` in tests):
//! - `header.len` equals the number of non-empty keys.
//! - At least one slot is empty, so every probe terminates.
//! - No probe path has a hole: for a live key at slot `i`, every slot from
//!   its home position up to `i` is occupied. Deletion restores this by
//!   back-shifting the rest of the cluster, so there are no tombstones.
//!
//! The table itself never grows; `IntMap` decides when to build a larger
//! one and moves entries over with `drain_into`.

use crate::error::AllocError;
use crate::key::MapKey;
use crate::layout::{try_region_with, Header};
use core::mem;

pub(crate) struct RawTable<K, V> {
    header: Header,
    keys: Vec<K>,
    values: Vec<V>,
}

impl<K: MapKey, V> RawTable<K, V> {
    /// An empty table of `cap` slots.
    pub(crate) fn try_with_capacity(cap: usize) -> Result<Self, AllocError>
    where
        V: Default,
    {
        debug_assert!(cap.is_power_of_two());
        let keys = try_region_with(cap, || K::EMPTY)?;
        let values = try_region_with(cap, V::default)?;
        Ok(Self {
            header: Header { len: 0, cap },
            keys,
            values,
        })
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.header.len
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.header.cap
    }

    #[inline]
    fn mask(&self) -> usize {
        self.header.cap - 1
    }

    #[inline]
    pub(crate) fn keys(&self) -> &[K] {
        &self.keys
    }

    #[inline]
    pub(crate) fn values(&self) -> &[V] {
        &self.values
    }

    #[inline]
    pub(crate) fn values_mut(&mut self) -> &mut [V] {
        &mut self.values
    }

    #[inline]
    pub(crate) fn slots_mut(&mut self) -> (&[K], &mut [V]) {
        (&self.keys, &mut self.values)
    }

    /// `Ok(slot)` holding `key`, or `Err(slot)` of the empty slot that ends
    /// its probe path.
    fn probe(&self, key: K) -> Result<usize, usize> {
        debug_assert!(!key.is_empty());
        let mask = self.mask();
        let mut i = key.home(mask);
        loop {
            let k = self.keys[i];
            if k == key {
                return Ok(i);
            }
            if k.is_empty() {
                return Err(i);
            }
            i = (i + 1) & mask;
        }
    }

    #[inline]
    pub(crate) fn find(&self, key: K) -> Option<usize> {
        self.probe(key).ok()
    }

    /// Slot of `key`, claiming the end of its probe path if absent. The
    /// returned flag is true when the slot was claimed. The caller must
    /// have made room for one more key.
    pub(crate) fn find_or_claim(&mut self, key: K) -> (usize, bool) {
        match self.probe(key) {
            Ok(i) => (i, false),
            Err(i) => {
                self.keys[i] = key;
                self.header.len += 1;
                debug_assert!(K::fits(self.header.len, self.header.cap));
                (i, true)
            }
        }
    }

    /// Remove `key` and return its value, back-shifting the rest of its
    /// cluster so no probe path is left with a hole.
    pub(crate) fn remove(&mut self, key: K) -> Option<V>
    where
        V: Default,
    {
        let i = self.find(key)?;
        let value = mem::take(&mut self.values[i]);
        self.keys[i] = K::EMPTY;
        self.header.len -= 1;
        self.close_gap(i);
        Some(value)
    }

    /// Walk the occupied run after `hole` and move back every entry whose
    /// probe path crosses the hole. Each move leaves a new hole at the
    /// moved entry's old slot; the walk ends at the first empty slot.
    fn close_gap(&mut self, mut hole: usize) {
        let mask = self.mask();
        let mut j = (hole + 1) & mask;
        loop {
            let key = self.keys[j];
            if key.is_empty() {
                return;
            }
            // Re-probing from home would stop at the hole iff the hole lies
            // in [home, j) cyclically.
            let from_home = j.wrapping_sub(key.home(mask)) & mask;
            let from_hole = j.wrapping_sub(hole) & mask;
            if from_hole <= from_home {
                self.keys[hole] = key;
                self.keys[j] = K::EMPTY;
                self.values.swap(hole, j);
                hole = j;
            }
            j = (j + 1) & mask;
        }
    }

    /// Empty every slot; capacity is kept.
    pub(crate) fn clear(&mut self)
    where
        V: Default,
    {
        self.keys.fill(K::EMPTY);
        self.values.fill_with(V::default);
        self.header.len = 0;
    }

    /// Move every entry into `into`, a fresh table large enough to hold
    /// them. Entries are placed at the first empty slot of their probe
    /// path; keys are known to be unique, so no match check is needed.
    pub(crate) fn drain_into(self, into: &mut Self) {
        debug_assert_eq!(into.header.len, 0);
        debug_assert!(K::fits(self.header.len, into.header.cap));
        let mask = into.mask();
        for (key, value) in self.keys.into_iter().zip(self.values) {
            if key.is_empty() {
                continue;
            }
            let mut j = key.home(mask);
            while !into.keys[j].is_empty() {
                j = (j + 1) & mask;
            }
            into.keys[j] = key;
            into.values[j] = value;
            into.header.len += 1;
        }
    }

    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let mask = self.mask();
        let live = self.keys.iter().filter(|k| !k.is_empty()).count();
        assert_eq!(live, self.header.len, "len does not match occupied slots");
        assert!(live < self.header.cap, "table has no empty slot");
        for (i, &key) in self.keys.iter().enumerate() {
            if key.is_empty() {
                continue;
            }
            let mut p = key.home(mask);
            while p != i {
                assert!(
                    !self.keys[p].is_empty(),
                    "hole at {p} on probe path of {key:?} (home {}, slot {i})",
                    key.home(mask)
                );
                p = (p + 1) & mask;
            }
        }
    }
}
