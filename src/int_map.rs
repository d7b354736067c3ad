//! IntMap: open-addressing map from a pre-hashed integer key to a value.
//!
//! The map is either empty (no allocation) or owns one `RawTable`. Values
//! live in a contiguous region indexed by slot, so callers can scan
//! `0..capacity()` and use `key_at(i)` / `map[i]` directly.
//!
//! Besides the table, every map carries a null value: what `get` returns
//! for an absent key. It defaults to `V::default()`, survives `clear` and
//! growth, and is reset by `free`.
//!
//! Growth reserves room for `len + 1` keys before any new key is claimed,
//! so the load-factor bound of the key width holds after every call.

use crate::error::AllocError;
use crate::key::MapKey;
use crate::raw_table::RawTable;
use core::fmt;
use core::ops::{Index, IndexMut};

pub struct IntMap<K, V> {
    null: V,
    table: Option<RawTable<K, V>>,
}

impl<K: MapKey, V: Default> IntMap<K, V> {
    pub fn new() -> Self {
        Self {
            null: V::default(),
            table: None,
        }
    }
}

impl<K: MapKey, V: Default> Default for IntMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: MapKey, V> IntMap<K, V> {
    #[inline]
    pub fn len(&self) -> usize {
        self.table.as_ref().map_or(0, RawTable::len)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slots; iterate `0..capacity()` to visit every slot.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.table.as_ref().map_or(0, RawTable::capacity)
    }

    /// Whether the map currently owns a table.
    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.table.is_some()
    }

    /// Slot of `key`, if present. The index is only meaningful until the
    /// next mutating call: inserts and removals may move entries.
    pub fn index_of(&self, key: K) -> Option<usize> {
        if key.is_empty() {
            return None;
        }
        self.table.as_ref()?.find(key)
    }

    pub fn contains_key(&self, key: K) -> bool {
        self.index_of(key).is_some()
    }

    /// Value of `key`, or the null value when absent.
    pub fn get(&self, key: K) -> &V {
        match (&self.table, self.index_of(key)) {
            (Some(t), Some(i)) => &t.values()[i],
            _ => &self.null,
        }
    }

    /// Mutable value of `key`; never inserts.
    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        let i = self.index_of(key)?;
        self.table.as_mut().map(|t| &mut t.values_mut()[i])
    }

    /// Key stored in slot `index`; `K::EMPTY` for an empty slot or an index
    /// outside the table.
    pub fn key_at(&self, index: usize) -> K {
        self.keys().get(index).copied().unwrap_or(K::EMPTY)
    }

    /// All key slots, empty ones included.
    pub fn keys(&self) -> &[K] {
        match &self.table {
            Some(t) => t.keys(),
            None => &[],
        }
    }

    /// All value slots, parallel to [`IntMap::keys`]. Empty slots hold
    /// `V::default()`.
    pub fn values(&self) -> &[V] {
        match &self.table {
            Some(t) => t.values(),
            None => &[],
        }
    }

    pub fn values_mut(&mut self) -> &mut [V] {
        match &mut self.table {
            Some(t) => t.values_mut(),
            None => &mut [],
        }
    }

    #[inline]
    pub fn null_value(&self) -> &V {
        &self.null
    }

    /// Replace the value `get` returns for absent keys.
    pub fn set_null_value(&mut self, value: V) {
        self.null = value;
    }

    /// Live entries in slot order. The order is unspecified and changes
    /// when keys are added or removed.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            keys: self.keys().iter(),
            values: self.values().iter(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let (keys, values): (&[K], &mut [V]) = match &mut self.table {
            Some(t) => t.slots_mut(),
            None => (&[], &mut []),
        };
        IterMut {
            keys: keys.iter(),
            values: values.iter_mut(),
        }
    }

    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        if let Some(t) = &self.table {
            t.assert_consistent();
            assert!(K::fits(t.len(), t.capacity()), "load factor exceeded");
        }
    }
}

impl<K: MapKey, V: Default> IntMap<K, V> {
    /// Ensure room for `count` keys. On failure the map is unchanged and
    /// the capacity stays short; use [`IntMap::try_fit`] to find out.
    pub fn fit(&mut self, count: usize) {
        let _ = self.try_fit(count);
    }

    /// Ensure room for `count` keys, reporting failure. On `Err` the map's
    /// length, capacity, and contents are exactly as before.
    pub fn try_fit(&mut self, count: usize) -> Result<(), AllocError> {
        if count == 0 || K::fits(count, self.capacity()) {
            return Ok(());
        }
        self.grow(count).map(|_| ())
    }

    /// Build a table for `reserve` keys, rehash into it, drop the old one.
    fn grow(&mut self, reserve: usize) -> Result<&mut RawTable<K, V>, AllocError> {
        let cap = K::grown_capacity(self.capacity(), reserve).ok_or(AllocError::CapacityOverflow)?;
        let mut table = RawTable::try_with_capacity(cap)?;
        if let Some(old) = self.table.take() {
            old.drain_into(&mut table);
        }
        Ok(self.table.insert(table))
    }

    /// The table, grown if needed so one more key can be claimed.
    fn table_for_insert(&mut self) -> Result<&mut RawTable<K, V>, AllocError> {
        let wanted = self.len().saturating_add(1);
        if !K::fits(wanted, self.capacity()) {
            return self.grow(wanted);
        }
        match self.table.as_mut() {
            Some(t) => Ok(t),
            None => unreachable!("an unallocated map fits no keys"),
        }
    }

    /// Set the value of `key`. Key zero is ignored. On `Err` the map is
    /// unchanged and `value` is dropped.
    pub fn insert(&mut self, key: K, value: V) -> Result<(), AllocError> {
        if let Some(slot) = self.try_slot_mut(key)? {
            *slot = value;
        }
        Ok(())
    }

    /// Value slot of `key`, inserting `V::default()` if absent. `None` for
    /// key zero or when the map cannot grow; [`IntMap::try_slot_mut`] tells
    /// the two apart.
    pub fn slot_mut(&mut self, key: K) -> Option<&mut V> {
        self.try_slot_mut(key).ok().flatten()
    }

    /// Like [`IntMap::slot_mut`], but reports growth failure as `Err`.
    /// `Ok(None)` only for key zero. On `Err` the map is unchanged.
    pub fn try_slot_mut(&mut self, key: K) -> Result<Option<&mut V>, AllocError> {
        if key.is_empty() {
            return Ok(None);
        }
        let table = self.table_for_insert()?;
        let (i, _) = table.find_or_claim(key);
        Ok(Some(&mut table.values_mut()[i]))
    }

    /// Remove `key`; true if it was present.
    pub fn remove(&mut self, key: K) -> bool {
        self.take(key).is_some()
    }

    /// Remove `key` and return its value.
    pub fn take(&mut self, key: K) -> Option<V> {
        if key.is_empty() {
            return None;
        }
        self.table.as_mut()?.remove(key)
    }

    /// Remove every entry, keeping the capacity and the null value.
    pub fn clear(&mut self) {
        if let Some(t) = &mut self.table {
            t.clear();
        }
    }

    /// Release the table and reset the null value: back to `new()`.
    pub fn free(&mut self) {
        self.table = None;
        self.null = V::default();
    }
}

/// Iterator over live `(key, &value)` pairs.
pub struct Iter<'a, K, V> {
    keys: core::slice::Iter<'a, K>,
    values: core::slice::Iter<'a, V>,
}

impl<'a, K: MapKey, V> Iterator for Iter<'a, K, V> {
    type Item = (K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let key = *self.keys.next()?;
            let value = self.values.next()?;
            if !key.is_empty() {
                return Some((key, value));
            }
        }
    }
}

/// Iterator over live `(key, &mut value)` pairs.
pub struct IterMut<'a, K, V> {
    keys: core::slice::Iter<'a, K>,
    values: core::slice::IterMut<'a, V>,
}

impl<'a, K: MapKey, V> Iterator for IterMut<'a, K, V> {
    type Item = (K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let key = *self.keys.next()?;
            let value = self.values.next()?;
            if !key.is_empty() {
                return Some((key, value));
            }
        }
    }
}

impl<'a, K: MapKey, V> IntoIterator for &'a IntMap<K, V> {
    type Item = (K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Raw slot access, like indexing the value region directly. Panics when
/// `index >= capacity()`.
impl<K: MapKey, V> Index<usize> for IntMap<K, V> {
    type Output = V;

    fn index(&self, index: usize) -> &V {
        &self.values()[index]
    }
}

impl<K: MapKey, V> IndexMut<usize> for IntMap<K, V> {
    fn index_mut(&mut self, index: usize) -> &mut V {
        &mut self.values_mut()[index]
    }
}

impl<K: MapKey, V: Default> Extend<(K, V)> for IntMap<K, V> {
    /// Panics if the map cannot grow; call [`IntMap::try_fit`] first to
    /// handle allocation failure.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            if let Err(e) = self.insert(key, value) {
                panic!("IntMap::extend: {e}");
            }
        }
    }
}

impl<K: MapKey, V: Default> FromIterator<(K, V)> for IntMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = IntMap::new();
        map.extend(iter);
        map
    }
}

impl<K: MapKey, V: fmt::Debug> fmt::Debug for IntMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
