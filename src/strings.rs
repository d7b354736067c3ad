//! String keys: FNV-style hashing and `*_str` forwarding methods.
//!
//! The hash multiplies by the FNV prime before folding in each byte and
//! remaps a zero result to 1, since zero marks an empty slot. Distinct
//! strings may collide; colliding strings share one entry.

use crate::error::AllocError;
use crate::int_map::IntMap;
use crate::key::MapKey;

const OFFSET_32: u32 = 0x811c_9dc5;
const PRIME_32: u32 = 0x0100_0193;
const OFFSET_64: u64 = 0xcbf2_9ce4_8422_2325;
const PRIME_64: u64 = 0x0000_0100_0000_01b3;

pub fn hash_bytes32(bytes: &[u8]) -> u32 {
    let hash = bytes
        .iter()
        .fold(OFFSET_32, |h, &b| h.wrapping_mul(PRIME_32) ^ u32::from(b));
    if hash == 0 {
        1
    } else {
        hash
    }
}

pub fn hash_bytes64(bytes: &[u8]) -> u64 {
    let hash = bytes
        .iter()
        .fold(OFFSET_64, |h, &b| h.wrapping_mul(PRIME_64) ^ u64::from(b));
    if hash == 0 {
        1
    } else {
        hash
    }
}

#[inline]
pub fn hash_str32(s: &str) -> u32 {
    hash_bytes32(s.as_bytes())
}

#[inline]
pub fn hash_str64(s: &str) -> u64 {
    hash_bytes64(s.as_bytes())
}

/// A key width with a string hash.
pub trait StrKey: MapKey {
    fn hash_str(s: &str) -> Self;
}

impl StrKey for u32 {
    #[inline]
    fn hash_str(s: &str) -> Self {
        hash_str32(s)
    }
}

impl StrKey for u64 {
    #[inline]
    fn hash_str(s: &str) -> Self {
        hash_str64(s)
    }
}

impl<K: StrKey, V> IntMap<K, V> {
    pub fn get_str(&self, key: &str) -> &V {
        self.get(K::hash_str(key))
    }

    pub fn contains_str(&self, key: &str) -> bool {
        self.contains_key(K::hash_str(key))
    }

    pub fn index_of_str(&self, key: &str) -> Option<usize> {
        self.index_of(K::hash_str(key))
    }
}

impl<K: StrKey, V: Default> IntMap<K, V> {
    pub fn insert_str(&mut self, key: &str, value: V) -> Result<(), AllocError> {
        self.insert(K::hash_str(key), value)
    }

    pub fn slot_mut_str(&mut self, key: &str) -> Option<&mut V> {
        self.slot_mut(K::hash_str(key))
    }

    pub fn remove_str(&mut self, key: &str) -> bool {
        self.remove(K::hash_str(key))
    }
}
