//! Array: a growable contiguous sequence with explicit capacity control.
//!
//! The array starts in the empty state with no allocation. The first
//! growth allocates room for 16 elements (or more if a larger reserve was
//! requested); every later growth doubles the capacity, again rounded up
//! to the requested reserve. Growth allocates the replacement block first,
//! so a failed growth leaves the array untouched.

use crate::error::AllocError;
use crate::layout::Block;
use core::fmt;
use core::ops::{Deref, DerefMut};

/// Capacity of the first allocation when no larger reserve is requested.
pub const INITIAL_CAPACITY: usize = 16;

pub struct Array<T> {
    block: Option<Block<T>>,
}

impl<T> Array<T> {
    pub const fn new() -> Self {
        Self { block: None }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.block.as_ref().map_or(0, |b| b.header().len)
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.block.as_ref().map_or(0, |b| b.header().cap)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the array currently owns an allocation.
    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.block.is_some()
    }

    pub fn as_slice(&self) -> &[T] {
        match &self.block {
            Some(b) => &b.items,
            None => &[],
        }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match &mut self.block {
            Some(b) => &mut b.items,
            None => &mut [],
        }
    }

    /// Ensure room for at least `count` elements. On failure the capacity
    /// stays short of the request; use [`Array::try_fit`] to find out.
    pub fn fit(&mut self, count: usize) {
        let _ = self.try_fit(count);
    }

    /// Ensure room for at least `count` elements, reporting failure.
    pub fn try_fit(&mut self, count: usize) -> Result<(), AllocError> {
        if count <= self.capacity() {
            return Ok(());
        }
        self.grow(count)
    }

    fn grow(&mut self, reserve: usize) -> Result<(), AllocError> {
        let new_cap = match &self.block {
            Some(b) => b.header().cap.saturating_mul(2),
            None => INITIAL_CAPACITY,
        }
        .max(reserve);
        let mut block = Block::try_with_capacity(new_cap)?;
        if let Some(old) = self.block.take() {
            block.absorb(old);
        }
        self.block = Some(block);
        Ok(())
    }

    /// Room for `extra` more elements past the current length.
    fn reserve_extra(&mut self, extra: usize) -> Result<(), AllocError> {
        let needed = self
            .len()
            .checked_add(extra)
            .ok_or(AllocError::CapacityOverflow)?;
        self.try_fit(needed)
    }

    /// The live region; callers must have reserved first.
    fn items_mut(&mut self) -> &mut Vec<T> {
        match &mut self.block {
            Some(b) => &mut b.items,
            None => unreachable!("array storage used before allocation"),
        }
    }

    pub fn push(&mut self, value: T) -> Result<(), AllocError> {
        self.reserve_extra(1)?;
        self.items_mut().push(value);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<T> {
        self.block.as_mut().and_then(|b| b.items.pop())
    }

    /// Insert `value` at `index`, shifting later elements up by one.
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), AllocError> {
        let len = self.len();
        if index > len {
            insertion_out_of_bounds(index, len);
        }
        self.reserve_extra(1)?;
        self.items_mut().insert(index, value);
        Ok(())
    }

    /// Remove the element at `index`, shifting later elements down by one.
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        let len = self.len();
        match &mut self.block {
            Some(b) if index < len => b.items.remove(index),
            _ => index_out_of_bounds(index, len),
        }
    }

    /// Remove the element at `index` by moving the last element into its
    /// place. Does not preserve order.
    ///
    /// Panics if `index >= len`.
    pub fn swap_remove(&mut self, index: usize) -> T {
        let len = self.len();
        match &mut self.block {
            Some(b) if index < len => b.items.swap_remove(index),
            _ => index_out_of_bounds(index, len),
        }
    }

    /// Drop every element, keeping the allocation.
    pub fn clear(&mut self) {
        if let Some(b) = &mut self.block {
            b.items.clear();
        }
    }

    /// Release the allocation and return to the empty state.
    pub fn free(&mut self) {
        self.block = None;
    }
}

impl<T: Default> Array<T> {
    /// Set the length to exactly `len`. New elements are `T::default()`;
    /// shrinking drops the tail but keeps the capacity.
    pub fn resize(&mut self, len: usize) -> Result<(), AllocError> {
        if len <= self.len() {
            if let Some(b) = &mut self.block {
                b.items.truncate(len);
            }
            return Ok(());
        }
        self.try_fit(len)?;
        self.items_mut().resize_with(len, T::default);
        Ok(())
    }

    /// Open `count` default-initialized slots at `index`, shifting later
    /// elements up, and return the gap.
    ///
    /// Panics if `index > len`.
    pub fn make_gap(&mut self, index: usize, count: usize) -> Result<&mut [T], AllocError> {
        let len = self.len();
        if index > len {
            insertion_out_of_bounds(index, len);
        }
        if count == 0 {
            return Ok(&mut []);
        }
        self.reserve_extra(count)?;
        let items = self.items_mut();
        items.splice(index..index, core::iter::repeat_with(T::default).take(count));
        Ok(&mut items[index..index + count])
    }

    /// Append `count` default-initialized elements and return them.
    pub fn add(&mut self, count: usize) -> Result<&mut [T], AllocError> {
        if count == 0 {
            return Ok(&mut []);
        }
        self.reserve_extra(count)?;
        let items = self.items_mut();
        let start = items.len();
        items.resize_with(start + count, T::default);
        Ok(&mut items[start..])
    }
}

impl<T: bytemuck::Zeroable> Array<T> {
    /// Append `count` all-zero elements and return them.
    pub fn add_zeroed(&mut self, count: usize) -> Result<&mut [T], AllocError> {
        if count == 0 {
            return Ok(&mut []);
        }
        self.reserve_extra(count)?;
        let items = self.items_mut();
        let start = items.len();
        items.resize_with(start + count, T::zeroed);
        Ok(&mut items[start..])
    }
}

#[cold]
#[track_caller]
fn index_out_of_bounds(index: usize, len: usize) -> ! {
    panic!("index (is {index}) should be < len (is {len})")
}

#[cold]
#[track_caller]
fn insertion_out_of_bounds(index: usize, len: usize) -> ! {
    panic!("insertion index (is {index}) should be <= len (is {len})")
}

impl<T> Default for Array<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for Array<T> {
    type Target = [T];
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for Array<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for Array<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Clone> Clone for Array<T> {
    /// Clones keep the source's capacity. Panics if that much memory is not
    /// available.
    fn clone(&self) -> Self {
        let mut out = Array::new();
        if let Some(b) = &self.block {
            if let Err(e) = out.try_fit(b.header().cap) {
                panic!("Array::clone: {e}");
            }
            out.items_mut().extend(b.items.iter().cloned());
        }
        out
    }
}

impl<T: PartialEq> PartialEq for Array<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for Array<T> {}

impl<T> Extend<T> for Array<T> {
    /// Panics if the array cannot grow; use [`Array::try_fit`] beforehand
    /// to handle allocation failure.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            if let Err(e) = self.push(value) {
                panic!("Array::extend: {e}");
            }
        }
    }
}

impl<T> FromIterator<T> for Array<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut out = Array::new();
        out.extend(iter);
        out
    }
}
