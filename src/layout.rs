//! Header-plus-region storage shared by the array and the maps.
//!
//! Every container keeps a small `Header` next to an owned, contiguous
//! region of element slots. The region is always allocated with room for
//! exactly `cap` elements and is never reallocated in place: growth builds
//! a complete replacement first and only then moves the contents over, so
//! a failed growth leaves the old storage untouched.

use crate::error::AllocError;
use core::alloc::Layout;

/// Bookkeeping kept alongside a region: live element count and slot count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Header {
    pub(crate) len: usize,
    pub(crate) cap: usize,
}

/// Byte size of a region of `count` elements of `T`, or `CapacityOverflow`
/// if it does not fit in `isize::MAX`.
pub(crate) fn byte_size<T>(count: usize) -> Result<usize, AllocError> {
    Layout::array::<T>(count)
        .map(|layout| layout.size())
        .map_err(|_| AllocError::CapacityOverflow)
}

/// An empty region with room for exactly `count` elements.
pub(crate) fn try_region<T>(count: usize) -> Result<Vec<T>, AllocError> {
    byte_size::<T>(count)?;
    let mut region = Vec::new();
    region.try_reserve_exact(count)?;
    Ok(region)
}

/// A region of `count` elements produced by `fill`.
pub(crate) fn try_region_with<T, F>(count: usize, fill: F) -> Result<Vec<T>, AllocError>
where
    F: FnMut() -> T,
{
    let mut region = try_region(count)?;
    region.resize_with(count, fill);
    Ok(region)
}

/// Header plus an owned region holding the live elements.
///
/// The region's allocation has room for at least `cap` elements, so pushes
/// up to `cap` never reallocate. The live count is the region's length.
#[derive(Debug)]
pub(crate) struct Block<T> {
    cap: usize,
    pub(crate) items: Vec<T>,
}

impl<T> Block<T> {
    pub(crate) fn try_with_capacity(cap: usize) -> Result<Self, AllocError> {
        Ok(Block {
            cap,
            items: try_region(cap)?,
        })
    }

    /// Move every element of `old` to the end of this block.
    pub(crate) fn absorb(&mut self, old: Block<T>) {
        debug_assert!(self.items.len() + old.items.len() <= self.cap);
        self.items.extend(old.items);
    }

    #[inline]
    pub(crate) fn header(&self) -> Header {
        Header {
            len: self.items.len(),
            cap: self.cap,
        }
    }
}
