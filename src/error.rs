//! The single failure kind shared by every growth path.

use core::fmt;

/// Error returned when a container cannot grow to the requested capacity.
///
/// Whenever this is returned the container is left exactly as it was
/// before the call: same allocation, same length, same capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// The capacity formula or the byte size of the region overflowed.
    CapacityOverflow,
    /// The allocator could not satisfy the request.
    OutOfMemory,
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocError::CapacityOverflow => write!(f, "capacity overflow"),
            AllocError::OutOfMemory => write!(f, "memory allocation failed"),
        }
    }
}

impl std::error::Error for AllocError {}

impl From<std::collections::TryReserveError> for AllocError {
    fn from(_: std::collections::TryReserveError) -> Self {
        // Sizes are checked with `byte_size` before reserving, so a
        // reservation failure is the allocator refusing.
        AllocError::OutOfMemory
    }
}
