use thiserror::Error;

/// Failures reported by [`GrowableArray`](crate::GrowableArray) operations.
///
/// Every operation that returns one of these leaves the array untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayError {
    /// The index is outside the range accepted by the operation.
    #[error("Index out of bounds: index {index}, len {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// `find` scanned every element without a match.
    #[error("Element not found")]
    NotFound,

    /// A reduction was requested on an array with no elements.
    #[error("Array is empty")]
    Empty,

    /// The requested capacity cannot be represented as an allocation.
    #[error("Capacity overflow")]
    CapacityOverflow,

    /// The allocator refused a block of `bytes` bytes.
    #[error("Allocation of {bytes} bytes failed")]
    AllocationFailed { bytes: usize },
}

/// Fieldless view of [`ArrayError`] for matching by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    OutOfRange,
    NotFound,
    Empty,
    CapacityOverflow,
    AllocationFailed,
}

impl ArrayError {
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::IndexOutOfRange { .. } => ErrorKind::OutOfRange,
            Self::NotFound => ErrorKind::NotFound,
            Self::Empty => ErrorKind::Empty,
            Self::CapacityOverflow => ErrorKind::CapacityOverflow,
            Self::AllocationFailed { .. } => ErrorKind::AllocationFailed,
        }
    }

    #[inline]
    pub(crate) const fn out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }
}

pub type Result<T> = std::result::Result<T, ArrayError>;
