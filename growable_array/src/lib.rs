use std::alloc::{Layout, alloc, dealloc, handle_alloc_error};
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr::{self, NonNull};

use log::{debug, trace};

mod error;
mod extent;

pub use error::{ArrayError, ErrorKind, Result};
pub use extent::Extent;

/// Capacity used by [`GrowableArray::new`] and restored by [`GrowableArray::clear`].
pub const DEFAULT_CAPACITY: usize = 5;

/// A contiguous, growable sequence that owns a hand-managed heap buffer.
///
/// Slots `[0, len)` hold initialized elements, slots `[len, capacity)` are
/// uninitialized. When an insertion finds the buffer full the capacity is
/// doubled and the live elements are moved to the new block, so appends
/// cost O(1) amortized.
///
/// ```
/// use growable_array::GrowableArray;
///
/// let mut arr = GrowableArray::new();
/// arr.push_back(10);
/// arr.push_back(20);
/// arr.insert_at(1, 15).unwrap();
/// assert_eq!(arr.to_string(), "[10, 15, 20]");
/// ```
pub struct GrowableArray<T> {
    ptr: NonNull<T>,
    cap: usize,
    len: usize,
    relocated: usize,
    _marker: PhantomData<T>,
}

// SAFETY: the buffer is uniquely owned, so moving the array moves its elements.
unsafe impl<T: Send> Send for GrowableArray<T> {}
// SAFETY: shared access only hands out `&T`.
unsafe impl<T: Sync> Sync for GrowableArray<T> {}

#[inline]
const fn is_zst<T>() -> bool {
    mem::size_of::<T>() == 0
}

#[cold]
#[inline(never)]
fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}

fn layout_for<T>(cap: usize) -> Result<Layout> {
    Layout::array::<T>(cap).map_err(|_| ArrayError::CapacityOverflow)
}

/// Allocates room for `cap` elements. Zero-sized types never touch the allocator.
fn try_allocate<T>(cap: usize) -> Result<NonNull<T>> {
    if is_zst::<T>() {
        return Ok(NonNull::dangling());
    }
    let layout = layout_for::<T>(cap)?;
    if layout.size() == 0 {
        return Ok(NonNull::dangling());
    }
    // SAFETY: the layout has a non-zero size.
    let raw = unsafe { alloc(layout) };
    NonNull::new(raw.cast::<T>()).ok_or(ArrayError::AllocationFailed {
        bytes: layout.size(),
    })
}

fn allocate<T>(cap: usize) -> NonNull<T> {
    match try_allocate(cap) {
        Ok(p) => p,
        Err(ArrayError::AllocationFailed { .. }) => match layout_for::<T>(cap) {
            Ok(layout) => handle_alloc_error(layout),
            Err(_) => capacity_overflow(),
        },
        Err(_) => capacity_overflow(),
    }
}

/// Returns a block obtained from [`try_allocate`] with the same `cap`.
///
/// # Safety
/// `ptr` must come from `try_allocate::<T>(cap)` and must not be used afterwards.
unsafe fn release<T>(ptr: NonNull<T>, cap: usize) {
    if is_zst::<T>() {
        return;
    }
    if let Ok(layout) = Layout::array::<T>(cap) {
        if layout.size() != 0 {
            // SAFETY: same layout the block was allocated with.
            unsafe { dealloc(ptr.as_ptr().cast::<u8>(), layout) };
        }
    }
}

impl<T> GrowableArray<T> {
    /// Creates an empty array with [`DEFAULT_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty array with room for `capacity` elements.
    ///
    /// A request for zero slots is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let cap = capacity.max(1);
        Self {
            ptr: allocate(cap),
            cap,
            len: 0,
            relocated: 0,
            _marker: PhantomData,
        }
    }

    /// Like [`with_capacity`](Self::with_capacity), but reports a request the
    /// allocator cannot satisfy instead of panicking or aborting.
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        let cap = capacity.max(1);
        Ok(Self {
            ptr: try_allocate(cap)?,
            cap,
            len: 0,
            relocated: 0,
            _marker: PhantomData,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total number of elements moved by growth events since construction
    /// or the last [`clear`](Self::clear).
    #[inline]
    pub fn relocated(&self) -> usize {
        self.relocated
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[0, len)` is initialized and the pointer is aligned and non-null.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as above, and `&mut self` guarantees exclusivity.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Inserts `value` at offset 0, shifting every element one slot up.
    pub fn push_front(&mut self, value: T) {
        self.insert_unchecked(0, value);
    }

    /// Appends `value` after the last element.
    pub fn push_back(&mut self, value: T) {
        if self.len == self.cap {
            self.grow();
        }
        // SAFETY: `len < cap` after the growth check.
        unsafe { ptr::write(self.ptr.as_ptr().add(self.len), value) };
        // Only count the slot once the write has happened.
        self.len += 1;
    }

    /// Inserts `value` at `index`, shifting `[index, len)` one slot up.
    ///
    /// Accepts `index == len`, which appends.
    pub fn insert_at(&mut self, index: usize, value: T) -> Result<()> {
        if index > self.len {
            return Err(ArrayError::out_of_range(index, self.len));
        }
        self.insert_unchecked(index, value);
        Ok(())
    }

    fn insert_unchecked(&mut self, index: usize, value: T) {
        debug_assert!(index <= self.len);
        if self.len == self.cap {
            self.grow();
        }
        // SAFETY: `index <= len < cap`, so the shifted range stays in the buffer.
        unsafe {
            let p = self.ptr.as_ptr().add(index);
            ptr::copy(p, p.add(1), self.len - index);
            ptr::write(p, value);
        }
        self.len += 1;
    }

    /// Removes and returns the first element, or `None` when empty.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            None
        } else {
            Some(self.take_unchecked(0))
        }
    }

    /// Removes and returns the last element, or `None` when empty.
    ///
    /// The vacated slot is simply left for the next insertion.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            None
        } else {
            self.len -= 1;
            // SAFETY: the slot at the old last offset is initialized and now
            // outside the live range, so it is read exactly once.
            Some(unsafe { ptr::read(self.ptr.as_ptr().add(self.len)) })
        }
    }

    /// Removes and returns the element at `index`, shifting the tail down.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        if index >= self.len {
            return Err(ArrayError::out_of_range(index, self.len));
        }
        Ok(self.take_unchecked(index))
    }

    fn take_unchecked(&mut self, index: usize) -> T {
        debug_assert!(index < self.len);
        // SAFETY: `index < len`; the element is read out before its slot is
        // overwritten by the shift.
        unsafe {
            let p = self.ptr.as_ptr().add(index);
            let value = ptr::read(p);
            ptr::copy(p.add(1), p, self.len - index - 1);
            self.len -= 1;
            value
        }
    }

    /// Drops every element and swaps the buffer for a fresh one of
    /// [`DEFAULT_CAPACITY`] slots, whatever the capacity was before.
    pub fn clear(&mut self) {
        let len = self.len;
        self.len = 0;
        // SAFETY: `[0, len)` was initialized; `len` is already zero so a
        // panicking destructor cannot cause a second drop.
        unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), len)) };

        let fresh = allocate(DEFAULT_CAPACITY);
        // SAFETY: the old block came from `allocate(self.cap)` and is replaced below.
        unsafe { release(self.ptr, self.cap) };
        debug!(
            "growable array cleared: dropped {} elements, capacity {} -> {}",
            len, self.cap, DEFAULT_CAPACITY
        );
        self.ptr = fresh;
        self.cap = DEFAULT_CAPACITY;
        self.relocated = 0;
    }

    /// Bounds-checked access; valid for `index < len`.
    pub fn at(&self, index: usize) -> Result<&T> {
        let len = self.len;
        self.as_slice()
            .get(index)
            .ok_or(ArrayError::out_of_range(index, len))
    }

    /// Bounds-checked mutable access; valid for `index < len`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(ArrayError::out_of_range(index, len))
    }

    /// Unchecked access.
    ///
    /// # Safety
    /// `index` must be less than `len()`. Only debug builds verify it.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len, "Index out of bounds");
        // SAFETY: the caller guarantees `index < len`.
        unsafe { &*self.ptr.as_ptr().add(index) }
    }

    /// Unchecked mutable access.
    ///
    /// # Safety
    /// `index` must be less than `len()`. Only debug builds verify it.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len, "Index out of bounds");
        // SAFETY: the caller guarantees `index < len`.
        unsafe { &mut *self.ptr.as_ptr().add(index) }
    }

    /// Ensures room for `additional` more elements, doubling as often as
    /// needed. Reports overflow instead of panicking.
    pub fn try_reserve(&mut self, additional: usize) -> Result<()> {
        let required = self
            .len
            .checked_add(additional)
            .ok_or(ArrayError::CapacityOverflow)?;
        if required <= self.cap {
            return Ok(());
        }
        let mut new_cap = self.cap;
        while new_cap < required {
            new_cap = new_cap.checked_mul(2).ok_or(ArrayError::CapacityOverflow)?;
        }
        let new_ptr = try_allocate(new_cap)?;
        debug!("growable array reserving {} slots for {} more", new_cap, additional);
        self.adopt(new_ptr, new_cap);
        Ok(())
    }

    fn grow(&mut self) {
        let new_cap = match self.cap.checked_mul(2) {
            Some(cap) => cap,
            None => capacity_overflow(),
        };
        let new_ptr = allocate(new_cap);
        self.adopt(new_ptr, new_cap);
    }

    /// Moves the live elements into `new_ptr` and frees the old block.
    fn adopt(&mut self, new_ptr: NonNull<T>, new_cap: usize) {
        debug_assert!(new_cap >= self.len);
        // SAFETY: both blocks hold at least `len` slots and are distinct
        // allocations; the old block is not touched again.
        unsafe {
            ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), self.len);
            release(self.ptr, self.cap);
        }
        trace!(
            "growable array grew: capacity {} -> {}, moved {} elements",
            self.cap, new_cap, self.len
        );
        self.ptr = new_ptr;
        self.cap = new_cap;
        self.relocated += self.len;
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }
}

// Search
impl<T: PartialEq> GrowableArray<T> {
    /// Offset of the first element equal to `key`.
    pub fn find(&self, key: &T) -> Result<usize> {
        self.iter()
            .position(|item| item == key)
            .ok_or(ArrayError::NotFound)
    }

    /// Offsets of every element equal to `key`, in ascending order.
    ///
    /// No match is a normal outcome here and yields an empty array.
    pub fn find_all(&self, key: &T) -> GrowableArray<usize> {
        let mut indices = GrowableArray::new();
        for (i, item) in self.iter().enumerate() {
            if item == key {
                indices.push_back(i);
            }
        }
        indices
    }
}

// Combinators. None of these touch the receiver.
impl<T: Clone> GrowableArray<T> {
    /// Ascending copy, bubble sorted. Equal elements keep their order.
    pub fn sorted(&self) -> Self
    where
        T: PartialOrd,
    {
        let mut sorted = self.clone();
        let n = sorted.len();
        for pass in 0..n.saturating_sub(1) {
            let mut swapped = false;
            for j in 0..n - pass - 1 {
                if sorted[j] > sorted[j + 1] {
                    sorted.swap(j, j + 1);
                    swapped = true;
                }
            }
            if !swapped {
                break;
            }
        }
        sorted
    }

    pub fn reversed(&self) -> Self {
        let mut reversed = Self::with_capacity(self.cap);
        for item in self.iter().rev() {
            reversed.push_back(item.clone());
        }
        reversed
    }

    /// Copy of `self` followed by a copy of every element of `other`.
    pub fn merged_with(&self, other: &Self) -> Self {
        let mut merged = self.clone();
        merged.extend(other.iter().cloned());
        merged
    }
}

impl<T: Extent> GrowableArray<T> {
    /// The element ranking highest under [`Extent`]; the first one on ties.
    pub fn maximum(&self) -> Result<&T> {
        self.reduce(Ordering::Greater)
    }

    /// The element ranking lowest under [`Extent`]; the first one on ties.
    pub fn minimum(&self) -> Result<&T> {
        self.reduce(Ordering::Less)
    }

    fn reduce(&self, wins: Ordering) -> Result<&T> {
        let slice = self.as_slice();
        // An all-NaN array still has an answer: its first element.
        let start = slice.iter().position(|v| v.is_comparable()).unwrap_or(0);
        let (first, rest) = slice[start..].split_first().ok_or(ArrayError::Empty)?;
        Ok(rest.iter().fold(first, |best, candidate| {
            if candidate.extent_cmp(best) == wins {
                candidate
            } else {
                best
            }
        }))
    }
}

impl<T> Drop for GrowableArray<T> {
    fn drop(&mut self) {
        // SAFETY: drop the live elements, then hand the block back once.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), self.len));
            release(self.ptr, self.cap);
        }
    }
}

impl<T: Clone> Clone for GrowableArray<T> {
    /// Deep copy with the same capacity and its own buffer.
    fn clone(&self) -> Self {
        let mut copy = Self::with_capacity(self.cap);
        for item in self.iter() {
            copy.push_back(item.clone());
        }
        copy
    }
}

impl<T> Deref for GrowableArray<T> {
    type Target = [T];
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for GrowableArray<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for GrowableArray<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> Default for GrowableArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Display> fmt::Display for GrowableArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        f.write_str("]")
    }
}

impl<T: fmt::Debug> fmt::Debug for GrowableArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for GrowableArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for GrowableArray<T> {}

impl<T: PartialEq> PartialEq<[T]> for GrowableArray<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for GrowableArray<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T> Extend<T> for GrowableArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T> FromIterator<T> for GrowableArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut arr = Self::new();
        arr.extend(iter);
        arr
    }
}

/// Owning iterator returned by `GrowableArray::into_iter`.
pub struct IntoIter<T> {
    buf: NonNull<T>,
    cap: usize,
    head: usize,
    tail: usize,
    _marker: PhantomData<T>,
}

// SAFETY: same ownership story as `GrowableArray`.
unsafe impl<T: Send> Send for IntoIter<T> {}
// SAFETY: the iterator hands out owned values only.
unsafe impl<T: Sync> Sync for IntoIter<T> {}

impl<T> IntoIterator for GrowableArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let iter = IntoIter {
            buf: self.ptr,
            cap: self.cap,
            head: 0,
            tail: self.len,
            _marker: PhantomData,
        };
        // The iterator now owns the buffer and its elements.
        mem::forget(self);
        iter
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.head == self.tail {
            None
        } else {
            // SAFETY: `[head, tail)` holds elements not yet yielded.
            let item = unsafe { ptr::read(self.buf.as_ptr().add(self.head)) };
            self.head += 1;
            Some(item)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.tail - self.head;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.head == self.tail {
            None
        } else {
            self.tail -= 1;
            // SAFETY: the slot at the old `tail - 1` has not been yielded.
            Some(unsafe { ptr::read(self.buf.as_ptr().add(self.tail)) })
        }
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        // SAFETY: drop whatever was not consumed, then free the block once.
        unsafe {
            let rest = self.buf.as_ptr().add(self.head);
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(rest, self.tail - self.head));
            release(self.buf, self.cap);
        }
    }
}

impl<'a, T> IntoIterator for &'a GrowableArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut GrowableArray<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests;
