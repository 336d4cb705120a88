use std::borrow::Cow;
use std::cmp::Ordering;
use std::rc::Rc;
use std::sync::Arc;

/// The measure used by [`maximum`](crate::GrowableArray::maximum) and
/// [`minimum`](crate::GrowableArray::minimum).
///
/// Numeric types, `char` and `bool` compare by value. Textual types compare
/// by length in bytes, so the maximum of a text array is its longest entry
/// and the minimum its shortest. The choice is made per element type at
/// compile time; there is no runtime type inspection.
pub trait Extent {
    /// Orders `self` against `other` under this type's measure.
    ///
    /// Values that cannot be ordered (a NaN float) report `Equal`, so they
    /// never displace the running extreme.
    fn extent_cmp(&self, other: &Self) -> Ordering;

    /// Whether this value takes part in ordering at all. A reduction starts
    /// from the first comparable element.
    #[inline]
    fn is_comparable(&self) -> bool {
        true
    }
}

macro_rules! extent_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Extent for $ty {
                #[inline]
                fn extent_cmp(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }
            }
        )*
    };
}

macro_rules! extent_by_float {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Extent for $ty {
                #[inline]
                fn extent_cmp(&self, other: &Self) -> Ordering {
                    self.partial_cmp(other).unwrap_or(Ordering::Equal)
                }

                #[inline]
                fn is_comparable(&self) -> bool {
                    !self.is_nan()
                }
            }
        )*
    };
}

macro_rules! extent_by_length {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Extent for $ty {
                #[inline]
                fn extent_cmp(&self, other: &Self) -> Ordering {
                    self.len().cmp(&other.len())
                }
            }
        )*
    };
}

extent_by_value!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, char, bool,
);

extent_by_float!(f32, f64);

extent_by_length!(String, Box<str>, Rc<str>, Arc<str>);

impl Extent for &str {
    #[inline]
    fn extent_cmp(&self, other: &Self) -> Ordering {
        self.len().cmp(&other.len())
    }
}

impl Extent for Cow<'_, str> {
    #[inline]
    fn extent_cmp(&self, other: &Self) -> Ordering {
        self.len().cmp(&other.len())
    }
}
