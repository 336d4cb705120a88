use super::*;
use crossbeam::scope;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};


fn from_slice<T: Clone>(items: &[T]) -> GrowableArray<T> {
    items.iter().cloned().collect()
}

struct Droppable(Arc<AtomicUsize>);

impl Drop for Droppable {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn test_new_uses_default_capacity() {
    let arr: GrowableArray<i32> = GrowableArray::new();
    assert_eq!(arr.len(), 0);
    assert_eq!(arr.capacity(), DEFAULT_CAPACITY);
    assert!(arr.is_empty());
    assert_eq!(arr.to_string(), "[]");
}

#[test]
fn test_zero_capacity_is_raised_to_one() {
    let mut arr = GrowableArray::with_capacity(0);
    assert_eq!(arr.capacity(), 1);
    arr.push_back('a');
    arr.push_back('b');
    assert_eq!(arr.capacity(), 2);
}

#[test]
fn test_push_back_grows_by_doubling() {
    let mut arr = GrowableArray::new();
    for value in [10, 20, 30, 40, 50] {
        arr.push_back(value);
    }
    assert_eq!(arr.capacity(), 5);
    assert_eq!(arr.relocated(), 0);

    arr.push_back(60);
    assert_eq!(arr, [10, 20, 30, 40, 50, 60]);
    assert_eq!(arr.len(), 6);
    assert_eq!(arr.capacity(), 10);
    assert_eq!(arr.relocated(), 5);
}

#[test]
fn test_push_front_shifts_up() {
    let mut arr = GrowableArray::new();
    arr.push_front(10);
    arr.push_front(20);
    for value in [30, 40, 50, 60, 70] {
        arr.push_back(value);
    }
    assert_eq!(arr.to_string(), "[20, 10, 30, 40, 50, 60, 70]");
    assert_eq!(arr.capacity(), 10);
}

#[test]
fn test_insert_at_middle() {
    let mut arr = from_slice(&[10, 20, 30]);
    arr.insert_at(1, 99).unwrap();
    assert_eq!(arr, [10, 99, 20, 30]);
    assert_eq!(arr.len(), 4);
}

#[test]
fn test_insert_at_ends() {
    let mut arr = from_slice(&[2, 3]);
    arr.insert_at(0, 1).unwrap();
    arr.insert_at(arr.len(), 4).unwrap();
    assert_eq!(arr, [1, 2, 3, 4]);
}

#[test]
fn test_insert_at_when_full_grows_first() {
    let mut arr = GrowableArray::with_capacity(3);
    arr.extend([1, 2, 3]);
    arr.insert_at(1, 7).unwrap();
    assert_eq!(arr, [1, 7, 2, 3]);
    assert_eq!(arr.capacity(), 6);
}

#[test]
fn test_insert_at_out_of_range_leaves_array_unchanged() {
    let mut arr = from_slice(&[10, 20, 30, 40, 50]);
    let err = arr.insert_at(6, 99).unwrap_err();
    assert_eq!(err, ArrayError::IndexOutOfRange { index: 6, len: 5 });
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
    assert_eq!(arr, [10, 20, 30, 40, 50]);
    assert_eq!(arr.capacity(), 5);
}

#[test]
fn test_remove_at() {
    let mut arr = from_slice(&[10, 20, 30, 40]);
    assert_eq!(arr.remove_at(1), Ok(20));
    assert_eq!(arr, [10, 30, 40]);
    assert_eq!(arr.len(), 3);
    assert_eq!(arr.remove_at(2), Ok(40));
    assert_eq!(arr, [10, 30]);
}

#[test]
fn test_remove_at_out_of_range() {
    let mut arr = from_slice(&[1, 2, 3]);
    let err = arr.remove_at(3).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
    assert_eq!(err.to_string(), "Index out of bounds: index 3, len 3");
    assert_eq!(arr, [1, 2, 3]);

    let mut empty: GrowableArray<i32> = GrowableArray::new();
    assert!(empty.remove_at(0).is_err());
}

#[test]
fn test_pop_front_and_back() {
    let mut arr = from_slice(&[10, 20, 30]);
    assert_eq!(arr.pop_front(), Some(10));
    assert_eq!(arr, [20, 30]);
    assert_eq!(arr.pop_back(), Some(30));
    assert_eq!(arr, [20]);
    assert_eq!(arr.pop_back(), Some(20));
    assert_eq!(arr.pop_back(), None);
    assert_eq!(arr.pop_front(), None);
    assert!(arr.is_empty());
}

#[test]
fn test_pop_back_keeps_capacity_and_slot_is_reused() {
    let mut arr = from_slice(&[1, 2, 3]);
    arr.pop_back();
    assert_eq!(arr.capacity(), 5);
    arr.push_back(9);
    assert_eq!(arr, [1, 2, 9]);
}

#[test]
fn test_clear_resets_to_default_capacity() {
    let mut arr = GrowableArray::with_capacity(32);
    arr.extend(0..40);
    assert_eq!(arr.capacity(), 64);
    arr.clear();
    assert!(arr.is_empty());
    assert_eq!(arr.len(), 0);
    assert_eq!(arr.capacity(), DEFAULT_CAPACITY);
    assert_eq!(arr.relocated(), 0);
    assert_eq!(arr.to_string(), "[]");

    arr.push_back(1);
    assert_eq!(arr, [1]);
}

#[test]
fn test_at_and_at_mut() {
    let mut arr = from_slice(&[10, 20, 30]);
    assert_eq!(arr.at(2), Ok(&30));
    *arr.at_mut(0).unwrap() = 11;
    assert_eq!(arr, [11, 20, 30]);

    assert_eq!(
        arr.at(3).unwrap_err(),
        ArrayError::IndexOutOfRange { index: 3, len: 3 }
    );
    assert!(arr.at_mut(usize::MAX).is_err());
}

#[test]
fn test_unchecked_access() {
    let mut arr = from_slice(&[1, 2, 3]);
    // SAFETY: both indices are below len.
    unsafe {
        assert_eq!(*arr.get_unchecked(1), 2);
        *arr.get_unchecked_mut(2) = 30;
    }
    assert_eq!(arr[2], 30);
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn test_index_operator_panics_past_len() {
    let arr = from_slice(&[1, 2, 3]);
    let _value = arr[3];
}

#[test]
fn test_find() {
    let arr = from_slice(&[20, 10, 99, 40, 50, 60, 70]);
    assert_eq!(arr.find(&99), Ok(2));
    assert_eq!(arr.find(&999), Err(ArrayError::NotFound));
    assert_eq!(arr.find(&999).unwrap_err().to_string(), "Element not found");
}

#[test]
fn test_find_returns_first_match() {
    let arr = from_slice(&[7, 1, 7]);
    assert_eq!(arr.find(&7), Ok(0));
}

#[test]
fn test_find_all() {
    let arr = from_slice(&[10, 20, 10, 30, 10]);
    let hits = arr.find_all(&10);
    assert_eq!(hits, [0, 2, 4]);
    assert_eq!(hits.to_string(), "[0, 2, 4]");

    let misses = arr.find_all(&999);
    assert!(misses.is_empty());
    assert_eq!(misses.to_string(), "[]");
}

#[test]
fn test_sorted_leaves_receiver_alone() {
    let arr = from_slice(&[5, 3, 8, 1, 4]);
    let sorted = arr.sorted();
    assert_eq!(sorted, [1, 3, 4, 5, 8]);
    assert_eq!(arr, [5, 3, 8, 1, 4]);
    assert_eq!(arr.capacity(), 5);
}

#[test]
fn test_sorted_is_stable() {
    #[derive(Clone, Debug)]
    struct Keyed(u8, &'static str);
    impl PartialEq for Keyed {
        fn eq(&self, other: &Self) -> bool {
            self.0 == other.0
        }
    }
    impl PartialOrd for Keyed {
        fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
            self.0.partial_cmp(&other.0)
        }
    }

    let arr = from_slice(&[Keyed(2, "a"), Keyed(1, "b"), Keyed(2, "c"), Keyed(1, "d")]);
    let tags: Vec<&str> = arr.sorted().iter().map(|k| k.1).collect();
    assert_eq!(tags, ["b", "d", "a", "c"]);
}

#[test]
fn test_sorted_strings_lexicographic() {
    let arr = from_slice(&["pear", "apple", "fig"]);
    assert_eq!(arr.sorted(), ["apple", "fig", "pear"]);
}

#[test]
fn test_reversed() {
    let arr = from_slice(&[1, 2, 3, 4]);
    let reversed = arr.reversed();
    assert_eq!(reversed, [4, 3, 2, 1]);
    assert_eq!(reversed.capacity(), arr.capacity());
    assert_eq!(arr, [1, 2, 3, 4]);
    assert_eq!(reversed.reversed(), arr);
}

#[test]
fn test_merged_with() {
    let a = from_slice(&[1, 2, 3]);
    let b = from_slice(&[4, 5, 6]);
    let merged = a.merged_with(&b);
    assert_eq!(merged, [1, 2, 3, 4, 5, 6]);
    assert_eq!(merged.capacity(), 10);
    assert_eq!(a, [1, 2, 3]);
    assert_eq!(b, [4, 5, 6]);
}

#[test]
fn test_extremes_numeric() {
    let nums = from_slice(&[3, 7, 1, 9, 2]);
    assert_eq!(nums.maximum(), Ok(&9));
    assert_eq!(nums.minimum(), Ok(&1));

    let floats = from_slice(&[2.5, -1.0, 8.25]);
    assert_eq!(floats.maximum(), Ok(&8.25));
    assert_eq!(floats.minimum(), Ok(&-1.0));
}

#[test]
fn test_extremes_nan_never_wins() {
    let floats = from_slice(&[1.0, f64::NAN, 3.0]);
    assert_eq!(floats.maximum(), Ok(&3.0));
    assert_eq!(floats.minimum(), Ok(&1.0));
}

#[test]
fn test_extremes_skip_leading_nan() {
    let floats = from_slice(&[f64::NAN, 1.0, 3.0]);
    assert_eq!(floats.maximum(), Ok(&3.0));
    assert_eq!(floats.minimum(), Ok(&1.0));

    let singles = from_slice(&[f32::NAN, f32::NAN, -2.0]);
    assert_eq!(singles.maximum(), Ok(&-2.0));
}

#[test]
fn test_extremes_all_nan() {
    let floats = from_slice(&[f64::NAN, f64::NAN]);
    assert!(floats.maximum().is_ok_and(|v| v.is_nan()));
    assert!(floats.minimum().is_ok_and(|v| v.is_nan()));
}

#[test]
fn test_extremes_text_by_length() {
    let words = from_slice(&["hi", "hello", "hey", "howdy"]);
    assert_eq!(words.minimum(), Ok(&"hi"));
    assert_eq!(words.maximum(), Ok(&"hello"));

    let owned: GrowableArray<String> = ["zz", "a", "mmm"].iter().map(|s| s.to_string()).collect();
    assert_eq!(owned.maximum().map(String::as_str), Ok("mmm"));
    // "a" is lexicographically smallest and also the shortest.
    assert_eq!(owned.minimum().map(String::as_str), Ok("a"));

    let tie: GrowableArray<String> = ["bb", "aa", "cc"].iter().map(|s| s.to_string()).collect();
    assert_eq!(tie.maximum().map(String::as_str), Ok("bb"));
    assert_eq!(tie.minimum().map(String::as_str), Ok("bb"));
}

#[test]
fn test_extremes_on_empty() {
    let empty: GrowableArray<i64> = GrowableArray::new();
    assert_eq!(empty.maximum(), Err(ArrayError::Empty));
    assert_eq!(empty.minimum().unwrap_err().kind(), ErrorKind::Empty);
    assert_eq!(empty.minimum().unwrap_err().to_string(), "Array is empty");
}

#[test]
fn test_clone_is_deep() {
    let mut a: GrowableArray<String> = ["x", "y"].iter().map(|s| s.to_string()).collect();
    let mut b = a.clone();
    assert_eq!(b.capacity(), a.capacity());

    a.push_back("z".to_string());
    a.at_mut(0).unwrap().push('!');
    assert_eq!(b.to_string(), "[x, y]");

    b.clear();
    assert_eq!(a.to_string(), "[x!, y, z]");
}

#[test]
fn test_clone_from_replaces_contents() {
    let source = from_slice(&[1, 2, 3]);
    let mut target = GrowableArray::with_capacity(20);
    target.extend([9, 9]);
    target.clone_from(&source);
    assert_eq!(target, [1, 2, 3]);
    assert_eq!(target.capacity(), source.capacity());
}

#[test]
fn test_take_leaves_default_behind() {
    let mut arr = from_slice(&[1, 2, 3, 4, 5, 6]);
    let moved = std::mem::take(&mut arr);
    assert_eq!(moved, [1, 2, 3, 4, 5, 6]);
    assert!(arr.is_empty());
    assert_eq!(arr.capacity(), DEFAULT_CAPACITY);
}

#[test]
fn test_try_with_capacity() {
    let arr = GrowableArray::<u64>::try_with_capacity(8).unwrap();
    assert_eq!(arr.capacity(), 8);
    assert!(arr.is_empty());
    assert_eq!(GrowableArray::<u64>::try_with_capacity(0).unwrap().capacity(), 1);

    let err = GrowableArray::<u64>::try_with_capacity(usize::MAX).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CapacityOverflow);
    assert_eq!(err.to_string(), "Capacity overflow");
}

#[test]
fn test_allocation_failure_message() {
    let err = ArrayError::AllocationFailed { bytes: 4096 };
    assert_eq!(err.kind(), ErrorKind::AllocationFailed);
    assert_eq!(err.to_string(), "Allocation of 4096 bytes failed");
}

#[test]
fn test_try_reserve() {
    let mut arr: GrowableArray<i32> = GrowableArray::new();
    assert!(arr.try_reserve(3).is_ok());
    assert_eq!(arr.capacity(), 5);
    assert!(arr.try_reserve(12).is_ok());
    assert_eq!(arr.capacity(), 20);
    assert_eq!(
        arr.try_reserve(usize::MAX).unwrap_err().kind(),
        ErrorKind::CapacityOverflow
    );
    assert_eq!(arr.capacity(), 20);
}

#[test]
fn test_zero_sized_elements() {
    let mut arr = GrowableArray::new();
    for _ in 0..12 {
        arr.push_back(());
    }
    assert_eq!(arr.len(), 12);
    assert_eq!(arr.capacity(), 20);
    assert_eq!(arr.remove_at(3), Ok(()));
    assert_eq!(arr.into_iter().count(), 11);
}

#[test]
fn test_raii_drop() {
    let counter = Arc::new(AtomicUsize::new(0));
    {
        let mut arr = GrowableArray::new();
        for _ in 0..10 {
            arr.push_back(Droppable(counter.clone()));
        }
    }
    assert_eq!(counter.load(Ordering::SeqCst), 10);
}

#[test]
fn test_removal_hands_out_ownership_once() {
    let counter = Arc::new(AtomicUsize::new(0));
    let mut arr = GrowableArray::new();
    for _ in 0..4 {
        arr.push_back(Droppable(counter.clone()));
    }

    drop(arr.pop_back());
    drop(arr.pop_front());
    drop(arr.remove_at(0));
    assert_eq!(counter.load(Ordering::SeqCst), 3);

    drop(arr);
    assert_eq!(counter.load(Ordering::SeqCst), 4);
}

#[test]
fn test_clear_drops_elements() {
    let counter = Arc::new(AtomicUsize::new(0));
    let mut arr = GrowableArray::new();
    for _ in 0..7 {
        arr.push_back(Droppable(counter.clone()));
    }
    arr.clear();
    assert_eq!(counter.load(Ordering::SeqCst), 7);
    drop(arr);
    assert_eq!(counter.load(Ordering::SeqCst), 7);
}

#[test]
fn test_partially_consumed_into_iter_drops_rest() {
    let counter = Arc::new(AtomicUsize::new(0));
    let mut arr = GrowableArray::new();
    for _ in 0..6 {
        arr.push_back(Droppable(counter.clone()));
    }
    let mut iter = arr.into_iter();
    drop(iter.next());
    drop(iter.next_back());
    assert_eq!(iter.len(), 4);
    drop(iter);
    assert_eq!(counter.load(Ordering::SeqCst), 6);
}

#[test]
fn test_iterators() {
    let mut arr = GrowableArray::new();
    arr.push_back(10);
    arr.push_back(20);
    arr.push_back(30);

    let mut sum = 0;
    for &x in &arr {
        sum += x;
    }
    assert_eq!(sum, 60);

    for x in &mut arr {
        *x += 1;
    }
    assert_eq!(arr[0], 11);

    let collected: Vec<i32> = arr.into_iter().rev().collect();
    assert_eq!(collected, vec![31, 21, 11]);
}

#[test]
fn test_display_and_debug() {
    let words = from_slice(&["hi", "hello"]);
    assert_eq!(words.to_string(), "[hi, hello]");
    assert_eq!(format!("{words:?}"), r#"["hi", "hello"]"#);
}

#[test]
fn test_concurrent_shared_reads() {
    let arr: GrowableArray<i32> = (0..100).collect();

    scope(|s| {
        let a = s.spawn(|_| arr.iter().sum::<i32>());
        let b = s.spawn(|_| arr.find(&42));
        assert_eq!(a.join().unwrap(), 4950);
        assert_eq!(b.join().unwrap(), Ok(42));
    })
    .unwrap();
}
