use growable_array::GrowableArray;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

struct Tracked(usize, Arc<AtomicUsize>);

impl Drop for Tracked {
    fn drop(&mut self) {
        println!("Dropping element {}", self.0);
        self.1.fetch_add(1, Ordering::SeqCst);
    }
}

fn main() {
    println!("--- Ownership & Drop Example ---");
    let drop_count = Arc::new(AtomicUsize::new(0));

    {
        let mut arr = GrowableArray::new();
        for i in 0..8 {
            arr.push_back(Tracked(i, drop_count.clone()));
        }
        println!("Array holds {} elements in {} slots.", arr.len(), arr.capacity());

        // Removal hands the element back; dropping it here is the only drop.
        if let Ok(removed) = arr.remove_at(3) {
            println!("Removed element {}", removed.0);
        }

        arr.clear();
        println!("Cleared, capacity back to {}.", arr.capacity());

        for i in 100..102 {
            arr.push_back(Tracked(i, drop_count.clone()));
        }
        // Scope ends here, arr is dropped
    }

    println!("Total elements dropped: {}", drop_count.load(Ordering::SeqCst));
    assert_eq!(drop_count.load(Ordering::SeqCst), 10);
}
