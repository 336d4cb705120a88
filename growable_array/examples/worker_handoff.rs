//! A worker thread builds and analyses an array of readings, then hands the
//! results back. Only indices and an owning iterator cross the `join`.
use growable_array::{GrowableArray, IntoIter};
use std::thread;

fn analyse(readings: Vec<u16>, threshold: u16) -> (GrowableArray<usize>, IntoIter<u16>) {
    let mut arr = GrowableArray::with_capacity(readings.len());
    arr.extend(readings);
    println!("worker: {} readings, peak {:?}", arr.len(), arr.maximum().ok());

    let hits = arr.find_all(&threshold);
    (hits, arr.sorted().into_iter())
}

fn main() {
    let readings = vec![40, 75, 12, 75, 90, 3, 75];
    let worker = thread::spawn(move || analyse(readings, 75));

    let (hits, mut ascending) = match worker.join() {
        Ok(result) => result,
        Err(_) => {
            eprintln!("worker panicked");
            return;
        }
    };

    println!("threshold reached at {hits}");
    // Drain from both ends of the buffer the worker allocated.
    let low = ascending.next();
    let high = ascending.next_back();
    println!("lowest {low:?}, highest {high:?}, {} in between", ascending.len());
    assert_eq!(hits, [1, 3, 6]);
    assert_eq!((low, high), (Some(3), Some(90)));
}
