use growable_array::GrowableArray;

fn main() {
    env_logger::init();

    println!("--- Basic Usage Example ---");
    let mut arr = GrowableArray::new();

    for i in 1..=7 {
        arr.push_back(i * 10);
        println!("Pushed: {}, len: {}, cap: {}", i * 10, arr.len(), arr.capacity());
    }

    arr.push_front(5);
    println!("After push_front(5): {arr}");

    match arr.insert_at(100, 1) {
        Ok(()) => println!("unexpected insert"),
        Err(e) => println!("insert_at(100, 1) refused: {e}"),
    }

    println!("find(40) = {:?}", arr.find(&40));
    println!("find_all(999) = {}", arr.find_all(&999));
    println!("reversed: {}", arr.reversed());

    while let Some(val) = arr.pop_back() {
        println!("Popped: {}, len: {}", val, arr.len());
    }
}
