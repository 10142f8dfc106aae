//! Dynarray Quickstart: the container's operations end to end.
//!
//! Demonstrates:
//!   1. Creating an array with an explicit capacity
//!   2. Appending, inserting, erasing, and sorting
//!   3. Inspecting size and capacity, then shrinking to fit
//!   4. Clearing, and building an array from a literal sequence
//!   5. Handling an out-of-range index and a capacity ceiling
//!
//! Run with:
//!   RUST_LOG=dynarray=trace cargo run --example quickstart

use dynarray::{ArrayConfig, ArrayError, DynamicArray};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Dynarray Quickstart ===\n");

    // 1. Ten slots up front.
    let mut array = DynamicArray::with_capacity(10)?;

    // 2. Basic mutation.
    array.append(10)?;
    array.append(20)?;
    array.append(30)?;
    println!("Array elements: {array}");

    array.insert(15, 1)?;
    println!("After inserting 15 at index 1: {array}");

    array.erase(2)?;
    println!("After erasing index 2: {array}");

    array.sort();
    println!("After sorting: {array}");

    // 3. Size and capacity.
    println!("Size of array: {}", array.len());
    println!("Capacity of array: {}", array.capacity());

    array.shrink_to_fit()?;
    println!(
        "Capacity of array after shrink_to_fit: {}",
        array.capacity()
    );

    // 4. Clear, then a literal sequence.
    array.clear();
    println!("Size of array after clear: {}", array.len());
    println!("Array elements: {array}");

    let literal = DynamicArray::from_sequence([1, 2, 3, 4, 5])?;
    println!("Initialized from a literal sequence: {literal}");

    // 5. Errors are values, and the array is untouched by them.
    match literal.at(7) {
        Err(err @ ArrayError::OutOfRange { .. }) => println!("Lookup failed: {err}"),
        other => println!("Unexpected lookup result: {other:?}"),
    }

    let mut bounded = DynamicArray::with_config(ArrayConfig::new(2).with_max_capacity(3))?;
    for value in 0..4 {
        if let Err(err) = bounded.append(value) {
            println!("Append of {value} refused: {err}");
        }
    }
    println!(
        "Bounded array: [{bounded}] (capacity {})",
        bounded.capacity()
    );

    Ok(())
}
