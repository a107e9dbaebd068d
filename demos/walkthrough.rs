//! Growth walkthrough example

use flatvec_core::{DynamicArray, FaultyMemory, FlatMemory};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Flatvec Growth Walkthrough\n");

    let mut array = DynamicArray::new(FlatMemory::default());

    for value in [3.0, 5.0, 15.0, 19.0, 45.0, 10.0] {
        array.push(value)?;
        println!("push {:>4}: {:?}", value, array);
    }

    for _ in 0..3 {
        let value = array.pop()?;
        println!("pop  {:>4}: {:?}", value, array);
    }

    println!("\nFirst element: {}", array.get(0)?);

    // Same walk on a memory that refuses every allocation
    let mut starved = DynamicArray::new(FaultyMemory::always_fail(FlatMemory::default()));
    match starved.push(1.0) {
        Ok(()) => println!("Unexpected success"),
        Err(e) => println!("Starved array: {}", e),
    }

    println!("\nUse 'flatvec demo' for the same walk with colored output");

    Ok(())
}
