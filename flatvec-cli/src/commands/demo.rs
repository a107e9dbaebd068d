use crate::describe;
use anyhow::{Context, Result};
use colored::*;
use flatvec_core::{DynamicArray, FlatMemory};
use tracing::info;

/// Values pushed by the walkthrough, in order
pub const WALKTHROUGH_VALUES: [f64; 6] = [3.0, 5.0, 15.0, 19.0, 45.0, 10.0];

/// Number of pops after the pushes
pub const WALKTHROUGH_POPS: usize = 3;

/// Run the walkthrough and return one line per step
pub fn walkthrough(memory_slots: usize) -> Result<Vec<String>> {
    let mut array = DynamicArray::new(FlatMemory::new(memory_slots));
    let mut lines = Vec::new();

    for value in WALKTHROUGH_VALUES {
        array
            .push(value)
            .with_context(|| format!("Failed to push {}", value))?;
        lines.push(format!("push({:>4})   {}", value, describe(&array)));
    }

    for _ in 0..WALKTHROUGH_POPS {
        let value = array.pop().with_context(|| "Failed to pop")?;
        lines.push(format!("pop() = {:>3}  {}", value, describe(&array)));
    }

    let first = array.get(0).with_context(|| "Failed to read index 0")?;
    lines.push(format!("get(0) = {}", first));

    Ok(lines)
}

pub fn execute(memory_slots: usize) -> Result<()> {
    info!("Running walkthrough on {} slots", memory_slots);

    let lines = walkthrough(memory_slots)?;

    println!("\n=== Walkthrough ===");
    for line in &lines {
        println!("{}", line);
    }

    println!(
        "\n{} Popped slots stay allocated; capacity is never given back",
        "!".yellow()
    );

    Ok(())
}
