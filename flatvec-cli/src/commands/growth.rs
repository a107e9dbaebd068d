use anyhow::{Context, Result};
use colored::*;
use flatvec_core::{constants::GROWTH_FACTOR, Address, ArrayStats, DynamicArray, FlatMemory};
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::info;

/// A reallocation observed while pushing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResizeEvent {
    /// Length before the push that triggered the resize
    pub at_length: usize,
    pub capacity: usize,
    pub address: Address,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthReport {
    pub pushes: usize,
    pub stats: ArrayStats,
    pub final_capacity: usize,
    /// `ceil(log_GROWTH_FACTOR(pushes)) + 1`, the expected ceiling on resizes
    pub resize_bound: usize,
    pub events: Vec<ResizeEvent>,
}

impl GrowthReport {
    /// Average slots copied per push
    pub fn copies_per_push(&self) -> f64 {
        if self.pushes == 0 {
            0.0
        } else {
            self.stats.slots_copied as f64 / self.pushes as f64
        }
    }
}

fn resize_bound(pushes: usize) -> usize {
    // Smallest k with GROWTH_FACTOR^k >= pushes, plus the first allocation.
    let mut reach = 1usize;
    let mut k = 0;
    while reach < pushes {
        reach = reach.saturating_mul(GROWTH_FACTOR);
        k += 1;
    }
    k + 1
}

/// Push `count` values into a fresh array and record every resize
pub fn measure(count: usize, memory_slots: usize) -> Result<GrowthReport> {
    let mut array = DynamicArray::new(FlatMemory::new(memory_slots));
    let mut events = Vec::new();

    for i in 0..count {
        let at_length = array.len();
        let before = array.stats().resizes;

        array
            .push(i as f64)
            .with_context(|| format!("Push {} of {} failed", i + 1, count))?;

        if array.stats().resizes != before {
            if let Some(address) = array.address() {
                events.push(ResizeEvent {
                    at_length,
                    capacity: array.capacity(),
                    address,
                });
            }
        }
    }

    Ok(GrowthReport {
        pushes: count,
        stats: array.stats(),
        final_capacity: array.capacity(),
        resize_bound: resize_bound(count),
        events,
    })
}

pub fn execute(count: usize, memory_slots: usize, output: Option<&str>) -> Result<()> {
    info!("Measuring growth over {} pushes", count);

    let report = measure(count, memory_slots)?;

    println!("\n=== Resize Events ===");
    for event in &report.events {
        println!(
            "at length {:>6} -> capacity {:>7} @ address {}",
            event.at_length,
            event.capacity,
            event.address.as_usize()
        );
    }

    println!("\n=== Growth Summary ===");
    println!("Pushes:             {}", report.pushes);
    println!("Resizes:            {}", report.stats.resizes);
    println!("Resize bound:       {}", report.resize_bound);
    println!("Slots copied:       {}", report.stats.slots_copied);
    println!("Copies per push:    {:.3}", report.copies_per_push());
    println!("Final capacity:     {}", report.final_capacity);

    if report.stats.resizes <= report.resize_bound {
        println!("{} Resizes within logarithmic bound", "✓".green());
    } else {
        println!("{} Resizes exceed logarithmic bound", "✗".red());
    }

    if let Some(output_path) = output {
        let json = serde_json::to_string_pretty(&report)
            .with_context(|| "Failed to serialize growth report")?;
        fs::write(output_path, json)
            .with_context(|| format!("Failed to write output file: {}", output_path))?;
        info!("Growth report written to: {}", output_path);
    }

    Ok(())
}
