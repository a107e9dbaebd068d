use anyhow::{Context, Result};
use colored::*;
use flatvec_core::{
    Address, ArrayError, ArrayStats, DynamicArray, FaultyMemory, FlatMemory, Memory, Slot,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Read};
use tracing::{debug, info};

/// One operation in a JSON script
///
/// Indices are signed so scripts can probe negative positions; those are
/// reported as index errors without touching the array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum ScriptOp {
    Push { value: Slot },
    Pop,
    Get { index: i64 },
    Insert { index: i64, value: Slot },
    Remove { index: i64 },
}

/// Result of a single step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Ok {
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<Slot>,
    },
    Error {
        kind: String,
        message: String,
    },
}

impl Outcome {
    fn from_error(err: ArrayError) -> Self {
        let kind = match err {
            ArrayError::IndexOutOfBounds { .. } => "index_error",
            ArrayError::OutOfMemory { .. } => "out_of_memory",
        };
        Outcome::Error {
            kind: kind.to_string(),
            message: err.to_string(),
        }
    }

    fn negative_index(index: i64, length: usize) -> Self {
        Outcome::Error {
            kind: "index_error".to_string(),
            message: format!(
                "Index error: index {} out of bounds for length {}",
                index, length
            ),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok { .. })
    }
}

/// Array state after a step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: usize,
    pub op: ScriptOp,
    pub outcome: Outcome,
    pub length: usize,
    pub capacity: usize,
    pub address: Option<Address>,
}

/// Totals for a finished script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub steps: usize,
    pub failed_steps: usize,
    pub final_elements: Vec<Slot>,
    pub stats: ArrayStats,
}

impl RunSummary {
    pub fn new<M: Memory>(array: &DynamicArray<M>, records: &[StepRecord]) -> Self {
        Self {
            steps: records.len(),
            failed_steps: records.iter().filter(|r| !r.outcome.is_ok()).count(),
            final_elements: array.to_vec(),
            stats: array.stats(),
        }
    }
}

/// JSON document written by `--output`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub steps: Vec<StepRecord>,
    pub summary: RunSummary,
}

/// Parse a JSON array of operations
pub fn parse_script(content: &str) -> Result<Vec<ScriptOp>> {
    serde_json::from_str(content).with_context(|| "Failed to parse JSON script")
}

/// Apply every operation in order. Failed steps are recorded and the script
/// carries on.
pub fn run_script<M: Memory>(array: &mut DynamicArray<M>, ops: &[ScriptOp]) -> Vec<StepRecord> {
    ops.iter()
        .enumerate()
        .map(|(step, op)| {
            let outcome = apply(array, op);
            debug!("Step {}: {:?} -> {:?}", step, op, outcome);
            StepRecord {
                step,
                op: op.clone(),
                outcome,
                length: array.len(),
                capacity: array.capacity(),
                address: array.address(),
            }
        })
        .collect()
}

fn apply<M: Memory>(array: &mut DynamicArray<M>, op: &ScriptOp) -> Outcome {
    let length = array.len();
    let result = match *op {
        ScriptOp::Push { value } => array.push(value).map(|_| None),
        ScriptOp::Pop => array.pop().map(Some),
        ScriptOp::Get { index } => match usize::try_from(index) {
            Ok(index) => array.get(index).map(Some),
            Err(_) => return Outcome::negative_index(index, length),
        },
        ScriptOp::Insert { index, value } => match usize::try_from(index) {
            Ok(index) => array.insert(index, value).map(|_| None),
            Err(_) => return Outcome::negative_index(index, length),
        },
        ScriptOp::Remove { index } => match usize::try_from(index) {
            Ok(index) => array.remove(index).map(Some),
            Err(_) => return Outcome::negative_index(index, length),
        },
    };

    match result {
        Ok(value) => Outcome::Ok { value },
        Err(err) => Outcome::from_error(err),
    }
}

fn read_stdin_script<R: Read>(mut reader: R) -> Result<String> {
    let mut buf = String::new();
    reader
        .read_to_string(&mut buf)
        .with_context(|| "Failed to read script from stdin")?;
    Ok(buf)
}

fn describe_op(op: &ScriptOp) -> String {
    match op {
        ScriptOp::Push { value } => format!("push({})", value),
        ScriptOp::Pop => "pop()".to_string(),
        ScriptOp::Get { index } => format!("get({})", index),
        ScriptOp::Insert { index, value } => format!("insert({}, {})", index, value),
        ScriptOp::Remove { index } => format!("remove({})", index),
    }
}

pub fn execute(
    script: &str,
    memory_slots: usize,
    fail_after: Option<usize>,
    output: Option<&str>,
) -> Result<()> {
    info!("Running script: {}", script);

    // Read script file or stdin
    let content = if script == "-" {
        read_stdin_script(io::stdin())?
    } else {
        fs::read_to_string(script)
            .with_context(|| format!("Failed to read script file: {}", script))?
    };

    let ops = parse_script(&content)?;
    info!("Found {} operations", ops.len());

    let flat = FlatMemory::new(memory_slots);
    let memory = match fail_after {
        Some(successes) => FaultyMemory::fail_after(flat, successes),
        None => FaultyMemory::new(flat),
    };
    let mut array = DynamicArray::new(memory);

    let records = run_script(&mut array, &ops);

    println!("\n=== Script Trace ===");
    for record in &records {
        let (mark, detail) = match &record.outcome {
            Outcome::Ok { value: Some(v) } => ("✓".green(), format!("-> {}", v)),
            Outcome::Ok { value: None } => ("✓".green(), String::new()),
            Outcome::Error { message, .. } => ("✗".red(), message.clone()),
        };
        let address = record
            .address
            .map_or_else(|| "-".to_string(), |a| a.as_usize().to_string());
        println!(
            "{} {:>3} {:<20} length {:>3}  capacity {:>3}  address {:>4}  {}",
            mark,
            record.step,
            describe_op(&record.op),
            record.length,
            record.capacity,
            address,
            detail
        );
    }

    let summary = RunSummary::new(&array, &records);

    println!("\n=== Summary ===");
    println!("Steps:              {}", summary.steps);
    if summary.failed_steps > 0 {
        println!("Failed steps:       {}", summary.failed_steps.to_string().red());
    } else {
        println!("Failed steps:       {}", summary.failed_steps);
    }
    println!("Resizes:            {}", summary.stats.resizes);
    println!("Slots copied:       {}", summary.stats.slots_copied);
    println!("Slots shifted:      {}", summary.stats.slots_shifted);
    println!("Final elements:     {:?}", summary.final_elements);

    if let Some(output_path) = output {
        let report = RunReport {
            steps: records,
            summary,
        };
        let json = serde_json::to_string_pretty(&report)
            .with_context(|| "Failed to serialize trace")?;

        fs::write(output_path, json)
            .with_context(|| format!("Failed to write output file: {}", output_path))?;

        info!("Trace written to: {}", output_path);
    }

    Ok(())
}
