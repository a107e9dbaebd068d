//! Fuzzing entry points for flatvec-core
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Run fuzzer: cargo fuzz run fuzz_ops

use flatvec_core::{ArrayError, DynamicArray, FaultyMemory, FlatMemory, Memory};

/// Drive an array with operations decoded from `data` and check it against a
/// `Vec` model after every step.
///
/// Each operation takes two bytes: an opcode and an argument. A trailing odd
/// byte is ignored.
pub fn fuzz_ops(data: &[u8]) {
    let mut array = DynamicArray::new(FlatMemory::new(4096));
    drive(&mut array, data);
}

/// Like [`fuzz_ops`], but allocations start failing after the number of
/// successes given by the first byte.
pub fn fuzz_ops_with_faults(data: &[u8]) {
    let Some((&budget, rest)) = data.split_first() else {
        return;
    };
    let memory = FaultyMemory::fail_after(FlatMemory::new(4096), usize::from(budget % 8));
    let mut array = DynamicArray::new(memory);
    drive(&mut array, rest);
}

fn drive<M: Memory>(array: &mut DynamicArray<M>, data: &[u8]) {
    let mut model: Vec<f64> = Vec::new();

    for pair in data.chunks_exact(2) {
        let (opcode, arg) = (pair[0], pair[1]);
        let index = usize::from(arg);
        let value = f64::from(arg);

        match opcode % 5 {
            0 => match array.push(value) {
                Ok(()) => model.push(value),
                Err(err) => assert!(err.is_out_of_memory()),
            },
            1 => assert_eq!(
                array.pop(),
                model.pop().ok_or(ArrayError::IndexOutOfBounds {
                    index: 0,
                    length: 0
                })
            ),
            2 => assert_eq!(
                array.get(index).ok(),
                model.get(index).copied()
            ),
            3 => match array.insert(index, value) {
                Ok(()) => model.insert(index, value),
                Err(err) if index < model.len() => assert!(err.is_out_of_memory()),
                Err(err) => assert!(err.is_index_error()),
            },
            _ => assert_eq!(
                array.remove(index).ok(),
                (index < model.len()).then(|| model.remove(index))
            ),
        }

        assert_eq!(array.len(), model.len());
        assert!(array.capacity() >= array.len());
    }

    assert_eq!(array.to_vec(), model);
}
