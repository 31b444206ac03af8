//! Fuzz harness for heap operation sequences
//!
//! Each input byte pair is one operation: an even tag inserts the second
//! byte, an odd tag extracts. The heap invariant is checked after each step
//! and every extracted value must be the extreme of what remains.

#![no_main]

use adtkit_heap::{MaxHeap, MinHeap};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut max: MaxHeap<u8> = MaxHeap::new();
    let mut min: MinHeap<u8> = MinHeap::new();

    for op in data.chunks_exact(2) {
        if op[0] % 2 == 0 {
            max.insert(op[1]);
            min.insert(op[1]);
        } else {
            match (max.extract(), min.extract()) {
                (Ok(hi), Ok(lo)) => {
                    assert!(max.iter().all(|v| *v <= hi));
                    assert!(min.iter().all(|v| *v >= lo));
                }
                (Err(_), Err(_)) => assert!(max.is_empty() && min.is_empty()),
                _ => panic!("heaps disagree on emptiness"),
            }
        }
        assert!(max.is_heap());
        assert!(min.is_heap());
        assert!(max.capacity() >= max.len());
    }

    let heapified = MaxHeap::heapify(data.to_vec());
    assert!(heapified.is_heap());
});
