//! Property tests for adtkit-heap
//!
//! Invariant checks for heapify and interleaved insert/extract sequences.

use adtkit_heap::{HeapError, MaxHeap, MinHeap};
use adtkit_testkit::proptest::{HeapOp, strategy_heap_ops, strategy_int_vec};
use proptest::prelude::*;

// ============================================================================
// Heapify
// ============================================================================

proptest! {
    // Heapify produces a valid heap whose root is the extremal element.
    #[test]
    fn prop_heapify_root_is_extremal(values in strategy_int_vec(200)) {
        let min: MinHeap<i64> = MinHeap::heapify(values.clone());
        let max: MaxHeap<i64> = MaxHeap::heapify(values.clone());

        prop_assert!(min.is_heap());
        prop_assert!(max.is_heap());
        prop_assert_eq!(min.len(), values.len());

        match values.iter().min() {
            Some(expected) => prop_assert_eq!(min.peek(), Ok(expected)),
            None => prop_assert_eq!(min.peek(), Err(HeapError::Empty)),
        }
        match values.iter().max() {
            Some(expected) => prop_assert_eq!(max.peek(), Ok(expected)),
            None => prop_assert_eq!(max.peek(), Err(HeapError::Empty)),
        }
    }

    // Draining a heap yields the input sorted.
    #[test]
    fn prop_drain_is_sorted(values in strategy_int_vec(200)) {
        let mut expected = values.clone();
        expected.sort();

        let min: MinHeap<i64> = MinHeap::heapify(values.clone());
        prop_assert_eq!(min.into_sorted_vec(), expected.clone());

        expected.reverse();
        let max: MaxHeap<i64> = MaxHeap::heapify(values);
        prop_assert_eq!(max.into_sorted_vec(), expected);
    }
}

// ============================================================================
// Insert / Extract
// ============================================================================

proptest! {
    // The invariant holds after every operation and extract agrees with a
    // sorted model of the live elements.
    #[test]
    fn prop_ops_preserve_invariant(ops in strategy_heap_ops(300)) {
        let mut heap: MinHeap<i64> = MinHeap::new();
        let mut model: Vec<i64> = Vec::new();

        for op in ops {
            match op {
                HeapOp::Insert(value) => {
                    heap.insert(value);
                    model.push(value);
                }
                HeapOp::Extract => {
                    model.sort_unstable_by(|a, b| b.cmp(a));
                    let expected = model.pop().ok_or(HeapError::Empty);
                    prop_assert_eq!(heap.extract(), expected);
                }
            }
            prop_assert!(heap.is_heap());
            prop_assert_eq!(heap.len(), model.len());
            prop_assert!(heap.capacity() >= heap.len());
        }
    }

    // Storage never shrinks across extract/insert cycles.
    #[test]
    fn prop_capacity_is_monotonic(ops in strategy_heap_ops(300)) {
        let mut heap: MaxHeap<i64> = MaxHeap::new();
        let mut last_capacity = 0;

        for op in ops {
            match op {
                HeapOp::Insert(value) => heap.insert(value),
                HeapOp::Extract => {
                    let _ = heap.extract();
                }
            }
            prop_assert!(heap.capacity() >= last_capacity);
            last_capacity = heap.capacity();
        }
    }
}
