//! Proptest strategies for adtkit property-based testing
//!
//! Values stay small so that sums over a few hundred elements never
//! overflow `i64`.

use proptest::prelude::*;

// ============================================================================
// Base Strategies
// ============================================================================

/// Strategy for element values
pub fn strategy_small_int() -> impl Strategy<Value = i64> {
    -1_000i64..1_000
}

/// Strategy for possibly empty input arrays
pub fn strategy_int_vec(max_len: usize) -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(strategy_small_int(), 0..=max_len)
}

/// Strategy for arrays with at least one element
pub fn strategy_non_empty_int_vec(max_len: usize) -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(strategy_small_int(), 1..=max_len.max(1))
}

// ============================================================================
// Heap Strategies
// ============================================================================

/// A single heap mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapOp {
    Insert(i64),
    Extract,
}

/// Strategy for interleaved insert/extract sequences, biased towards inserts
pub fn strategy_heap_ops(max_len: usize) -> impl Strategy<Value = Vec<HeapOp>> {
    let op = prop_oneof![
        3 => strategy_small_int().prop_map(HeapOp::Insert),
        1 => Just(HeapOp::Extract),
    ];
    prop::collection::vec(op, 0..=max_len)
}

// ============================================================================
// Range Query Strategies
// ============================================================================

/// Strategy for a non-empty array and a valid inclusive range `start <= end < len`
pub fn strategy_array_and_range(max_len: usize) -> impl Strategy<Value = (Vec<i64>, usize, usize)> {
    strategy_non_empty_int_vec(max_len).prop_flat_map(|values| {
        let len = values.len();
        (Just(values), 0..len, 0..len).prop_map(|(values, a, b)| {
            if a <= b { (values, a, b) } else { (values, b, a) }
        })
    })
}

/// Strategy for a non-empty array and a valid position
pub fn strategy_array_and_position(max_len: usize) -> impl Strategy<Value = (Vec<i64>, usize)> {
    strategy_non_empty_int_vec(max_len).prop_flat_map(|values| {
        let len = values.len();
        (Just(values), 0..len)
    })
}

/// Strategy for supported aggregate tags
pub fn strategy_aggregate_tag() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("sum"), Just("min"), Just("max")]
}

/// Strategy for tags that no factory supports
pub fn strategy_unknown_tag() -> impl Strategy<Value = String> {
    "[a-z]{1,12}".prop_filter("supported tag", |tag| {
        !matches!(tag.as_str(), "sum" | "min" | "max")
    })
}

// ============================================================================
// Union-Find Strategies
// ============================================================================

/// Strategy for union requests over `0..items`
pub fn strategy_union_pairs(items: usize, max_len: usize) -> impl Strategy<Value = Vec<(usize, usize)>> {
    let items = items.max(1);
    prop::collection::vec((0..items, 0..items), 0..=max_len)
}
