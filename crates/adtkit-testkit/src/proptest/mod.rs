//! Proptest strategies for adtkit property-based testing

pub mod strategies;

pub use strategies::{
    HeapOp, strategy_aggregate_tag, strategy_array_and_position, strategy_array_and_range,
    strategy_heap_ops, strategy_int_vec, strategy_non_empty_int_vec, strategy_small_int,
    strategy_union_pairs, strategy_unknown_tag,
};
