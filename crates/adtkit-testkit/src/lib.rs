//! Fixtures and proptest strategies shared by adtkit tests.
//!
//! Keeping these in a workspace-only crate avoids copy-paste across the heap,
//! segment tree and fenwick property suites.

pub mod proptest;

/// The array used throughout the segment tree examples.
pub const SAMPLE_ARRAY: [i64; 8] = [1, 3, 8, 2, 5, 6, 10, 2];

/// Reference sum over `values[start..=end]`.
pub fn naive_sum(values: &[i64], start: usize, end: usize) -> i64 {
    values[start..=end].iter().sum()
}

/// Reference minimum over `values[start..=end]`.
pub fn naive_min(values: &[i64], start: usize, end: usize) -> i64 {
    values[start..=end].iter().copied().fold(i64::MAX, i64::min)
}

/// Reference maximum over `values[start..=end]`.
pub fn naive_max(values: &[i64], start: usize, end: usize) -> i64 {
    values[start..=end].iter().copied().fold(i64::MIN, i64::max)
}

/// Reference fold for an aggregate tag (`"sum"`, `"min"`, `"max"`).
///
/// Panics on any other tag; callers only pass tags from
/// [`crate::proptest::strategy_aggregate_tag`].
pub fn naive_aggregate(tag: &str, values: &[i64], start: usize, end: usize) -> i64 {
    match tag {
        "sum" => naive_sum(values, start, end),
        "min" => naive_min(values, start, end),
        "max" => naive_max(values, start, end),
        other => panic!("no reference fold for tag {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naive_folds_over_sample() {
        assert_eq!(naive_sum(&SAMPLE_ARRAY, 0, 7), 37);
        assert_eq!(naive_min(&SAMPLE_ARRAY, 2, 4), 2);
        assert_eq!(naive_max(&SAMPLE_ARRAY, 0, 3), 8);
        assert_eq!(naive_aggregate("sum", &SAMPLE_ARRAY, 4, 7), 23);
    }
}
