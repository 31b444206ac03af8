//! Segment tree with a pluggable associative merge.
//!
//! The tree is stored in a flat `Vec` addressed as a complete binary tree:
//! node `i` has children `2i + 1` and `2i + 2`, the root covers `[0, n - 1]`
//! and every node covering `[low, high]` splits at
//! `mid = floor((low + high) / 2)`. Build, update and query all use the same
//! split, so they agree on which positions belong to which subtree.
//!
//! [`SegmentTree`] takes any merge closure plus its identity value.
//! [`SegmentTreeFactory`] picks the merge for the common range queries
//! (sum, min, max) from an [`AggregateKind`] tag.

mod factory;

use adtkit_error::{AdtError, ErrorCategory};
use std::fmt;
use thiserror::Error;

pub use factory::{Aggregate, AggregateKind, RangeQueryTree, SegmentTreeFactory, COMPONENT};

/// Segment tree errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentTreeError {
    /// Query bounds outside `[0, length)` or `start > end`.
    #[error("invalid interval [{start}, {end}]: expected start <= end within [0, {length})")]
    InvalidRange {
        start: usize,
        end: usize,
        length: usize,
    },
    /// Update position outside `[0, length)`.
    #[error("position {pos} is outside [0, {length})")]
    PositionOutOfBounds { pos: usize, length: usize },
    /// Factory tag that names no supported aggregate.
    #[error("unknown range query type {kind:?}, supported types are: {supported}")]
    UnsupportedAggregateKind { kind: String, supported: String },
}

impl From<SegmentTreeError> for AdtError {
    fn from(err: SegmentTreeError) -> Self {
        let category = match &err {
            SegmentTreeError::InvalidRange { .. } | SegmentTreeError::PositionOutOfBounds { .. } => {
                ErrorCategory::Range
            }
            SegmentTreeError::UnsupportedAggregateKind { .. } => ErrorCategory::Unsupported,
        };
        AdtError::from_source(category, err).with_context("structure", "segment_tree")
    }
}

/// A segment tree over a fixed-length sequence.
///
/// `merge` combines two sibling aggregates into their parent; `default` is
/// returned for empty sub-ranges and must be the identity of `merge`.
/// Parents are always computed as `merge(left, right)`, during build and
/// update alike, so non-commutative merges see positions in order.
#[derive(Clone)]
pub struct SegmentTree<T, F> {
    tree: Vec<T>,
    length: usize,
    merge: F,
    default: T,
}

impl<T, F> SegmentTree<T, F>
where
    T: Clone,
    F: Fn(&T, &T) -> T,
{
    /// Build a tree over `array`.
    pub fn new(array: &[T], merge: F, default: T) -> Self {
        let length = array.len();
        let slots = if length == 0 {
            0
        } else {
            last_node(0, 0, length - 1) + 1
        };
        let mut tree = Self {
            tree: vec![default.clone(); slots],
            length,
            merge,
            default,
        };
        if length > 0 {
            tree.build(array, 0, 0, length - 1);
        }
        tree
    }

    fn build(&mut self, array: &[T], index: usize, low: usize, high: usize) {
        if low == high {
            self.tree[index] = array[low].clone();
            return;
        }
        let mid = midpoint(low, high);
        let left = index * 2 + 1;
        let right = left + 1;
        self.build(array, left, low, mid);
        self.build(array, right, mid + 1, high);
        self.tree[index] = (self.merge)(&self.tree[left], &self.tree[right]);
    }

    /// Set the element at `pos` and recompute every ancestor.
    pub fn update(&mut self, pos: usize, value: T) -> Result<(), SegmentTreeError> {
        if pos >= self.length {
            return Err(SegmentTreeError::PositionOutOfBounds {
                pos,
                length: self.length,
            });
        }
        self.update_node(0, 0, self.length - 1, pos, value);
        Ok(())
    }

    fn update_node(&mut self, index: usize, low: usize, high: usize, pos: usize, value: T) {
        if low == high {
            self.tree[index] = value;
            return;
        }
        let mid = midpoint(low, high);
        let left = index * 2 + 1;
        let right = left + 1;
        if pos <= mid {
            self.update_node(left, low, mid, pos, value);
        } else {
            self.update_node(right, mid + 1, high, pos, value);
        }
        self.tree[index] = (self.merge)(&self.tree[left], &self.tree[right]);
    }

    /// Aggregate over the inclusive range `[start, end]`.
    pub fn query(&self, start: usize, end: usize) -> Result<T, SegmentTreeError> {
        if start >= self.length || end >= self.length || start > end {
            return Err(SegmentTreeError::InvalidRange {
                start,
                end,
                length: self.length,
            });
        }
        Ok(self.query_node(start, end, 0, 0, self.length - 1))
    }

    fn query_node(&self, start: usize, end: usize, index: usize, low: usize, high: usize) -> T {
        if start > end {
            return self.default.clone();
        }
        if start == low && end == high {
            return self.tree[index].clone();
        }
        if low >= high {
            return self.default.clone();
        }
        let mid = midpoint(low, high);
        let left = index * 2 + 1;
        let right = left + 1;
        let left_part = self.query_node(start, end.min(mid), left, low, mid);
        let right_part = self.query_node(start.max(mid + 1), end, right, mid + 1, high);
        (self.merge)(&left_part, &right_part)
    }

    /// Element at `pos` in the underlying sequence.
    pub fn get(&self, pos: usize) -> Result<T, SegmentTreeError> {
        self.query(pos, pos).map_err(|_| SegmentTreeError::PositionOutOfBounds {
            pos,
            length: self.length,
        })
    }
}

impl<T, F> SegmentTree<T, F> {
    /// Length of the underlying sequence.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Aggregate storage in node-index order.
    pub fn as_slice(&self) -> &[T] {
        &self.tree
    }

    /// Identity returned for empty sub-ranges.
    pub fn default_value(&self) -> &T {
        &self.default
    }
}

impl<T: fmt::Debug, F> fmt::Debug for SegmentTree<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentTree")
            .field("tree", &self.tree)
            .field("length", &self.length)
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}

fn midpoint(low: usize, high: usize) -> usize {
    low + (high - low) / 2
}

/// Highest node index reached when splitting `[low, high]` from `index`.
fn last_node(index: usize, low: usize, high: usize) -> usize {
    if low == high {
        return index;
    }
    let mid = midpoint(low, high);
    let left = index * 2 + 1;
    last_node(left, low, mid).max(last_node(left + 1, mid + 1, high))
}

#[cfg(test)]
mod tests {
    use super::*;
    use adtkit_testkit::SAMPLE_ARRAY;

    fn sum_tree(array: &[i64]) -> SegmentTree<i64, impl Fn(&i64, &i64) -> i64> {
        SegmentTree::new(array, |a: &i64, b: &i64| a + b, 0)
    }

    #[test]
    fn test_build_sum_power_of_two() {
        let tree = sum_tree(&SAMPLE_ARRAY);
        assert_eq!(
            tree.as_slice(),
            &[37, 14, 23, 4, 10, 11, 12, 1, 3, 8, 2, 5, 6, 10, 2]
        );
    }

    #[test]
    fn test_build_sum_odd_length() {
        let tree = sum_tree(&[1, 3, 8, 2, 5, 6, 10]);
        assert_eq!(tree.as_slice(), &[35, 14, 21, 4, 10, 11, 10, 1, 3, 8, 2, 5, 6]);
    }

    #[test]
    fn test_build_empty_and_single() {
        let empty = sum_tree(&[]);
        assert!(empty.is_empty());
        assert!(empty.as_slice().is_empty());

        let single = sum_tree(&[1]);
        assert_eq!(single.as_slice(), &[1]);
        assert_eq!(single.query(0, 0), Ok(1));
    }

    #[test]
    fn test_build_sparse_layout_fills_gaps_with_default() {
        // Six leaves reach node 12; nodes 9 and 10 are never used.
        let tree = sum_tree(&[1, 2, 3, 4, 5, 6]);
        assert_eq!(tree.as_slice().len(), 13);
        assert_eq!(tree.as_slice()[0], 21);
        assert_eq!(tree.as_slice()[9], 0);
        assert_eq!(tree.as_slice()[10], 0);
        assert_eq!(tree.query(0, 5), Ok(21));
        assert_eq!(tree.query(4, 5), Ok(11));
    }

    #[test]
    fn test_query_partial_ranges() -> anyhow::Result<()> {
        let tree = sum_tree(&[4, 8, 1, 10, 2, 5, 13, 9]);
        assert_eq!(tree.query(0, 2)?, 13);
        assert_eq!(tree.query(3, 3)?, 10);
        assert_eq!(tree.query(2, 6)?, 31);
        assert_eq!(tree.query(0, 7)?, 52);
        Ok(())
    }

    #[test]
    fn test_query_rejects_bad_ranges() {
        let tree = sum_tree(&[1, 2, 3]);
        for (start, end) in [(3, 3), (2, 1), (0, 3), (5, 9)] {
            assert_eq!(
                tree.query(start, end),
                Err(SegmentTreeError::InvalidRange {
                    start,
                    end,
                    length: 3
                })
            );
        }
    }

    #[test]
    fn test_empty_tree_rejects_everything() {
        let mut tree = sum_tree(&[]);
        assert!(matches!(
            tree.query(0, 0),
            Err(SegmentTreeError::InvalidRange { length: 0, .. })
        ));
        assert_eq!(
            tree.update(0, 1),
            Err(SegmentTreeError::PositionOutOfBounds { pos: 0, length: 0 })
        );
    }

    #[test]
    fn test_update_recomputes_ancestors() -> anyhow::Result<()> {
        let mut tree = sum_tree(&SAMPLE_ARRAY);
        tree.update(2, 0)?;
        assert_eq!(tree.query(0, 7)?, 29);
        assert_eq!(tree.query(2, 3)?, 2);
        assert_eq!(tree.get(2)?, 0);

        tree.update(7, 12)?;
        assert_eq!(
            tree.as_slice(),
            &[39, 6, 33, 4, 2, 11, 22, 1, 3, 0, 2, 5, 6, 10, 12]
        );
        Ok(())
    }

    #[test]
    fn test_non_commutative_merge_keeps_order() -> anyhow::Result<()> {
        let letters: Vec<String> = ["a", "b", "c", "d", "e"].iter().map(|s| s.to_string()).collect();
        let concat = |a: &String, b: &String| format!("{a}{b}");
        let mut tree = SegmentTree::new(&letters, concat, String::new());

        assert_eq!(tree.query(0, 4)?, "abcde");
        assert_eq!(tree.query(1, 3)?, "bcd");

        tree.update(1, "X".to_string())?;
        assert_eq!(tree.query(0, 4)?, "aXcde");
        assert_eq!(tree.query(1, 2)?, "Xc");
        assert_eq!(tree.as_slice()[0], "aXcde");
        Ok(())
    }

    #[test]
    fn test_segment_error_converts() {
        let err: AdtError = SegmentTreeError::InvalidRange {
            start: 4,
            end: 2,
            length: 3,
        }
        .into();
        assert!(err.is_range_error());
        insta::assert_snapshot!(
            err.to_string(),
            @"[range] invalid interval [4, 2]: expected start <= end within [0, 3) (structure=segment_tree)"
        );
    }
}
